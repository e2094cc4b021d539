//! Label provisioning: the taxonomy the synchronizer and scorer rely on.
//!
//! `setup` creates or updates the series and league labels; `players`
//! tears down every `player:` label and recreates one per participant.
//! Both are plain CRUD against the label endpoint with per-item failure
//! containment.

use crate::config::Repo;
use crate::github::{Client, Result};
use crate::model::{League, Series};
use crate::score::PLAYER_LABEL_PREFIX;

/// Participants used when none are given on the command line.
pub const DEFAULT_PLAYERS: &[&str] = &["jack", "marjorie", "caroline"];

/// Palette cycled across player labels.
const PLAYER_COLORS: &[&str] = &[
    "bfdadc", "c5def5", "f9d0c4", "d4c5f9", "c2e0c6", "fad8b8", "bfd4f2", "f9c5d5", "d5f4e6",
    "fbe4d5",
];

struct LabelSpec {
    name: String,
    color: &'static str,
    description: String,
}

/// The fixed series and league labels.
fn standing_labels() -> Vec<LabelSpec> {
    let mut specs = Vec::new();
    for series in Series::ALL {
        specs.push(LabelSpec {
            name: series.label().to_string(),
            color: series.color(),
            description: series.description().to_string(),
        });
    }
    for league in League::ALL {
        specs.push(LabelSpec {
            name: league.label().to_string(),
            color: league.color(),
            description: league.description().to_string(),
        });
    }
    specs
}

/// Create or update the series and league labels.
pub fn setup(token: &str, repo: &Repo) -> Result<()> {
    let client = Client::new(token, repo)?;

    log::info!("Repository: {repo}");
    log::info!("Fetching existing labels...");
    let existing = client.list_labels()?;
    log::info!("Found {} existing label(s)", existing.len());

    let mut created = 0;
    let mut updated = 0;

    for spec in standing_labels() {
        if existing.iter().any(|label| label.name == spec.name) {
            match client.update_label(&spec.name, spec.color, &spec.description) {
                Ok(()) => {
                    log::info!("Updated: {}", spec.name);
                    updated += 1;
                }
                Err(e) => log::error!("Failed to update {}: {e}", spec.name),
            }
        } else {
            match client.create_label(&spec.name, spec.color, &spec.description) {
                Ok(()) => {
                    log::info!("Created: {}", spec.name);
                    created += 1;
                }
                Err(e) => log::error!("Failed to create {}: {e}", spec.name),
            }
        }
    }

    log::info!("Setup complete: created {created} label(s), updated {updated} label(s)");
    Ok(())
}

/// Delete every player label, then create one per given participant.
pub fn players(token: &str, repo: &Repo, names: &[String]) -> Result<()> {
    let client = Client::new(token, repo)?;

    log::info!("Repository: {repo}");
    log::info!("Players: {}", names.join(", "));

    log::info!("Deleting existing player labels...");
    let mut deleted = 0;
    for label in client.list_labels()? {
        if !label.name.starts_with(PLAYER_LABEL_PREFIX) {
            continue;
        }
        match client.delete_label(&label.name) {
            Ok(()) => {
                log::info!("Deleted: {}", label.name);
                deleted += 1;
            }
            Err(e) => log::error!("Failed to delete {}: {e}", label.name),
        }
    }
    log::info!("Deleted {deleted} player label(s)");

    log::info!("Creating new player labels...");
    let mut created = 0;
    for (spec, name) in player_labels(names).iter().zip(names) {
        match client.create_label(&spec.name, spec.color, &spec.description) {
            Ok(()) => {
                log::info!("Created: {} ({})", spec.name, spec.color);
                created += 1;
            }
            Err(e) => log::error!("Failed to create label for {name}: {e}"),
        }
    }
    log::info!("Created {created} player label(s)");

    Ok(())
}

/// One label per participant, cycling the color palette.
fn player_labels(names: &[String]) -> Vec<LabelSpec> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| LabelSpec {
            name: format!("{PLAYER_LABEL_PREFIX}{}", name.to_lowercase()),
            color: PLAYER_COLORS[i % PLAYER_COLORS.len()],
            description: format!("Player: {name}"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn standing_labels_cover_series_and_leagues() {
        let specs = standing_labels();
        let names: Vec<&str> = specs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            ["series:wc", "series:ds", "series:cs", "series:ws", "american", "national"]
        );
    }

    #[test]
    fn player_labels_are_prefixed_and_lowercased() {
        let specs = player_labels(&names(&["Jack", "Marjorie"]));
        assert_eq!(specs[0].name, "player:jack");
        assert_eq!(specs[0].description, "Player: Jack");
        assert_eq!(specs[1].name, "player:marjorie");
    }

    #[test]
    fn palette_cycles_past_ten_players() {
        let many: Vec<String> = (0..12).map(|i| format!("p{i}")).collect();
        let specs = player_labels(&many);
        assert_eq!(specs[0].color, specs[10].color);
        assert_eq!(specs[1].color, specs[11].color);
    }
}
