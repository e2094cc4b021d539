//! Score aggregation: per-participant totals from closed games.
//!
//! Recomputed from scratch every run over the full remote history, which
//! makes aggregation idempotent and immune to double-counting. Only
//! closed issues carrying both a series label and at least one player
//! label contribute; everything else is discarded.

use std::collections::HashMap;

use crate::config::Repo;
use crate::github::{Client, Issue, Label, Result};
use crate::model::Series;
use crate::readme;
use crate::stats::RunStats;

/// Labels classifying a game's series tier.
pub const SERIES_LABEL_PREFIX: &str = "series:";

/// Labels attributing scoring credit to a participant.
pub const PLAYER_LABEL_PREFIX: &str = "player:";

/// Running totals for one participant.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PlayerTotals {
    pub total: u32,
    pub games: u32,
    per_tier: HashMap<Series, u32>,
}

impl PlayerTotals {
    /// Points earned in one tier.
    pub fn tier(&self, series: Series) -> u32 {
        self.per_tier.get(&series).copied().unwrap_or(0)
    }

    fn credit(&mut self, series: Series) {
        let points = series.points();
        self.total += points;
        *self.per_tier.entry(series).or_default() += points;
        self.games += 1;
    }
}

/// Per-participant totals, preserving first-seen participant order.
#[derive(Debug, Default)]
pub struct Scoreboard {
    totals: HashMap<String, PlayerTotals>,
    order: Vec<String>,
}

impl Scoreboard {
    /// Aggregate totals from the full issue set.
    pub fn aggregate(issues: &[Issue]) -> Scoreboard {
        let mut board = Scoreboard::default();

        for issue in issues {
            // Open games contribute nothing.
            if issue.state != "closed" {
                continue;
            }

            let Some(series) = series_from_labels(&issue.labels) else {
                continue;
            };
            let players = players_from_labels(&issue.labels);
            if players.is_empty() {
                continue;
            }

            for player in players {
                board.credit(player, series);
            }
        }

        board
    }

    fn credit(&mut self, player: String, series: Series) {
        if !self.totals.contains_key(&player) {
            self.order.push(player.clone());
        }
        self.totals.entry(player).or_default().credit(series);
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Participants ranked by total, descending. The sort is stable, so
    /// ties keep first-seen order.
    pub fn ranked(&self) -> Vec<(&str, &PlayerTotals)> {
        let mut rows: Vec<(&str, &PlayerTotals)> = self
            .order
            .iter()
            .map(|player| (player.as_str(), &self.totals[player]))
            .collect();
        rows.sort_by(|a, b| b.1.total.cmp(&a.1.total));
        rows
    }
}

/// The first series-classifying label on a record, mapped to its tier.
/// An unknown suffix falls back through [`Series::classify`].
fn series_from_labels(labels: &[Label]) -> Option<Series> {
    labels
        .iter()
        .find(|label| label.name.starts_with(SERIES_LABEL_PREFIX))
        .map(|label| Series::classify(&label.name[SERIES_LABEL_PREFIX.len()..]))
}

/// Every participant label on a record, stripped of its prefix.
fn players_from_labels(labels: &[Label]) -> Vec<String> {
    labels
        .iter()
        .filter_map(|label| label.name.strip_prefix(PLAYER_LABEL_PREFIX))
        .map(str::to_string)
        .collect()
}

/// Aggregate scores from the remote store and publish the league table.
pub fn run(token: &str, repo: &Repo) -> Result<()> {
    let client = Client::new(token, repo)?;
    let mut stats = RunStats::default();

    log::info!("Repository: {repo}");
    log::info!("Fetching game issues...");
    let issues = client.list_issues_all(&mut stats)?;
    log::info!("Found {} issue(s)", issues.len());

    log::info!("Calculating scores...");
    let board = Scoreboard::aggregate(&issues);
    if board.is_empty() {
        log::info!("No scores yet");
    } else {
        for (player, totals) in board.ranked() {
            log::info!(
                "  {player}: {} points ({} games)",
                totals.total,
                totals.games
            );
        }
    }

    log::info!("Updating league table...");
    readme::publish(&client, &board, &mut stats)?;

    log::info!("Scoring complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(state: &str, labels: &[&str]) -> Issue {
        Issue {
            title: "game".to_string(),
            state: state.to_string(),
            labels: labels
                .iter()
                .map(|name| Label {
                    name: (*name).to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn totals_across_tiers_and_players() {
        let issues = vec![
            issue("closed", &["series:ds", "player:jack"]),
            issue("closed", &["series:ws", "player:jack", "player:marjorie"]),
        ];
        let board = Scoreboard::aggregate(&issues);

        let ranked = board.ranked();
        assert_eq!(ranked.len(), 2);

        let (name, jack) = ranked[0];
        assert_eq!(name, "jack");
        assert_eq!(jack.total, 6);
        assert_eq!(jack.tier(Series::DivisionSeries), 2);
        assert_eq!(jack.tier(Series::WorldSeries), 4);
        assert_eq!(jack.games, 2);

        let (name, marjorie) = ranked[1];
        assert_eq!(name, "marjorie");
        assert_eq!(marjorie.total, 4);
        assert_eq!(marjorie.tier(Series::WorldSeries), 4);
        assert_eq!(marjorie.games, 1);
    }

    #[test]
    fn open_issues_contribute_nothing() {
        let issues = vec![issue("open", &["series:ws", "player:jack"])];
        assert!(Scoreboard::aggregate(&issues).is_empty());
    }

    #[test]
    fn closed_issue_without_series_label_is_discarded() {
        let issues = vec![issue("closed", &["american", "player:jack"])];
        assert!(Scoreboard::aggregate(&issues).is_empty());
    }

    #[test]
    fn closed_issue_without_player_labels_is_discarded() {
        let issues = vec![issue("closed", &["series:cs", "american"])];
        assert!(Scoreboard::aggregate(&issues).is_empty());
    }

    #[test]
    fn ranking_breaks_ties_by_first_seen_order() {
        let issues = vec![
            issue("closed", &["series:cs", "player:caroline"]),
            issue("closed", &["series:cs", "player:jack"]),
        ];
        let board = Scoreboard::aggregate(&issues);

        let names: Vec<&str> = board.ranked().iter().map(|(name, _)| *name).collect();
        assert_eq!(names, ["caroline", "jack"]);
    }

    #[test]
    fn ranking_is_total_descending() {
        let issues = vec![
            issue("closed", &["series:wc", "player:caroline"]),
            issue("closed", &["series:ws", "player:jack"]),
        ];
        let board = Scoreboard::aggregate(&issues);

        let names: Vec<&str> = board.ranked().iter().map(|(name, _)| *name).collect();
        assert_eq!(names, ["jack", "caroline"]);
    }

    #[test]
    fn unknown_series_suffix_scores_as_lowest_tier() {
        let issues = vec![issue("closed", &["series:exhibition", "player:jack"])];
        let board = Scoreboard::aggregate(&issues);
        let (_, jack) = board.ranked()[0];
        assert_eq!(jack.total, 1);
        assert_eq!(jack.tier(Series::WildCard), 1);
    }
}
