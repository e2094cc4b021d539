//! The synchronizer: reconcile freshly extracted games against the store.
//!
//! A single linear pass over the discovered locators. Each one is either
//! skipped (dedup hit, not a game page, no content), created, or counted
//! as an error; nothing backtracks and no per-item failure aborts the
//! batch. Idempotence rests entirely on the pre-built index snapshot —
//! two concurrent runs could race and double-create, so single-runner
//! execution is an operating constraint.

use jiff::Zoned;

use crate::config::Repo;
use crate::extract::{self, Extracted};
use crate::fetch::Fetcher;
use crate::github::{Client, Result};
use crate::index::ExistingIndex;
use crate::model::{GameLocator, GameRecord};
use crate::schedule;
use crate::stats::RunStats;

/// Run the full discovery → extraction → dedup → create pipeline.
pub fn run(token: &str, repo: &Repo, year: Option<i16>) -> Result<()> {
    let client = Client::new(token, repo)?;
    let fetcher = Fetcher::new()?;
    let mut stats = RunStats::default();

    let year = year.unwrap_or_else(|| Zoned::now().year());
    log::info!("Repository: {repo}");
    log::info!("Processing year: {year}");

    let index = ExistingIndex::build(&client, &mut stats)?;
    let locators = schedule::postseason_locators(&fetcher, year, &mut stats);

    log::info!("Processing games...");
    for locator in locators {
        sync_one(&client, &fetcher, &index, locator, &mut stats);
    }

    stats.log_summary();
    Ok(())
}

/// Synchronize one locator. All failures are contained here.
fn sync_one(
    client: &Client,
    fetcher: &Fetcher,
    index: &ExistingIndex,
    locator: GameLocator,
    stats: &mut RunStats,
) {
    // Cheap pre-filter on the matchup token, before any fetch.
    if index.looks_already_synchronized(&locator) {
        log::info!("Game {locator} already exists, skipping");
        stats.games_skipped += 1;
        return;
    }

    let Ok(html) = fetcher.get(&locator.url(), stats) else {
        stats.games_skipped += 1;
        return;
    };

    let record = match extract::extract_game(&html, locator.clone()) {
        Extracted::Game(record) => record,
        Extracted::NotAGame => {
            log::info!("No series information found for {locator}, skipping");
            stats.games_skipped += 1;
            return;
        }
        Extracted::NoContent => {
            log::warn!("No content extracted for {locator}");
            stats.games_skipped += 1;
            return;
        }
    };

    // Second check, now that the canonical title is known.
    let title = record.title();
    if index.contains_title(&title) {
        log::info!("Issue '{title}' already exists, skipping");
        stats.games_skipped += 1;
        return;
    }

    match client.create_issue(&title, &issue_body(&record), &issue_labels(&record), stats) {
        Ok(()) => {
            stats.games_created += 1;
            log::info!("Created issue: {title}");
        }
        Err(e) => {
            stats.errors += 1;
            log::error!("Failed to create issue '{title}': {e}");
        }
    }
}

/// Issue body: source URL plus the synopsis fenced as literal text.
fn issue_body(record: &GameRecord) -> String {
    format!(
        "Game URL: {}\n\n```\n{}\n```\n",
        record.locator.url(),
        record.synopsis
    )
}

/// Label set: the series label plus the league label when one applies.
fn issue_labels(record: &GameRecord) -> Vec<String> {
    let mut labels = vec![record.series.label().to_string()];
    if let Some(league) = record.league {
        labels.push(league.label().to_string());
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::github::Issue;
    use crate::model::{League, Series};

    fn sample_record() -> GameRecord {
        GameRecord {
            locator: GameLocator::parse("/mlb/2025-10-17/tor-sea").unwrap(),
            series: Series::ChampionshipSeries,
            league: Some(League::American),
            game_number: 5,
            synopsis: "Blue Jays\nMariners\nALCS Game 5\nTOR 6 - SEA 2".to_string(),
        }
    }

    fn issue(title: &str) -> Issue {
        Issue {
            title: title.to_string(),
            state: "open".to_string(),
            labels: Vec::new(),
        }
    }

    #[test]
    fn body_fences_synopsis_under_source_url() {
        let body = issue_body(&sample_record());
        assert!(body.starts_with("Game URL: https://plaintextsports.com/mlb/2025-10-17/tor-sea"));
        assert!(body.contains("```\nBlue Jays\n"));
        assert!(body.ends_with("```\n"));
    }

    #[test]
    fn labels_include_league_when_scoped() {
        assert_eq!(issue_labels(&sample_record()), ["series:cs", "american"]);
    }

    #[test]
    fn labels_omit_league_for_world_series() {
        let mut record = sample_record();
        record.series = Series::WorldSeries;
        record.league = None;
        assert_eq!(issue_labels(&record), ["series:ws"]);
    }

    #[test]
    fn second_run_sees_first_runs_create_as_existing() {
        // First run: an empty index lets the record through both checks.
        let record = sample_record();
        let empty = ExistingIndex::from_issues(Vec::new());
        assert!(!empty.looks_already_synchronized(&record.locator));
        assert!(!empty.contains_title(&record.title()));

        // Second run: the store now holds the created title, and both
        // the pre-filter and the exact check report it. Zero net creates.
        let next = ExistingIndex::from_issues(vec![issue(&record.title())]);
        assert!(next.looks_already_synchronized(&record.locator));
        assert!(next.contains_title(&record.title()));
    }

    #[test]
    fn prefilter_skips_before_any_extraction() {
        // A title containing the matchup token short-circuits the
        // pipeline at step one; extraction never runs for this locator.
        let index = ExistingIndex::from_issues(vec![issue("ALCS Game 5: 2025-10-17/tor-sea")]);
        let locator = GameLocator::parse("/mlb/2025-10-18/tor-sea").unwrap();
        assert!(index.looks_already_synchronized(&locator));
    }
}
