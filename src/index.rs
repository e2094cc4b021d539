//! Existing-record index: a full snapshot of already-synchronized games.
//!
//! Built exactly once per run, before any dedup decision, from a full
//! paginated scan of the issue list. No incremental or partial index is
//! ever consulted; a mid-scan failure aborts the run rather than risk
//! false negatives from a half-built snapshot.

use std::collections::HashMap;

use crate::github::{Client, Issue, Result};
use crate::model::GameLocator;
use crate::stats::RunStats;

/// Title-keyed snapshot of the remote store.
pub struct ExistingIndex {
    by_title: HashMap<String, Issue>,
    /// Lowercased titles in insertion order, for the substring pre-filter.
    titles_lower: Vec<String>,
}

impl ExistingIndex {
    /// Build the index from a full scan of the remote store.
    pub fn build(client: &Client, stats: &mut RunStats) -> Result<ExistingIndex> {
        log::info!("Checking existing issues...");
        let issues = client.list_issues_all(stats)?;
        let index = ExistingIndex::from_issues(issues);
        log::info!("Found {} existing issue(s)", index.len());
        Ok(index)
    }

    /// Build the index from an already-fetched issue list.
    ///
    /// Titles are expected unique; on a duplicate the first record wins,
    /// deterministically.
    pub fn from_issues(issues: Vec<Issue>) -> ExistingIndex {
        let mut by_title = HashMap::new();
        let mut titles_lower = Vec::new();

        for issue in issues {
            if by_title.contains_key(&issue.title) {
                continue;
            }
            titles_lower.push(issue.title.to_lowercase());
            by_title.insert(issue.title.clone(), issue);
        }

        ExistingIndex {
            by_title,
            titles_lower,
        }
    }

    pub fn len(&self) -> usize {
        self.by_title.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_title.is_empty()
    }

    /// Exact membership check against the canonical title.
    pub fn contains_title(&self, title: &str) -> bool {
        self.by_title.contains_key(title)
    }

    /// Cheap pre-filter: does any known title mention this locator's
    /// matchup token?
    ///
    /// Case-insensitive substring match, checked before the game page is
    /// even fetched. Deliberately heuristic: a token shared by unrelated
    /// titles produces a false-positive skip, accepted in exchange for
    /// avoiding redundant fetches. Swap this method for a stronger
    /// content-addressed key without touching the synchronizer.
    pub fn looks_already_synchronized(&self, locator: &GameLocator) -> bool {
        let token = locator.matchup().to_lowercase();
        self.titles_lower.iter().any(|title| title.contains(&token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(title: &str) -> Issue {
        Issue {
            title: title.to_string(),
            state: "open".to_string(),
            labels: Vec::new(),
        }
    }

    #[test]
    fn exact_title_membership() {
        let index = ExistingIndex::from_issues(vec![issue("ALCS Game 5: 2025-10-17/tor-sea")]);
        assert!(index.contains_title("ALCS Game 5: 2025-10-17/tor-sea"));
        assert!(!index.contains_title("ALCS Game 6: 2025-10-18/sea-tor"));
    }

    #[test]
    fn prefilter_matches_matchup_token_case_insensitively() {
        let index = ExistingIndex::from_issues(vec![issue("ALCS Game 5: 2025-10-17/TOR-SEA")]);
        let locator = GameLocator::parse("/mlb/2025-10-18/tor-sea").unwrap();
        assert!(index.looks_already_synchronized(&locator));
    }

    #[test]
    fn prefilter_misses_unknown_matchup() {
        let index = ExistingIndex::from_issues(vec![issue("ALCS Game 5: 2025-10-17/tor-sea")]);
        let locator = GameLocator::parse("/mlb/2025-10-18/lad-phi").unwrap();
        assert!(!index.looks_already_synchronized(&locator));
    }

    #[test]
    fn duplicate_titles_keep_the_first() {
        let index = ExistingIndex::from_issues(vec![
            Issue {
                title: "WS Game 1: 2025-10-24/lad-tor".to_string(),
                state: "closed".to_string(),
                labels: Vec::new(),
            },
            Issue {
                title: "WS Game 1: 2025-10-24/lad-tor".to_string(),
                state: "open".to_string(),
                labels: Vec::new(),
            },
        ]);
        assert_eq!(index.len(), 1);
        assert!(index.contains_title("WS Game 1: 2025-10-24/lad-tor"));
    }

    #[test]
    fn empty_store_yields_empty_index() {
        let index = ExistingIndex::from_issues(Vec::new());
        assert!(index.is_empty());
        let locator = GameLocator::parse("/mlb/2025-10-18/tor-sea").unwrap();
        assert!(!index.looks_already_synchronized(&locator));
    }
}
