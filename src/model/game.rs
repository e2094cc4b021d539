//! Game identity: locators discovered on the schedule page and the
//! normalized records extracted from individual game pages.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::SITE_ORIGIN;
use crate::model::{League, Series};

/// Shape of a game path: `/mlb/YYYY-MM-DD/aaa-bbb`.
static LOCATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/mlb/(\d{4}-\d{2}-\d{2})/([^/]+)$").unwrap());

/// An opaque path-like identifier for one contest: date plus matchup token.
///
/// Immutable once discovered. Used both as a fetch target and as a
/// dedup key fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameLocator {
    path: String,
    date: String,
    matchup: String,
}

impl GameLocator {
    /// Parse a root-relative game path. Returns `None` when the path
    /// doesn't match the schedule's locator convention.
    pub fn parse(path: &str) -> Option<GameLocator> {
        let caps = LOCATOR.captures(path)?;
        Some(GameLocator {
            path: path.to_string(),
            date: caps[1].to_string(),
            matchup: caps[2].to_string(),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The contest date, `YYYY-MM-DD`.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// The zero-padded month component of the date.
    pub fn month(&self) -> &str {
        &self.date[5..7]
    }

    /// The trailing matchup token (e.g. `tor-sea`), independent of
    /// series and game number. Drives the cheap dedup pre-filter.
    pub fn matchup(&self) -> &str {
        &self.matchup
    }

    /// Absolute URL of the game page.
    pub fn url(&self) -> String {
        format!("{SITE_ORIGIN}{}", self.path)
    }
}

impl fmt::Display for GameLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// A normalized game record, produced by extraction from one fetched
/// page and consumed exactly once by the synchronizer. Never mutated
/// after creation.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub locator: GameLocator,
    pub series: Series,
    pub league: Option<League>,
    /// Always `>= 1`; extraction rejects a zero game number.
    pub game_number: u32,
    /// Boilerplate-stripped synopsis; non-empty for a valid record.
    pub synopsis: String,
}

impl GameRecord {
    /// The canonical issue title, computed deterministically from the
    /// series code, game number, date, and matchup token.
    pub fn title(&self) -> String {
        format!(
            "{} Game {}: {}/{}",
            self.series.code(self.league),
            self.game_number,
            self.locator.date(),
            self.locator.matchup(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_locator() {
        let locator = GameLocator::parse("/mlb/2025-10-17/tor-sea").unwrap();
        assert_eq!(locator.date(), "2025-10-17");
        assert_eq!(locator.month(), "10");
        assert_eq!(locator.matchup(), "tor-sea");
        assert_eq!(
            locator.url(),
            "https://plaintextsports.com/mlb/2025-10-17/tor-sea"
        );
    }

    #[test]
    fn reject_malformed_paths() {
        assert!(GameLocator::parse("/mlb/2025/schedule").is_none());
        assert!(GameLocator::parse("/nba/2025-10-17/tor-sea").is_none());
        assert!(GameLocator::parse("/mlb/2025-10-17/tor-sea/boxscore").is_none());
        assert!(GameLocator::parse("mlb/2025-10-17/tor-sea").is_none());
    }

    #[test]
    fn title_is_deterministic() {
        let record = GameRecord {
            locator: GameLocator::parse("/mlb/2025-10-17/tor-sea").unwrap(),
            series: Series::ChampionshipSeries,
            league: Some(League::American),
            game_number: 5,
            synopsis: "Blue Jays 6, Mariners 2".to_string(),
        };
        assert_eq!(record.title(), "ALCS Game 5: 2025-10-17/tor-sea");
    }

    #[test]
    fn world_series_title_has_no_league_prefix() {
        let record = GameRecord {
            locator: GameLocator::parse("/mlb/2025-10-28/lad-tor").unwrap(),
            series: Series::WorldSeries,
            league: None,
            game_number: 3,
            synopsis: "Dodgers 8, Blue Jays 1".to_string(),
        };
        assert_eq!(record.title(), "WS Game 3: 2025-10-28/lad-tor");
    }
}
