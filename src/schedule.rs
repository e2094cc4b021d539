//! Schedule enumeration: discover candidate postseason game locators.
//!
//! One schedule page per season lists every game of the year. The scan
//! keeps only locators dated in the postseason month, deduplicated by
//! exact path in first-seen order. A failed fetch yields an empty set;
//! the fetcher has already logged and counted the failure.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::SITE_ORIGIN;
use crate::fetch::Fetcher;
use crate::model::GameLocator;
use crate::stats::RunStats;

/// Game hrefs embedded in the schedule page.
static GAME_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"href="(/mlb/\d{4}-\d{2}-\d{2}/[^"]+)""#).unwrap());

/// The playoffs run in October.
const POSTSEASON_MONTH: &str = "10";

/// Fetch the season's schedule page and return its postseason locators.
pub fn postseason_locators(
    fetcher: &Fetcher,
    year: i16,
    stats: &mut RunStats,
) -> Vec<GameLocator> {
    log::info!("Fetching schedule for year {year}");
    let url = format!("{SITE_ORIGIN}/mlb/{year}/schedule");

    let Ok(html) = fetcher.get(&url, stats) else {
        return Vec::new();
    };

    let locators = scan_schedule(&html);
    log::info!(
        "Found {} potential playoff game link(s) from schedule",
        locators.len()
    );
    stats.games_found = u32::try_from(locators.len()).unwrap_or(u32::MAX);
    locators
}

/// Scan raw schedule markup for postseason game locators.
///
/// Order is first-seen; it only affects log readability, not correctness.
fn scan_schedule(html: &str) -> Vec<GameLocator> {
    let mut seen = HashSet::new();
    let mut locators = Vec::new();

    for caps in GAME_HREF.captures_iter(html) {
        let path = &caps[1];
        let Some(locator) = GameLocator::parse(path) else {
            continue;
        };
        if locator.month() != POSTSEASON_MONTH {
            continue;
        }
        if seen.insert(locator.path().to_string()) {
            locators.push(locator);
        }
    }

    locators
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_october_games() {
        let html = r#"
            <a href="/mlb/2025-09-28/nyy-bos">Sep 28</a>
            <a href="/mlb/2025-10-01/tor-sea">Oct 1</a>
            <a href="/mlb/2025-10-02/lad-phi">Oct 2</a>
            <a href="/mlb/2025-11-01/tor-lad">Nov 1</a>
        "#;
        let locators = scan_schedule(html);
        let paths: Vec<&str> = locators.iter().map(GameLocator::path).collect();
        assert_eq!(paths, ["/mlb/2025-10-01/tor-sea", "/mlb/2025-10-02/lad-phi"]);
    }

    #[test]
    fn dedups_preserving_first_seen_order() {
        let html = r#"
            <a href="/mlb/2025-10-02/lad-phi">game</a>
            <a href="/mlb/2025-10-01/tor-sea">game</a>
            <a href="/mlb/2025-10-02/lad-phi">game again</a>
        "#;
        let locators = scan_schedule(html);
        let paths: Vec<&str> = locators.iter().map(GameLocator::path).collect();
        assert_eq!(paths, ["/mlb/2025-10-02/lad-phi", "/mlb/2025-10-01/tor-sea"]);
    }

    #[test]
    fn ignores_non_game_hrefs() {
        let html = r#"
            <a href="/mlb/2025/schedule">schedule</a>
            <a href="/nba/2025-10-01/lal-bos">wrong sport</a>
            <a href="/mlb/2025-10-01/tor-sea/boxscore">too deep</a>
        "#;
        assert!(scan_schedule(html).is_empty());
    }

    #[test]
    fn empty_page_yields_no_locators() {
        assert!(scan_schedule("").is_empty());
    }
}
