//! Game-page extraction: turn one fetched page into a normalized record.
//!
//! Two stages. First, a series/game-number scan over the raw markup;
//! pages without a match are plain regular-season games and produce the
//! `NotAGame` outcome, which is expected rather than an error. Second, a
//! tolerant structured parse of the body into a line-oriented model, a
//! boilerplate filter, and an explicit windowing rule that carves out
//! the synopsis around the series line.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

use crate::config::SITE_ORIGIN;
use crate::model::{GameLocator, GameRecord, League, Series};

/// Series code followed by a game number, e.g. `ALCS Game 5`.
static SERIES_GAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(ALWC|NLWC|ALDS|NLDS|ALCS|NLCS|WS|World Series)\s*Game\s*(\d+)").unwrap()
});

/// Link targets in markdown form, ignored by the boilerplate filter.
static LINK_TARGET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\]\([^)]*\)").unwrap());

/// Line fragments dropped as navigation/branding boilerplate (lowercase).
const LINE_DENYLIST: &[&str] = &[
    "all sports",
    "dark mode",
    "light mode",
    "plaintextsports.com",
    "twitter",
    "instagram",
    "twitch",
    "mobile app",
    "page loaded",
    "data loaded",
    "built by",
];

/// Link texts not worth preserving as markdown links (lowercase).
const LINK_DENYLIST: &[&str] = &[
    "dark mode",
    "light mode",
    "all sports",
    "twitter",
    "instagram",
    "twitch",
];

/// The synopsis window ends at this marker, inclusive.
const END_MARKER: &str = "Game Time";

/// Hard cap on lines captured from the series line onward.
const MAX_CAPTURED_LINES: usize = 15;

/// Team names sit just above the series line; recover up to this many
/// preceding lines.
const LOOKBACK_LINES: usize = 2;

/// Outcome of extracting one fetched page.
///
/// Callers treat `NotAGame` and `NoContent` identically: skip, count as
/// skipped, move on.
#[derive(Debug)]
pub enum Extracted {
    /// A recognizable game page with a non-empty synopsis.
    Game(Box<GameRecord>),
    /// No series/game-number pattern anywhere; a normal outcome for
    /// regular-season pages listed on the same schedule.
    NotAGame,
    /// The pattern matched but no usable body survived filtering.
    NoContent,
}

/// Extract a normalized game record from one fetched page.
pub fn extract_game(html: &str, locator: GameLocator) -> Extracted {
    let Some((series, league, game_number)) = detect_series(html) else {
        return Extracted::NotAGame;
    };

    let lines = page_lines(html);
    let window = synopsis_window(&lines);
    if window.is_empty() {
        return Extracted::NoContent;
    }

    Extracted::Game(Box::new(GameRecord {
        locator,
        series,
        league,
        game_number,
        synopsis: window.join("\n"),
    }))
}

/// Stage one: find the series code and game number in raw text.
///
/// League-prefixed codes resolve to a tier plus league; bare `WS` and
/// the literal phrase "World Series" carry no league. A zero game
/// number is rejected.
fn detect_series(text: &str) -> Option<(Series, Option<League>, u32)> {
    let caps = SERIES_GAME.captures(text)?;
    let code = caps[1].to_uppercase();
    let game_number: u32 = caps[2].parse().ok().filter(|&n| n >= 1)?;
    Some((Series::classify(&code), League::from_code(&code), game_number))
}

/// Stage two, part one: render the page body into trimmed, non-empty,
/// boilerplate-free lines.
fn page_lines(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let body = Selector::parse("body").unwrap();

    let mut text = String::new();
    if let Some(body) = document.select(&body).next() {
        render_element(body, &mut text);
    }

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_boilerplate_line(line))
        .map(str::to_string)
        .collect()
}

/// Walk an element, flattening it to text: `<br>` and block ends become
/// line breaks, links become markdown, script/style vanish.
fn render_element(element: ElementRef<'_>, out: &mut String) {
    match element.value().name() {
        "script" | "style" => return,
        "br" => {
            out.push('\n');
            return;
        }
        "a" => {
            render_link(element, out);
            return;
        }
        _ => {}
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    render_element(child, out);
                }
            }
            _ => {}
        }
    }

    match element.value().name() {
        "div" => out.push('\n'),
        "p" => out.push_str("\n\n"),
        _ => {}
    }
}

/// Render a hyperlink as `[text](absolute url)`, resolving root-relative
/// hrefs against the content origin. Boilerplate link text passes
/// through as plain text and is dropped by the line filter later.
fn render_link(element: ElementRef<'_>, out: &mut String) {
    let text = element.text().collect::<String>();
    let text = text.trim();
    if text.is_empty() {
        return;
    }

    let lower = text.to_lowercase();
    let boilerplate = LINK_DENYLIST.iter().any(|skip| lower.contains(skip));

    match element.value().attr("href") {
        Some(href) if !boilerplate => {
            if href.starts_with('/') {
                out.push_str(&format!("[{text}]({SITE_ORIGIN}{href})"));
            } else {
                out.push_str(&format!("[{text}]({href})"));
            }
        }
        _ => out.push_str(text),
    }
}

/// True when a line is navigation/branding boilerplate.
///
/// Link targets are stripped before the check so a converted site link
/// doesn't trip the branding filter on its own URL.
fn is_boilerplate_line(line: &str) -> bool {
    let visible = LINK_TARGET.replace_all(line, "]");
    let lower = visible.to_lowercase();
    LINE_DENYLIST.iter().any(|skip| lower.contains(skip))
}

/// Stage two, part two: the synopsis window.
///
/// Starts at the series line, backed up by at most [`LOOKBACK_LINES`]
/// to recover the team names listed just above it, and captures from
/// the series line until a line containing [`END_MARKER`] (inclusive)
/// or [`MAX_CAPTURED_LINES`] lines, whichever comes first. Empty when
/// no line matches the series pattern.
fn synopsis_window(lines: &[String]) -> Vec<String> {
    let Some(series_at) = lines.iter().position(|line| SERIES_GAME.is_match(line)) else {
        return Vec::new();
    };

    let mut window = Vec::new();

    let start = series_at.saturating_sub(LOOKBACK_LINES);
    for line in &lines[start..series_at] {
        window.push(line.clone());
    }

    let mut captured = 0;
    for line in &lines[series_at..] {
        window.push(line.clone());
        captured += 1;
        if line.contains(END_MARKER) || captured == MAX_CAPTURED_LINES {
            break;
        }
    }

    window
}
