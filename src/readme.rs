//! League-table templating for the repository README.
//!
//! Renders the scoreboard into a markdown table and writes it through
//! the contents endpoint, carrying the current revision identifier for
//! optimistic concurrency. Creates the file when it doesn't exist yet.

use jiff::Timestamp;

use crate::github::{Client, Result};
use crate::model::{League, Series};
use crate::score::Scoreboard;
use crate::stats::RunStats;

const README_PATH: &str = "README.md";
const COMMIT_MESSAGE: &str = "Update playoff scores and league table";

/// Render the full README, league table included.
pub fn league_table(board: &Scoreboard) -> String {
    let updated = Timestamp::now().strftime("%Y-%m-%d %H:%M:%S UTC");

    let mut out = String::new();
    out.push_str("# World Series Bracket Tracker\n\n");
    out.push_str(
        "Track postseason baseball games as repository issues, following the Wild Card format.\n\n",
    );

    out.push_str("## How It Works\n\n");
    out.push_str("- **Issues = Games**: each game is one issue\n");
    out.push_str("- **Labels = Metadata**: series round, league, and player assignments\n");
    out.push_str("- **Scoring**: players earn points by assigning their label to winning games\n\n");

    out.push_str("## Scoring System\n\n");
    out.push_str("| Series Round | Points per Win | Label |\n");
    out.push_str("|--------------|----------------|-------|\n");
    for series in Series::ALL {
        out.push_str(&format!(
            "| {series} | {} | `{}` |\n",
            series.points(),
            series.label()
        ));
    }
    out.push('\n');

    out.push_str("## League Table\n\n");
    out.push_str(&format!("**Last Updated**: {updated}\n\n"));
    out.push_str("| Rank | Player | Total Points | WC | DS | CS | WS | Games |\n");
    out.push_str("|------|--------|--------------|----|----|----|----|-------|\n");

    if board.is_empty() {
        out.push_str("| - | *No games scored yet* | 0 | 0 | 0 | 0 | 0 | 0 |\n");
    } else {
        for (rank, (player, totals)) in board.ranked().iter().enumerate() {
            out.push_str(&format!(
                "| {} | **{player}** | **{}** | {} | {} | {} | {} | {} |\n",
                rank + 1,
                totals.total,
                totals.tier(Series::WildCard),
                totals.tier(Series::DivisionSeries),
                totals.tier(Series::ChampionshipSeries),
                totals.tier(Series::WorldSeries),
                totals.games,
            ));
        }
    }
    out.push('\n');

    out.push_str("## Labels\n\n");
    out.push_str("### Series Rounds\n\n");
    for series in Series::ALL {
        out.push_str(&format!("- `{}` - {}\n", series.label(), series.description()));
    }
    out.push_str("\n### Leagues\n\n");
    for league in League::ALL {
        out.push_str(&format!("- `{}` - {}\n", league.label(), league.description()));
    }
    out.push('\n');

    out.push_str("## Game Issue Format\n\n");
    out.push_str("**Title**: `ALCS Game 5: 2025-10-17/tor-sea`\n\n");
    out.push_str(
        "**Body**: the game URL plus a fenced plain-text synopsis scraped from the source page.\n",
    );

    out
}

/// Publish the rendered league table to the repository.
pub fn publish(client: &Client, board: &Scoreboard, stats: &mut RunStats) -> Result<()> {
    let content = league_table(board);
    let existing = client.get_file(README_PATH, stats)?;
    let sha = existing.as_ref().map(|file| file.sha.as_str());
    client.put_file(README_PATH, &content, COMMIT_MESSAGE, sha, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::github::{Issue, Label};

    fn closed_issue(labels: &[&str]) -> Issue {
        Issue {
            title: "game".to_string(),
            state: "closed".to_string(),
            labels: labels
                .iter()
                .map(|name| Label {
                    name: (*name).to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn empty_board_renders_placeholder_row() {
        let board = Scoreboard::aggregate(&[]);
        let readme = league_table(&board);
        assert!(readme.contains("*No games scored yet*"));
    }

    #[test]
    fn ranked_rows_render_totals_and_tiers() {
        let issues = vec![
            closed_issue(&["series:ds", "player:jack"]),
            closed_issue(&["series:ws", "player:jack", "player:marjorie"]),
        ];
        let board = Scoreboard::aggregate(&issues);
        let readme = league_table(&board);

        assert!(readme.contains("| 1 | **jack** | **6** | 0 | 2 | 0 | 4 | 2 |"));
        assert!(readme.contains("| 2 | **marjorie** | **4** | 0 | 0 | 0 | 4 | 1 |"));
    }

    #[test]
    fn scoring_table_lists_every_tier() {
        let readme = league_table(&Scoreboard::aggregate(&[]));
        for series in Series::ALL {
            assert!(readme.contains(series.label()));
        }
    }
}
