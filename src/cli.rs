//! CLI interface for Pennant.
//!
//! Three entry points, all requiring `GITHUB_TOKEN`:
//!
//! - `pennant sync` — the discovery → extraction → dedup → create pipeline.
//! - `pennant score` — aggregate totals and publish the league table.
//! - `pennant labels setup|players` — provision the label taxonomy.

use clap::{Parser, Subcommand};

/// Pennant — postseason bracket tracking through repository issues.
#[derive(Debug, Parser)]
#[command(name = "pennant")]
pub struct Cli {
    /// Target repository as `owner/name`. Falls back to `PENNANT_REPO`,
    /// then `~/.pennant/config.toml`, then the built-in default.
    #[arg(long, global = true)]
    pub repo: Option<String>,

    /// Log at debug level.
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Discover postseason games and create one issue per missing game.
    ///
    /// Safe to re-run: existing issues are indexed up front and
    /// already-synchronized games are skipped.
    Sync {
        /// Season to process. Defaults to the current year.
        #[arg(long)]
        year: Option<i16>,
    },

    /// Recompute participant scores from closed games and publish the
    /// league table to the README.
    Score,

    /// Manage the label taxonomy.
    Labels {
        #[command(subcommand)]
        command: LabelsCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum LabelsCommand {
    /// Create or update the series and league labels.
    Setup,

    /// Delete all player labels and recreate one per participant.
    Players {
        /// Participant names. Defaults to the built-in list.
        names: Vec<String>,
    },
}
