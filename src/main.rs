mod cli;
mod config;
mod extract;
mod fetch;
mod github;
mod index;
mod labels;
mod model;
mod readme;
mod schedule;
mod score;
mod stats;
mod sync;

use std::process;

use clap::Parser;

use cli::{Cli, Command, LabelsCommand};

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    // Fatal preconditions, checked before any network activity.
    let token = match config::require_token() {
        Ok(token) => token,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    let repo = match config::resolve_repo(cli.repo.as_deref()) {
        Ok(repo) => repo,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Sync { year } => sync::run(&token, &repo, year),
        Command::Score => score::run(&token, &repo),
        Command::Labels { command } => match command {
            LabelsCommand::Setup => labels::setup(&token, &repo),
            LabelsCommand::Players { names } => {
                let names = if names.is_empty() {
                    labels::DEFAULT_PLAYERS
                        .iter()
                        .map(|s| (*s).to_string())
                        .collect()
                } else {
                    names
                };
                labels::players(&token, &repo, &names)
            }
        },
    };

    if let Err(e) = result {
        log::error!("{e}");
        process::exit(1);
    }
}
