//! Runtime configuration for Pennant.
//!
//! The bearer credential comes only from the `GITHUB_TOKEN` environment
//! variable, and its absence is a fatal precondition checked before any
//! network activity. The target repository is resolved through a chain:
//!
//! 1. `--repo owner/name` — explicit per-command override
//! 2. `PENNANT_REPO` env var — process/session level
//! 3. `~/.pennant/config.toml` — global default
//! 4. the built-in default repository

use std::{env, fmt, fs};

use serde::Deserialize;

/// Origin of the scraped schedule and game pages.
pub const SITE_ORIGIN: &str = "https://plaintextsports.com";

/// Root of the issue-tracker REST API.
pub const API_ROOT: &str = "https://api.github.com";

/// Repository used when no other source yields one.
pub const DEFAULT_REPO: &str = "oraweb/world-series-bracket";

/// An `owner/name` repository slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repo {
    pub owner: String,
    pub name: String,
}

impl Repo {
    /// Parse an `owner/name` slug.
    pub fn parse(slug: &str) -> Result<Repo, String> {
        match slug.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(Repo {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(format!("invalid repository slug `{slug}`: expected owner/name")),
        }
    }
}

impl fmt::Display for Repo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Read the bearer credential from `GITHUB_TOKEN`.
///
/// Checked before any network activity; a missing or empty value is
/// fatal for every entry point.
pub fn require_token() -> Result<String, String> {
    match env::var("GITHUB_TOKEN") {
        Ok(token) if !token.is_empty() => Ok(token),
        _ => Err("GITHUB_TOKEN environment variable not set".to_string()),
    }
}

/// Resolve the target repository from the tiered resolution chain.
pub fn resolve_repo(explicit: Option<&str>) -> Result<Repo, String> {
    // 1. Explicit --repo flag.
    if let Some(slug) = explicit {
        return Repo::parse(slug);
    }

    // 2. PENNANT_REPO environment variable.
    if let Ok(slug) = env::var("PENNANT_REPO")
        && !slug.is_empty()
    {
        return Repo::parse(&slug);
    }

    // 3. ~/.pennant/config.toml.
    if let Some(slug) = read_config_repo()? {
        return Repo::parse(&slug);
    }

    // 4. Built-in default.
    Repo::parse(DEFAULT_REPO)
}

#[derive(Deserialize)]
struct Config {
    repo: Option<String>,
}

/// Read the `repo` field from `~/.pennant/config.toml`, if it exists.
fn read_config_repo() -> Result<Option<String>, String> {
    let Some(home) = dirs::home_dir() else {
        return Ok(None);
    };

    let path = home.join(".pennant").join("config.toml");

    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(_) => return Ok(None),
    };

    let config: Config = toml::from_str(&contents)
        .map_err(|e| format!("invalid config at {}: {e}", path.display()))?;

    Ok(config.repo.filter(|r| !r.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_slug() {
        let repo = Repo::parse("oraweb/world-series-bracket").unwrap();
        assert_eq!(repo.owner, "oraweb");
        assert_eq!(repo.name, "world-series-bracket");
        assert_eq!(repo.to_string(), "oraweb/world-series-bracket");
    }

    #[test]
    fn reject_malformed_slugs() {
        assert!(Repo::parse("").is_err());
        assert!(Repo::parse("no-slash").is_err());
        assert!(Repo::parse("/name").is_err());
        assert!(Repo::parse("owner/").is_err());
        assert!(Repo::parse("a/b/c").is_err());
    }

    #[test]
    fn default_repo_parses() {
        assert!(Repo::parse(DEFAULT_REPO).is_ok());
    }
}
