//! Run-scoped statistics.
//!
//! One accumulator per pipeline run, passed explicitly through each stage
//! rather than living in ambient shared state. Counts are observability
//! only; nothing throttles or branches on them.

/// Counters for one pipeline run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    /// Every outbound HTTP call, site and store alike.
    pub api_calls: u32,
    /// Candidate locators discovered on the schedule page.
    pub games_found: u32,
    /// Issues created this run.
    pub games_created: u32,
    /// Locators skipped: dedup hits, non-game pages, empty extractions.
    pub games_skipped: u32,
    /// Transport and remote-write failures.
    pub errors: u32,
}

impl RunStats {
    /// Log the end-of-run summary block.
    pub fn log_summary(&self) {
        let rule = "=".repeat(60);
        log::info!("{rule}");
        log::info!("Statistics summary");
        log::info!("{rule}");
        log::info!("Total API calls:        {}", self.api_calls);
        log::info!("Games found:            {}", self.games_found);
        log::info!("Games created:          {}", self.games_created);
        log::info!("Games skipped:          {}", self.games_skipped);
        log::info!("Errors:                 {}", self.errors);
        log::info!("{rule}");
    }
}
