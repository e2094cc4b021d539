//! Content fetching for the scraped site.
//!
//! Every transport failure — connection, timeout, non-2xx — is returned
//! as a typed error and counted; callers treat it as "no data" and never
//! see a panic from this boundary. There is no throttling or retry; a
//! hardened version should add bounded backoff for 5xx and timeouts.

use std::time::Duration;

use crate::stats::RunStats;

/// Per-call timeout for site fetches.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors crossing the fetch boundary.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
}

pub type Result<T> = core::result::Result<T, FetchError>;

/// Blocking HTTP fetcher for the scraped site.
pub struct Fetcher {
    http: reqwest::blocking::Client,
}

impl Fetcher {
    pub fn new() -> core::result::Result<Fetcher, reqwest::Error> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("pennant/", env!("CARGO_PKG_VERSION")))
            .timeout(FETCH_TIMEOUT)
            .build()?;
        Ok(Fetcher { http })
    }

    /// Fetch a URL's raw text.
    ///
    /// Counts the call, and on failure counts the error and logs it
    /// before handing the typed failure back to the caller.
    pub fn get(&self, url: &str, stats: &mut RunStats) -> Result<String> {
        stats.api_calls += 1;
        log::info!("API call #{}: {url}", stats.api_calls);

        match self.try_get(url) {
            Ok(text) => Ok(text),
            Err(e) => {
                stats.errors += 1;
                log::error!("Error fetching {url}: {e}");
                Err(e)
            }
        }
    }

    fn try_get(&self, url: &str) -> Result<String> {
        let response = self.http.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        Ok(response.text()?)
    }
}
