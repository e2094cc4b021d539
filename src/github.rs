//! Issue-tracker REST client.
//!
//! Thin blocking wrapper over the GitHub API: paginated issue listing,
//! issue creation, label CRUD, and the contents endpoint for the README.
//! Every operation returns a typed error; none retries. The caller
//! decides whether a failure is fatal or contained at the item level.

use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;

use crate::config::{API_ROOT, Repo};
use crate::stats::RunStats;

/// Page size for full scans of the issue list.
const PAGE_SIZE: u32 = 100;

/// Per-call timeout for store requests.
const API_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from the remote store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid credential: {0}")]
    Credential(#[from] reqwest::header::InvalidHeaderValue),

    #[error("{context}: unexpected status {status}")]
    Status {
        context: &'static str,
        status: StatusCode,
    },

    #[error("malformed file content: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("file content is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = core::result::Result<T, StoreError>;

/// An already-persisted issue, read-only from this side.
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub title: String,
    /// `open` or `closed`, as reported by the store.
    pub state: String,
    #[serde(default)]
    pub labels: Vec<Label>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Label {
    pub name: String,
}

/// A file read through the contents endpoint.
#[derive(Debug, Clone)]
pub struct RemoteFile {
    pub content: String,
    /// Revision identifier required for optimistic-concurrency updates.
    pub sha: String,
}

#[derive(Deserialize)]
struct FileResponse {
    content: String,
    sha: String,
}

/// Blocking client bound to one repository.
pub struct Client {
    http: reqwest::blocking::Client,
    base: String,
}

impl Client {
    pub fn new(token: &str, repo: &Repo) -> Result<Client> {
        let mut auth = HeaderValue::from_str(&format!("token {token}"))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("pennant/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(API_TIMEOUT)
            .build()?;

        Ok(Client {
            http,
            base: format!("{API_ROOT}/repos/{}/{}", repo.owner, repo.name),
        })
    }

    // ── Issues ──

    /// Full paginated scan of the issue list, open and closed alike.
    ///
    /// Terminates when a page comes back empty. A mid-scan failure is
    /// an error, not a partial result; dedup decisions must never run
    /// against a half-built snapshot.
    pub fn list_issues_all(&self, stats: &mut RunStats) -> Result<Vec<Issue>> {
        let mut issues = Vec::new();
        let mut page = 1;

        loop {
            stats.api_calls += 1;
            log::info!("API call #{}: fetching issues page {page}", stats.api_calls);

            let url = format!(
                "{}/issues?state=all&per_page={PAGE_SIZE}&page={page}",
                self.base
            );
            let response = self.http.get(&url).send()?;
            if !response.status().is_success() {
                return Err(StoreError::Status {
                    context: "listing issues",
                    status: response.status(),
                });
            }

            let batch: Vec<Issue> = response.json()?;
            if batch.is_empty() {
                break;
            }
            issues.extend(batch);
            page += 1;
        }

        Ok(issues)
    }

    /// Create one issue. Failures are returned, never retried.
    pub fn create_issue(
        &self,
        title: &str,
        body: &str,
        labels: &[String],
        stats: &mut RunStats,
    ) -> Result<()> {
        stats.api_calls += 1;
        log::info!("API call #{}: creating issue '{title}'", stats.api_calls);

        let payload = serde_json::json!({
            "title": title,
            "body": body,
            "labels": labels,
        });
        let response = self
            .http
            .post(format!("{}/issues", self.base))
            .json(&payload)
            .send()?;
        if !response.status().is_success() {
            return Err(StoreError::Status {
                context: "creating issue",
                status: response.status(),
            });
        }
        Ok(())
    }

    // ── Labels ──

    pub fn list_labels(&self) -> Result<Vec<Label>> {
        let url = format!("{}/labels?per_page={PAGE_SIZE}", self.base);
        let response = self.http.get(&url).send()?;
        if !response.status().is_success() {
            return Err(StoreError::Status {
                context: "listing labels",
                status: response.status(),
            });
        }
        Ok(response.json()?)
    }

    pub fn create_label(&self, name: &str, color: &str, description: &str) -> Result<()> {
        let payload = serde_json::json!({
            "name": name,
            "color": color,
            "description": description,
        });
        let response = self
            .http
            .post(format!("{}/labels", self.base))
            .json(&payload)
            .send()?;
        if !response.status().is_success() {
            return Err(StoreError::Status {
                context: "creating label",
                status: response.status(),
            });
        }
        Ok(())
    }

    pub fn update_label(&self, name: &str, color: &str, description: &str) -> Result<()> {
        let payload = serde_json::json!({
            "color": color,
            "description": description,
        });
        let response = self
            .http
            .patch(format!("{}/labels/{name}", self.base))
            .json(&payload)
            .send()?;
        if !response.status().is_success() {
            return Err(StoreError::Status {
                context: "updating label",
                status: response.status(),
            });
        }
        Ok(())
    }

    pub fn delete_label(&self, name: &str) -> Result<()> {
        let response = self
            .http
            .delete(format!("{}/labels/{name}", self.base))
            .send()?;
        if !response.status().is_success() {
            return Err(StoreError::Status {
                context: "deleting label",
                status: response.status(),
            });
        }
        Ok(())
    }

    // ── Contents ──

    /// Read a file and its revision identifier. `None` when the file
    /// doesn't exist yet.
    pub fn get_file(&self, path: &str, stats: &mut RunStats) -> Result<Option<RemoteFile>> {
        stats.api_calls += 1;
        log::info!("API call #{}: fetching {path}", stats.api_calls);

        let response = self
            .http
            .get(format!("{}/contents/{path}", self.base))
            .send()?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(StoreError::Status {
                context: "reading file",
                status: response.status(),
            });
        }

        let file: FileResponse = response.json()?;
        // The store wraps base64 at 60 columns; strip line breaks first.
        let encoded: String = file
            .content
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let content = String::from_utf8(BASE64.decode(encoded)?)?;
        Ok(Some(RemoteFile {
            content,
            sha: file.sha,
        }))
    }

    /// Write a file, passing the prior revision identifier when updating
    /// an existing one.
    pub fn put_file(
        &self,
        path: &str,
        content: &str,
        message: &str,
        sha: Option<&str>,
        stats: &mut RunStats,
    ) -> Result<()> {
        stats.api_calls += 1;
        log::info!("API call #{}: updating {path}", stats.api_calls);

        let mut payload = serde_json::json!({
            "message": message,
            "content": BASE64.encode(content),
            "branch": "main",
        });
        if let Some(sha) = sha {
            payload["sha"] = serde_json::Value::String(sha.to_string());
        }

        let response = self
            .http
            .put(format!("{}/contents/{path}", self.base))
            .json(&payload)
            .send()?;
        if !response.status().is_success() {
            return Err(StoreError::Status {
                context: "writing file",
                status: response.status(),
            });
        }
        Ok(())
    }
}
