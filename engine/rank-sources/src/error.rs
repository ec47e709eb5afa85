//! Error types for rank sources
//!
//! These never leave an adapter: every variant is logged and turned into an
//! empty document so the affected players come back unranked.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} returned status {status}")]
    Status { url: String, status: reqwest::StatusCode },

    #[error("embedded dataset not found in page from {url}")]
    MissingDataset { url: String },

    #[error("malformed dataset: {0}")]
    Json(#[from] serde_json::Error),
}

impl SourceError {
    pub(crate) fn from_request(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SourceError::Timeout { url: url.to_string() }
        } else {
            SourceError::Request { url: url.to_string(), source: err }
        }
    }
}

pub type SourceResult<T> = Result<T, SourceError>;
