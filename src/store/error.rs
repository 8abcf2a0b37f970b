//! Remote store error types.

use thiserror::Error;

/// Errors from a single call against the remote record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Network unreachable, DNS, timeout, connection reset
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered with a non-2xx status
    #[error("Server returned status {0}")]
    Status(reqwest::StatusCode),

    /// The store answered successfully with an empty or null payload
    #[error("Record not found")]
    NotFound,

    /// The payload was not the JSON we expected
    #[error("Malformed response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound)
    }

    /// Short label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::Transport(_) => "transport",
            StoreError::Status(_) => "status",
            StoreError::NotFound => "not_found",
            StoreError::Parse(_) => "parse",
        }
    }
}
