//! Provider failure taxonomy.
//!
//! Every variant is an absence marker: the race coordinator keeps waiting on
//! the remaining providers and no variant ever reaches the HTTP caller.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Connection, TLS or body read failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// Upstream answered with a non-success status.
    #[error("unexpected status {0}")]
    Status(u16),

    /// Body was not the JSON shape the provider promises.
    #[error("decode error: {0}")]
    Decode(String),

    /// Upstream answered successfully but has no record for the key.
    #[error("no record for key")]
    NotFound,

    /// The provider task panicked or was aborted before reporting.
    #[error("provider task failed: {0}")]
    TaskFailed(String),
}

impl ProviderError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::Transport(_) => "transport",
            ProviderError::Status(_) => "status",
            ProviderError::Decode(_) => "decode",
            ProviderError::NotFound => "not_found",
            ProviderError::TaskFailed(_) => "task_failed",
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        ProviderError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(e: serde_json::Error) -> Self {
        ProviderError::Decode(e.to_string())
    }
}
