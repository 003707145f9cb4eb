//! Outbound relay errors.

use std::time::Duration;

use thiserror::Error;

/// Failure of an outbound relay call. Every variant maps to a 500 response.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("request to downstream timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("failed to connect to downstream: {0}")]
    Connect(#[source] reqwest::Error),

    #[error("downstream request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("downstream returned invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl RelayError {
    /// Classify a reqwest failure raised while sending or reading.
    pub fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            RelayError::Timeout(timeout)
        } else if err.is_connect() {
            RelayError::Connect(err)
        } else {
            RelayError::Request(err)
        }
    }

    /// Short label used for metrics and span status.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::ClientBuild(_) => "client_build",
            RelayError::Timeout(_) => "timeout",
            RelayError::Connect(_) => "connect",
            RelayError::Request(_) => "request",
            RelayError::InvalidJson(_) => "invalid_json",
        }
    }
}
