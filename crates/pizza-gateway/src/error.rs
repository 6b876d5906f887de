//! Provider client errors.

use std::time::Duration;
use thiserror::Error;

/// Failure to obtain any response from a provider.
///
/// A provider that answers with a non-success status is *not* an error at
/// this level; see [`ProviderResponse::is_success`](crate::ProviderResponse::is_success).
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    #[error("provider call timed out after {0:?}")]
    Timeout(Duration),

    #[error("connection error: {0}")]
    Transport(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("could not decode provider response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Classify a `reqwest` failure. `timeout` is the limit that was in force.
    pub fn from_reqwest(e: reqwest::Error, timeout: Duration) -> Self {
        if e.is_timeout() {
            ClientError::Timeout(timeout)
        } else if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else if e.is_builder() {
            ClientError::InvalidRequest(e.to_string())
        } else {
            ClientError::Transport(e.to_string())
        }
    }
}
