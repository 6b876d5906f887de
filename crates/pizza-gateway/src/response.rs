//! Raw provider responses.

use crate::ClientError;
use http::StatusCode;
use serde_json::Value;
use std::time::Duration;

/// Status and decoded body of a provider reply.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ProviderResponse {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    /// Build from a raw body, keeping non-JSON text as a string value.
    pub fn from_text(status: StatusCode, text: &str) -> Self {
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
        };
        Self { status, body }
    }

    /// Only 200 and 201 count as success.
    pub fn is_success(&self) -> bool {
        matches!(self.status, StatusCode::OK | StatusCode::CREATED)
    }

    /// Human-readable message from the provider, if it sent one.
    pub fn message(&self) -> String {
        let from = |v: &Value| v.as_str().map(str::to_string);
        self.body
            .pointer("/error/message")
            .and_then(from)
            .or_else(|| self.body.get("message").and_then(from))
            .or_else(|| from(&self.body))
            .unwrap_or_else(|| {
                self.status
                    .canonical_reason()
                    .unwrap_or("provider error")
                    .to_string()
            })
    }
}

/// Send a prepared request and capture whatever the provider answers.
pub(crate) async fn send(
    request: reqwest::RequestBuilder,
    timeout: Duration,
) -> Result<ProviderResponse, ClientError> {
    let response = request
        .send()
        .await
        .map_err(|e| ClientError::from_reqwest(e, timeout))?;
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ClientError::from_reqwest(e, timeout))?;
    Ok(ProviderResponse::from_text(status, &text))
}
