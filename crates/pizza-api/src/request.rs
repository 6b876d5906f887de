//! Transport-agnostic request and response types.

use http::{Method, StatusCode};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;

/// Header carrying the session token.
pub const TOKEN_HEADER: &str = "token";

/// A decoded request, independent of how it arrived.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Route path. Surrounding slashes are ignored.
    pub path: String,
    pub query: HashMap<String, String>,
    /// Header names are stored lowercase.
    pub headers: HashMap<String, String>,
    /// Parsed JSON body, `Null` when absent.
    pub payload: Value,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: HashMap::new(),
            headers: HashMap::new(),
            payload: Value::Null,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Add a query string parameter.
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add a header.
    pub fn header(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(key.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    /// Set the session token header.
    pub fn token(self, token: impl Into<String>) -> Self {
        self.header(TOKEN_HEADER, token)
    }

    /// Set the JSON body.
    pub fn payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }

    /// Path without surrounding slashes.
    pub fn route(&self) -> &str {
        self.path.trim_matches('/')
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&key.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn session_token(&self) -> Option<&str> {
        self.header_value(TOKEN_HEADER)
    }

    /// A string field of the JSON body.
    pub fn payload_str(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(Value::as_str)
    }
}

/// Status code plus JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    /// 200 with an empty object.
    pub fn ok() -> Self {
        Self::new(StatusCode::OK, json!({}))
    }

    /// 200 with `value` serialized as the body.
    pub fn json<T: Serialize>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(body) => Self::new(StatusCode::OK, body),
            Err(e) => Self::error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        }
    }

    /// `{"Error": message}` with `status`.
    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status, json!({ "Error": message.into() }))
    }

    pub fn not_found() -> Self {
        Self::error(StatusCode::NOT_FOUND, "route not found")
    }

    pub fn method_not_allowed() -> Self {
        Self::error(StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Message of an error body, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.body.get("Error").and_then(Value::as_str)
    }
}
