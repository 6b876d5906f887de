//! Error classification shared by every service crate.

use serde::Serialize;
use std::fmt;

/// Coarse classification of a failure.
///
/// Each crate's error type maps onto one of these so the request layer can
/// pick a status code without knowing every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// Malformed or missing input.
    Validation,
    /// Missing, expired or mismatched token.
    Unauthorized,
    /// A referenced document does not exist.
    NotFound,
    /// Duplicate entity or lost concurrent update.
    Conflict,
    /// A payment or email provider failed or declined.
    ExternalFailure,
    /// The document store failed.
    Persistence,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::ExternalFailure => "external_failure",
            ErrorKind::Persistence => "persistence",
        }
    }

    /// Whether retrying the same request could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ErrorKind::Conflict | ErrorKind::ExternalFailure | ErrorKind::Persistence
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
