//! Authentication errors.

use pizza_store::{ErrorKind, StoreError};
use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Required input missing or malformed.
    #[error("{0}")]
    InvalidRequest(String),

    /// Password does not match the stored hash.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// User not found.
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// User already exists.
    #[error("a user with that email address already exists: {0}")]
    UserAlreadyExists(String),

    /// Token does not exist.
    #[error("token not found")]
    TokenNotFound,

    /// Token has expired and can no longer be extended.
    #[error("the token has already expired")]
    TokenExpired,

    /// Missing token, or token not valid for the asserted email.
    #[error("missing or invalid token")]
    Unauthorized,

    /// Document store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidRequest(_) => ErrorKind::Validation,
            AuthError::InvalidCredentials | AuthError::TokenExpired | AuthError::Unauthorized => {
                ErrorKind::Unauthorized
            }
            AuthError::UserNotFound(_) | AuthError::TokenNotFound => ErrorKind::NotFound,
            AuthError::UserAlreadyExists(_) => ErrorKind::Conflict,
            AuthError::Store(e) => e.kind(),
            AuthError::Internal(_) => ErrorKind::Persistence,
        }
    }

    /// Check if this is an authentication failure.
    pub fn is_auth_failure(&self) -> bool {
        self.kind() == ErrorKind::Unauthorized
    }

    pub(crate) fn missing_fields(fields: &[&str]) -> Self {
        AuthError::InvalidRequest(format!("missing or invalid fields: {}", fields.join(", ")))
    }
}
