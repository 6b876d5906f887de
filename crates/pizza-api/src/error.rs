//! Mapping from service errors to response status codes.

use crate::request::ApiResponse;
use http::StatusCode;
use pizza_auth::AuthError;
use pizza_commerce::{CartError, CheckoutError};
use pizza_store::{ErrorKind, StoreError};
use thiserror::Error;

/// Any failure a handler can return.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request is missing fields or carries malformed ones.
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Report the named fields as missing or invalid.
    pub fn missing(fields: &[&str]) -> Self {
        ApiError::BadRequest(format!("missing or invalid fields: {}", fields.join(", ")))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::BadRequest(_) => ErrorKind::Validation,
            ApiError::Auth(e) => e.kind(),
            ApiError::Cart(e) => e.kind(),
            ApiError::Checkout(e) => e.kind(),
            ApiError::Store(e) => e.kind(),
        }
    }

    pub fn status(&self) -> StatusCode {
        let provider = match self {
            ApiError::Checkout(e) => e.provider_status(),
            _ => None,
        };
        status_for(self.kind(), provider)
    }
}

/// Status code for an error category. External failures surface the
/// provider's own status when it answered.
pub fn status_for(kind: ErrorKind, provider: Option<StatusCode>) -> StatusCode {
    match kind {
        ErrorKind::Validation | ErrorKind::Conflict => StatusCode::BAD_REQUEST,
        ErrorKind::Unauthorized => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::ExternalFailure => provider.unwrap_or(StatusCode::BAD_GATEWAY),
        ErrorKind::Persistence => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<ApiError> for ApiResponse {
    fn from(e: ApiError) -> Self {
        let status = e.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %e, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %e, "request rejected");
        }
        ApiResponse::error(status, e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::missing(&["email"]).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(AuthError::Unauthorized).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::from(CartError::DuplicateItem("veggie".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(AuthError::TokenNotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(CheckoutError::ClearFailed("io".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_provider_status_passes_through() {
        let declined = CheckoutError::PaymentDeclined {
            status: Some(StatusCode::PAYMENT_REQUIRED),
            message: "card declined".into(),
        };
        assert_eq!(
            ApiError::from(declined).status(),
            StatusCode::PAYMENT_REQUIRED
        );

        let unreachable = CheckoutError::EmailFailed {
            status: None,
            message: "timed out".into(),
        };
        assert_eq!(ApiError::from(unreachable).status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_error_response_body() {
        let res = ApiResponse::from(ApiError::missing(&["email", "item"]));
        assert_eq!(
            res.error_message(),
            Some("missing or invalid fields: email, item")
        );
    }
}
