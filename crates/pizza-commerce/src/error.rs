//! Cart and checkout error types.

use http::StatusCode;
use pizza_store::{ErrorKind, StoreError};
use thiserror::Error;

/// Errors from cart operations.
#[derive(Error, Debug)]
pub enum CartError {
    /// Token missing, expired or bound to another email.
    #[error("missing or invalid token")]
    Unauthorized,

    /// Item is not on the menu.
    #[error("item not on the menu: {0}")]
    ItemNotFound(String),

    /// Item is already in the cart.
    #[error("item already in cart: {0}")]
    DuplicateItem(String),

    /// No cart exists for this token.
    #[error("cart not found")]
    CartNotFound,

    /// Item is not in the cart.
    #[error("item not in cart: {0}")]
    ItemNotInCart(String),

    /// The cart changed between read and write.
    #[error("cart was modified concurrently: {0}")]
    Conflict(String),

    /// Document store error.
    #[error("store error: {0}")]
    Store(StoreError),
}

impl CartError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CartError::Unauthorized => ErrorKind::Unauthorized,
            CartError::ItemNotFound(_) | CartError::CartNotFound | CartError::ItemNotInCart(_) => {
                ErrorKind::NotFound
            }
            CartError::DuplicateItem(_) | CartError::Conflict(_) => ErrorKind::Conflict,
            CartError::Store(e) => e.kind(),
        }
    }
}

impl From<StoreError> for CartError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::VersionConflict { .. } | StoreError::AlreadyExists { .. } => {
                CartError::Conflict(e.to_string())
            }
            other => CartError::Store(other),
        }
    }
}

/// Terminal failures of a checkout attempt.
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// Token missing, expired or bound to another email.
    #[error("missing or invalid token")]
    Unauthorized,

    /// One or more payment fields are missing or invalid.
    #[error("missing or invalid fields: {}", fields.join(", "))]
    ValidationFailed { fields: Vec<String> },

    /// No readable cart for this token.
    #[error("could not read cart items")]
    CartNotFound,

    /// Cart has no items.
    #[error("cart is empty")]
    EmptyCart,

    /// The gateway declined or could not be reached. The cart is untouched.
    #[error("payment declined: {message}")]
    PaymentDeclined {
        status: Option<StatusCode>,
        message: String,
    },

    /// Payment was captured but the receipt could not be sent. The cart is
    /// left as it was.
    #[error("payment captured but receipt email failed: {message}")]
    EmailFailed {
        status: Option<StatusCode>,
        message: String,
    },

    /// Payment and receipt succeeded but the cart could not be cleared.
    #[error("order completed but cart could not be cleared: {0}")]
    ClearFailed(String),

    /// Internal state machine misuse.
    #[error("invalid checkout transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}

impl CheckoutError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CheckoutError::Unauthorized => ErrorKind::Unauthorized,
            CheckoutError::ValidationFailed { .. } | CheckoutError::EmptyCart => {
                ErrorKind::Validation
            }
            CheckoutError::CartNotFound => ErrorKind::NotFound,
            CheckoutError::PaymentDeclined { .. } | CheckoutError::EmailFailed { .. } => {
                ErrorKind::ExternalFailure
            }
            CheckoutError::ClearFailed(_) | CheckoutError::InvalidTransition { .. } => {
                ErrorKind::Persistence
            }
        }
    }

    /// Status code reported by the provider, when one answered.
    pub fn provider_status(&self) -> Option<StatusCode> {
        match self {
            CheckoutError::PaymentDeclined { status, .. }
            | CheckoutError::EmailFailed { status, .. } => *status,
            _ => None,
        }
    }

    pub(crate) fn invalid(fields: &[&str]) -> Self {
        CheckoutError::ValidationFailed {
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }
}
