//! Route handlers.
//!
//! Each handler takes the shared [`Services`] and a decoded request and
//! returns either a response or an [`ApiError`] for the router to map.

pub mod cart;
pub mod checkout;
pub mod menu;
pub mod tokens;
pub mod users;

use crate::error::ApiError;
use crate::request::ApiResponse;
use pizza_commerce::MenuItem;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

pub(crate) type HandlerResult = Result<ApiResponse, ApiError>;

/// Trimmed `value` when it looks like an email address.
pub(crate) fn email_field<'a>(value: Option<&'a str>) -> Result<&'a str, ApiError> {
    value
        .map(str::trim)
        .filter(|v| v.contains('@'))
        .ok_or_else(|| ApiError::missing(&["email"]))
}

/// Trimmed non-empty `value`, or a missing-field error naming `field`.
pub(crate) fn text_field<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, ApiError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::missing(&[field]))
}

/// Decode the JSON body. An absent body decodes as the type's default.
pub(crate) fn decode<T: DeserializeOwned + Default>(payload: &Value) -> Result<T, ApiError> {
    if payload.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(payload.clone())
        .map_err(|e| ApiError::BadRequest(format!("malformed payload: {e}")))
}

pub(crate) fn cart_body(items: &[MenuItem]) -> ApiResponse {
    ApiResponse::json(&json!({ "Cart": items }))
}
