//! `tokens`: log in, inspect, extend and log out.

use super::{email_field, text_field, HandlerResult};
use crate::app::Services;
use crate::error::ApiError;
use crate::request::{ApiRequest, ApiResponse};
use serde_json::Value;

pub async fn post(services: &Services, req: &ApiRequest) -> HandlerResult {
    let email = email_field(req.payload_str("email"));
    let password = text_field(req.payload_str("password"), "password");
    let (email, password) = match (email, password) {
        (Ok(e), Ok(p)) => (e, p),
        (Err(_), Err(_)) => return Err(ApiError::missing(&["email", "password"])),
        (Err(e), _) | (_, Err(e)) => return Err(e),
    };
    let token = services.auth.issue(email, password).await?;
    Ok(ApiResponse::json(&token))
}

pub async fn get(services: &Services, req: &ApiRequest) -> HandlerResult {
    let id = text_field(req.query_value("id"), "id")?;
    let token = services.auth.lookup(id).await?;
    Ok(ApiResponse::json(&token))
}

pub async fn put(services: &Services, req: &ApiRequest) -> HandlerResult {
    let id = text_field(req.payload_str("id"), "id")?;
    let extend = req
        .payload
        .get("extend")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let token = services.auth.extend(id, extend).await?;
    Ok(ApiResponse::json(&token))
}

pub async fn delete(services: &Services, req: &ApiRequest) -> HandlerResult {
    let id = text_field(req.query_value("id"), "id")?;
    services.auth.revoke(id).await?;
    Ok(ApiResponse::ok())
}
