//! `users`: registration and profile management.

use super::{decode, email_field, HandlerResult};
use crate::app::Services;
use crate::request::{ApiRequest, ApiResponse};
use pizza_auth::{NewUser, UserUpdate};

/// Register a new user from the JSON body.
pub async fn post(services: &Services, req: &ApiRequest) -> HandlerResult {
    let new_user: NewUser = decode(&req.payload)?;
    services.accounts.register(new_user).await?;
    Ok(ApiResponse::ok())
}

/// Profile for `?email=`.
pub async fn get(services: &Services, req: &ApiRequest) -> HandlerResult {
    let email = email_field(req.query_value("email"))?;
    let profile = services
        .accounts
        .profile(req.session_token(), email)
        .await?;
    Ok(ApiResponse::json(&profile))
}

/// Update the profile named by the body's `email`.
pub async fn put(services: &Services, req: &ApiRequest) -> HandlerResult {
    let email = email_field(req.payload_str("email"))?;
    let update: UserUpdate = decode(&req.payload)?;
    let profile = services
        .accounts
        .update(req.session_token(), email, update)
        .await?;
    Ok(ApiResponse::json(&profile))
}

/// Delete the account for `?email=`.
pub async fn delete(services: &Services, req: &ApiRequest) -> HandlerResult {
    let email = email_field(req.query_value("email"))?;
    services.accounts.delete(req.session_token(), email).await?;
    Ok(ApiResponse::ok())
}
