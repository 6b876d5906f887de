//! `menu`: list the menu, and add or remove cart items by `?item=`.

use super::{cart_body, email_field, text_field, HandlerResult};
use crate::app::Services;
use crate::request::{ApiRequest, ApiResponse};

/// The full menu, for a caller with a valid token for `?email=`.
pub async fn get(services: &Services, req: &ApiRequest) -> HandlerResult {
    let email = email_field(req.query_value("email"))?;
    services.auth.require(req.session_token(), email).await?;
    Ok(ApiResponse::json(services.carts.menu()))
}

/// Add `?item=` to the cart of the body's `email`.
pub async fn post(services: &Services, req: &ApiRequest) -> HandlerResult {
    let email = email_field(req.payload_str("email"))?;
    let item = text_field(req.query_value("item"), "item")?;
    let items = services
        .carts
        .add_item(req.session_token(), email, item)
        .await?;
    Ok(cart_body(&items))
}

/// Remove `?item=` from the cart of the body's `email`.
pub async fn delete(services: &Services, req: &ApiRequest) -> HandlerResult {
    let email = email_field(req.payload_str("email"))?;
    let item = text_field(req.query_value("item"), "item")?;
    let items = services
        .carts
        .remove_item(req.session_token(), email, item)
        .await?;
    Ok(cart_body(&items))
}
