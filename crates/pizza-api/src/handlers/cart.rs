//! `cart`: view the caller's cart.

use super::{cart_body, email_field, HandlerResult};
use crate::app::Services;
use crate::request::ApiRequest;

pub async fn get(services: &Services, req: &ApiRequest) -> HandlerResult {
    let email = email_field(req.query_value("email"))?;
    let items = services.carts.view(req.session_token(), email).await?;
    Ok(cart_body(&items))
}
