//! `checkout`: pay for the cart of `?email=`.

use super::{email_field, HandlerResult};
use crate::app::Services;
use crate::request::{ApiRequest, ApiResponse};
use pizza_commerce::PaymentDetails;

/// Answers with the email provider's status and body on success. Card
/// fields are only judged after the token is verified.
pub async fn post(services: &Services, req: &ApiRequest) -> HandlerResult {
    let email = email_field(req.query_value("email"))?;
    let details = PaymentDetails::from_json(&req.payload);
    let outcome = services
        .checkout
        .checkout(req.session_token(), email, &details)
        .await?;
    Ok(ApiResponse::new(outcome.status, outcome.payload))
}
