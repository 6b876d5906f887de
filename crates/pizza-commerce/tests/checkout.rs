//! End-to-end checkout against scripted providers.

mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use common::{card, harness, Harness, EMAIL};
use http::StatusCode;
use pizza_commerce::{
    Cart, CheckoutConfig, CheckoutError, CheckoutOrchestrator, CheckoutStep, Money,
};
use pizza_gateway::mock::{MockEmailClient, MockPaymentGateway};
use pizza_gateway::{ClientError, EmailClient, EmailMessage, ProviderResponse};
use pizza_store::{Collection, Documents};

fn config() -> CheckoutConfig {
    CheckoutConfig {
        accepted_years: (2024..=2034).into(),
        ..CheckoutConfig::default()
    }
}

fn orchestrator(
    h: &Harness,
    payments: Arc<MockPaymentGateway>,
    email: Arc<dyn EmailClient>,
    config: CheckoutConfig,
) -> CheckoutOrchestrator {
    CheckoutOrchestrator::new(h.docs.clone(), h.auth.clone(), payments, email, config)
}

async fn fill_cart(h: &Harness, items: &[&str]) {
    for item in items {
        h.carts.add_item(Some(&h.token), EMAIL, item).await.unwrap();
    }
}

async fn cart_len(h: &Harness) -> usize {
    h.docs
        .get::<Cart>(Collection::Carts, &h.token)
        .await
        .unwrap()
        .value
        .item_count()
}

#[tokio::test]
async fn test_checkout_charges_emails_and_clears() {
    let h = harness().await;
    fill_cart(&h, &["margherita", "pepperoni"]).await;
    let payments = Arc::new(MockPaymentGateway::approving());
    let email = Arc::new(MockEmailClient::accepting());
    let checkout = orchestrator(&h, payments.clone(), email.clone(), config());

    let outcome = checkout
        .checkout(Some(&h.token), EMAIL, &card())
        .await
        .unwrap();

    assert_eq!(outcome.status, StatusCode::OK);
    assert_eq!(outcome.payload["message"], "Queued. Thank you.");
    assert_eq!(outcome.receipt.amount, Money::usd(100));
    assert_eq!(outcome.receipt.payment_method, "Visa");
    assert_eq!(outcome.steps.len(), 5);
    assert_eq!(outcome.steps.last(), Some(&CheckoutStep::CartCleared));

    let charges = payments.calls();
    assert_eq!(charges.len(), 1);
    assert_eq!(charges[0].amount_cents, 100);
    assert_eq!(charges[0].card_number, "4242424242424242");

    let sent = email.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, EMAIL);
    assert_eq!(sent[0].subject, "Pizza order receipt");
    assert!(sent[0].body.starts_with("Order Status: succeeded\nPayment Method: Visa\n"));
    assert!(sent[0].body.ends_with("Total Amount: $1.00"));

    assert_eq!(cart_len(&h).await, 0);
}

#[tokio::test]
async fn test_empty_cart_never_charges() {
    let h = harness().await;
    fill_cart(&h, &["veggie"]).await;
    h.carts
        .remove_item(Some(&h.token), EMAIL, "veggie")
        .await
        .unwrap();
    let payments = Arc::new(MockPaymentGateway::approving());
    let checkout = orchestrator(
        &h,
        payments.clone(),
        Arc::new(MockEmailClient::accepting()),
        config(),
    );

    let err = checkout
        .checkout(Some(&h.token), EMAIL, &card())
        .await
        .unwrap_err();
    assert!(matches!(err, CheckoutError::EmptyCart));
    assert_eq!(payments.call_count(), 0);
}

#[tokio::test]
async fn test_missing_cart() {
    let h = harness().await;
    let payments = Arc::new(MockPaymentGateway::approving());
    let checkout = orchestrator(
        &h,
        payments.clone(),
        Arc::new(MockEmailClient::accepting()),
        config(),
    );

    let err = checkout
        .checkout(Some(&h.token), EMAIL, &card())
        .await
        .unwrap_err();
    assert!(matches!(err, CheckoutError::CartNotFound));
    assert_eq!(payments.call_count(), 0);
}

#[tokio::test]
async fn test_invalid_card_never_charges() {
    let h = harness().await;
    fill_cart(&h, &["veggie"]).await;
    let payments = Arc::new(MockPaymentGateway::approving());
    let checkout = orchestrator(
        &h,
        payments.clone(),
        Arc::new(MockEmailClient::accepting()),
        config(),
    );
    let mut details = card();
    details.expiration_month = 0;
    details.zip_code = "12".into();

    let err = checkout
        .checkout(Some(&h.token), EMAIL, &details)
        .await
        .unwrap_err();
    match err {
        CheckoutError::ValidationFailed { fields } => {
            assert_eq!(fields, ["expirationMonth", "zipCode"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(payments.call_count(), 0);
}

#[tokio::test]
async fn test_wrong_token_never_charges() {
    let h = harness().await;
    fill_cart(&h, &["veggie"]).await;
    let payments = Arc::new(MockPaymentGateway::approving());
    let checkout = orchestrator(
        &h,
        payments.clone(),
        Arc::new(MockEmailClient::accepting()),
        config(),
    );

    let err = checkout
        .checkout(Some(&h.token), "eve@example.com", &card())
        .await
        .unwrap_err();
    assert!(matches!(err, CheckoutError::Unauthorized));
    assert_eq!(payments.call_count(), 0);
}

#[tokio::test]
async fn test_decline_keeps_cart() {
    let h = harness().await;
    fill_cart(&h, &["margherita", "veggie"]).await;
    let email = Arc::new(MockEmailClient::accepting());
    let checkout = orchestrator(
        &h,
        Arc::new(MockPaymentGateway::declining(
            StatusCode::PAYMENT_REQUIRED,
            "Your card was declined.",
        )),
        email.clone(),
        config(),
    );

    let err = checkout
        .checkout(Some(&h.token), EMAIL, &card())
        .await
        .unwrap_err();
    match &err {
        CheckoutError::PaymentDeclined { status, message } => {
            assert_eq!(*status, Some(StatusCode::PAYMENT_REQUIRED));
            assert_eq!(message, "Your card was declined.");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.provider_status(), Some(StatusCode::PAYMENT_REQUIRED));
    assert!(email.sent().is_empty());
    assert_eq!(cart_len(&h).await, 2);
}

#[tokio::test]
async fn test_email_failure_keeps_cart() {
    let h = harness().await;
    fill_cart(&h, &["pepperoni"]).await;
    let payments = Arc::new(MockPaymentGateway::approving());
    let checkout = orchestrator(
        &h,
        payments.clone(),
        Arc::new(MockEmailClient::rejecting(
            StatusCode::INTERNAL_SERVER_ERROR,
            "mailgun is down",
        )),
        config(),
    );

    let err = checkout
        .checkout(Some(&h.token), EMAIL, &card())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CheckoutError::EmailFailed {
            status: Some(StatusCode::INTERNAL_SERVER_ERROR),
            ..
        }
    ));
    assert_eq!(payments.call_count(), 1);
    assert_eq!(cart_len(&h).await, 1);
}

#[tokio::test]
async fn test_unreachable_gateway_is_decline() {
    let h = harness().await;
    fill_cart(&h, &["pepperoni"]).await;
    let checkout = orchestrator(
        &h,
        Arc::new(MockPaymentGateway::failing(ClientError::Transport(
            "connection refused".into(),
        ))),
        Arc::new(MockEmailClient::accepting()),
        config(),
    );

    let err = checkout
        .checkout(Some(&h.token), EMAIL, &card())
        .await
        .unwrap_err();
    assert!(matches!(err, CheckoutError::PaymentDeclined { status: None, .. }));
    assert_eq!(cart_len(&h).await, 1);
}

#[tokio::test]
async fn test_slow_gateway_times_out() {
    let h = harness().await;
    fill_cart(&h, &["pepperoni"]).await;
    let email = Arc::new(MockEmailClient::accepting());
    let checkout = orchestrator(
        &h,
        Arc::new(MockPaymentGateway::approving().with_delay(Duration::from_millis(500))),
        email.clone(),
        CheckoutConfig {
            provider_timeout: Duration::from_millis(20),
            ..config()
        },
    );

    let err = checkout
        .checkout(Some(&h.token), EMAIL, &card())
        .await
        .unwrap_err();
    assert!(matches!(err, CheckoutError::PaymentDeclined { status: None, .. }));
    assert!(email.sent().is_empty());
    assert_eq!(cart_len(&h).await, 1);
}

/// Accepts the email, but another writer touches the cart while it is sent.
struct RacingEmail {
    docs: Documents,
    token: String,
}

#[async_trait]
impl EmailClient for RacingEmail {
    async fn send(&self, _message: &EmailMessage) -> Result<ProviderResponse, ClientError> {
        let cart = self
            .docs
            .get::<Cart>(Collection::Carts, &self.token)
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        self.docs
            .replace(Collection::Carts, &self.token, &cart.value, None)
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(ProviderResponse::new(
            StatusCode::OK,
            serde_json::json!({"message": "Queued. Thank you."}),
        ))
    }
}

#[tokio::test]
async fn test_stale_cart_fails_to_clear() {
    let h = harness().await;
    fill_cart(&h, &["margherita"]).await;
    let email = Arc::new(RacingEmail {
        docs: h.docs.clone(),
        token: h.token.clone(),
    });
    let checkout = orchestrator(
        &h,
        Arc::new(MockPaymentGateway::approving()),
        email,
        config(),
    );

    let err = checkout
        .checkout(Some(&h.token), EMAIL, &card())
        .await
        .unwrap_err();
    assert!(matches!(err, CheckoutError::ClearFailed(_)));
    assert_eq!(cart_len(&h).await, 1);
}
