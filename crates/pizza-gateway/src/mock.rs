//! Scripted provider doubles.
//!
//! Each mock records every call it receives and answers with a responder
//! closure, so tests can assert both on what was sent and on how the caller
//! reacted to the reply.

use crate::{ChargeRequest, ClientError, EmailClient, EmailMessage, PaymentGateway, ProviderResponse};
use async_trait::async_trait;
use http::StatusCode;
use serde_json::json;
use std::sync::Mutex;
use std::time::Duration;

type Responder<T> = Box<dyn Fn(&T) -> Result<ProviderResponse, ClientError> + Send + Sync>;

/// In-memory [`PaymentGateway`].
pub struct MockPaymentGateway {
    responder: Responder<ChargeRequest>,
    delay: Option<Duration>,
    calls: Mutex<Vec<ChargeRequest>>,
}

impl MockPaymentGateway {
    /// Answer every charge with `responder`.
    pub fn with<F>(responder: F) -> Self
    where
        F: Fn(&ChargeRequest) -> Result<ProviderResponse, ClientError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Approve every charge with a Stripe-shaped body.
    pub fn approving() -> Self {
        Self::with(|req| {
            Ok(ProviderResponse::new(
                StatusCode::OK,
                json!({
                    "id": "ch_mock",
                    "object": "charge",
                    "amount": req.amount_cents,
                    "currency": "usd",
                    "status": "succeeded",
                    "source": {"brand": "Visa", "last4": req.card_last4()},
                }),
            ))
        })
    }

    /// Decline every charge with `status` and a Stripe-shaped error.
    pub fn declining(status: StatusCode, message: &str) -> Self {
        let body = json!({"error": {"message": message, "type": "card_error"}});
        Self::with(move |_| Ok(ProviderResponse::new(status, body.clone())))
    }

    /// Fail every charge without a response.
    pub fn failing(error: ClientError) -> Self {
        Self::with(move |_| Err(error.clone()))
    }

    /// Sleep before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<ChargeRequest> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn charge(&self, request: &ChargeRequest) -> Result<ProviderResponse, ClientError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(request.clone());
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.responder)(request)
    }
}

/// In-memory [`EmailClient`].
pub struct MockEmailClient {
    responder: Responder<EmailMessage>,
    delay: Option<Duration>,
    sent: Mutex<Vec<EmailMessage>>,
}

impl MockEmailClient {
    pub fn with<F>(responder: F) -> Self
    where
        F: Fn(&EmailMessage) -> Result<ProviderResponse, ClientError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            delay: None,
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Accept every message with a Mailgun-shaped body.
    pub fn accepting() -> Self {
        Self::with(|_| {
            Ok(ProviderResponse::new(
                StatusCode::OK,
                json!({"id": "<mock@mailgun>", "message": "Queued. Thank you."}),
            ))
        })
    }

    /// Reject every message with `status`.
    pub fn rejecting(status: StatusCode, message: &str) -> Self {
        let body = json!({"message": message});
        Self::with(move |_| Ok(ProviderResponse::new(status, body.clone())))
    }

    pub fn failing(error: ClientError) -> Self {
        Self::with(move |_| Err(error.clone()))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl EmailClient for MockEmailClient {
    async fn send(&self, message: &EmailMessage) -> Result<ProviderResponse, ClientError> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(message.clone());
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.responder)(message)
    }
}
