//! Runs one checkout attempt end to end.

use super::{CheckoutAttempt, CheckoutConfig, CheckoutStep, PaymentDetails, Receipt};
use crate::cart::Cart;
use crate::error::CheckoutError;
use chrono::Utc;
use http::StatusCode;
use pizza_auth::TokenAuthenticator;
use pizza_gateway::{ClientError, EmailClient, EmailMessage, PaymentGateway, ProviderResponse};
use pizza_store::{Collection, Documents};
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Result of a completed checkout.
#[derive(Debug, Clone)]
pub struct CheckoutOutcome {
    /// Status reported by the email provider.
    pub status: StatusCode,
    /// Body returned by the email provider.
    pub payload: Value,
    pub receipt: Receipt,
    /// Every step the attempt passed through.
    pub steps: Vec<CheckoutStep>,
}

/// Charges a cart, emails the receipt and empties the cart.
///
/// Steps run strictly in order and are never retried. A failure after the
/// charge leaves the payment captured and is logged at `error` with the
/// charge identity for reconciliation.
#[derive(Clone)]
pub struct CheckoutOrchestrator {
    docs: Documents,
    auth: TokenAuthenticator,
    payments: Arc<dyn PaymentGateway>,
    email: Arc<dyn EmailClient>,
    config: CheckoutConfig,
}

impl CheckoutOrchestrator {
    pub fn new(
        docs: Documents,
        auth: TokenAuthenticator,
        payments: Arc<dyn PaymentGateway>,
        email: Arc<dyn EmailClient>,
        config: CheckoutConfig,
    ) -> Self {
        Self {
            docs,
            auth,
            payments,
            email,
            config,
        }
    }

    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    #[tracing::instrument(skip_all, fields(email = %email.trim()))]
    pub async fn checkout(
        &self,
        token: Option<&str>,
        email: &str,
        details: &PaymentDetails,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        let mut attempt = CheckoutAttempt::new();
        let email = email.trim();
        let token = token.map(str::trim).unwrap_or_default();

        // Validating
        if !self.auth.verify(token, email).await {
            tracing::warn!("checkout with invalid token");
            return Err(CheckoutError::Unauthorized);
        }
        details.validate(&self.config)?;

        // CartLoaded
        let cart = match self.docs.find::<Cart>(Collection::Carts, token).await {
            Ok(Some(cart)) => cart,
            Ok(None) => return Err(CheckoutError::CartNotFound),
            Err(e) => {
                tracing::warn!(error = %e, "could not read cart");
                return Err(CheckoutError::CartNotFound);
            }
        };
        if cart.value.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let count = i64::try_from(cart.value.item_count()).unwrap_or(i64::MAX);
        let total = self
            .config
            .unit_price
            .try_multiply(count)
            .ok_or_else(|| CheckoutError::invalid(&["amount"]))?;
        attempt.advance_to(CheckoutStep::CartLoaded)?;

        // PaymentAuthorized
        let charge = details.to_charge(total.amount_cents)?;
        let card_last4 = charge.card_last4().to_string();
        let paid = self
            .call_provider(self.payments.charge(&charge))
            .await
            .and_then(accepted)
            .map_err(|(status, message)| {
                tracing::warn!(status = ?status, message = %message, "payment declined");
                CheckoutError::PaymentDeclined { status, message }
            })?;
        let charge_id = paid
            .body
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();
        tracing::info!(charge_id = %charge_id, amount = %total, items = count, "payment captured");
        attempt.advance_to(CheckoutStep::PaymentAuthorized)?;

        // ReceiptSent
        let receipt = Receipt::from_charge(&paid.body, total, Utc::now());
        let message = EmailMessage {
            to: cart.value.email.clone(),
            subject: self.config.receipt_subject.clone(),
            body: receipt.text(),
        };
        let sent = self
            .call_provider(self.email.send(&message))
            .await
            .and_then(accepted)
            .map_err(|(status, message)| {
                tracing::error!(
                    charge_id = %charge_id,
                    card_last4 = %card_last4,
                    amount = %total,
                    status = ?status,
                    message = %message,
                    "payment captured but receipt email failed"
                );
                CheckoutError::EmailFailed { status, message }
            })?;
        attempt.advance_to(CheckoutStep::ReceiptSent)?;

        // CartCleared
        let mut emptied = cart.value;
        emptied.clear();
        if let Err(e) = self
            .docs
            .replace(Collection::Carts, token, &emptied, Some(cart.version))
            .await
        {
            tracing::error!(
                charge_id = %charge_id,
                card_last4 = %card_last4,
                amount = %total,
                error = %e,
                "order completed but cart could not be cleared"
            );
            return Err(CheckoutError::ClearFailed(e.to_string()));
        }
        attempt.advance_to(CheckoutStep::CartCleared)?;
        tracing::info!(charge_id = %charge_id, "checkout complete");

        Ok(CheckoutOutcome {
            status: sent.status,
            payload: sent.body,
            receipt,
            steps: attempt.trail(),
        })
    }

    /// Bound a provider call by the configured timeout.
    async fn call_provider<F>(&self, call: F) -> Result<ProviderResponse, (Option<StatusCode>, String)>
    where
        F: Future<Output = Result<ProviderResponse, ClientError>>,
    {
        let limit: Duration = self.config.provider_timeout;
        match tokio::time::timeout(limit, call).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(e)) => Err((None, e.to_string())),
            Err(_) => Err((None, ClientError::Timeout(limit).to_string())),
        }
    }
}

/// Treat any non-success answer as a failure carrying the provider's status
/// and message.
fn accepted(response: ProviderResponse) -> Result<ProviderResponse, (Option<StatusCode>, String)> {
    if response.is_success() {
        Ok(response)
    } else {
        Err((Some(response.status), response.message()))
    }
}
