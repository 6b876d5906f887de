//! Payment gateway contract and the Stripe charge client.

use crate::response::send;
use crate::{ClientError, ProviderResponse, TimeoutConfig};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;

const STRIPE_BASE_URL: &str = "https://api.stripe.com/v1";

/// A single card charge.
#[derive(Clone, PartialEq)]
pub struct ChargeRequest {
    pub card_number: String,
    pub exp_month: u32,
    pub exp_year: i32,
    pub cvc: u32,
    pub zip: String,
    pub amount_cents: i64,
}

impl ChargeRequest {
    /// Last four digits of the card, for logs.
    pub fn card_last4(&self) -> &str {
        let len = self.card_number.len();
        self.card_number.get(len.saturating_sub(4)..).unwrap_or("")
    }
}

impl std::fmt::Debug for ChargeRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChargeRequest")
            .field("card_number", &format_args!("****{}", self.card_last4()))
            .field("exp_month", &self.exp_month)
            .field("exp_year", &self.exp_year)
            .field("cvc", &"[REDACTED]")
            .field("zip", &self.zip)
            .field("amount_cents", &self.amount_cents)
            .finish()
    }
}

/// Captures payment for an order.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Attempt one charge. A declined card is an `Ok` response with a
    /// non-success status; `Err` means no usable answer was received.
    async fn charge(&self, request: &ChargeRequest) -> Result<ProviderResponse, ClientError>;
}

/// Mapping from card numbers to the provider's card source tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardTokens(HashMap<String, String>);

impl CardTokens {
    pub fn new(tokens: HashMap<String, String>) -> Self {
        Self(tokens)
    }

    /// Stripe's published test cards.
    pub fn stripe_test_cards() -> Self {
        let cards = [
            ("4242424242424242", "tok_visa"),
            ("4000056655665556", "tok_visa_debit"),
            ("5555555555554444", "tok_mastercard"),
            ("2223003122003222", "tok_mastercard_debit"),
            ("5200828282828210", "tok_mastercard_prepaid"),
            ("6200000000000005", "tok_unionpay"),
        ];
        Self(
            cards
                .into_iter()
                .map(|(card, token)| (card.to_string(), token.to_string()))
                .collect(),
        )
    }

    pub fn resolve(&self, card_number: &str) -> Option<&str> {
        self.0.get(card_number).map(String::as_str)
    }
}

/// Stripe client settings.
#[derive(Clone)]
pub struct StripeConfig {
    pub secret_key: SecretString,
    pub base_url: String,
    pub currency: String,
    pub description: String,
    pub card_tokens: CardTokens,
    pub timeout: TimeoutConfig,
}

impl StripeConfig {
    pub fn new(secret_key: SecretString) -> Self {
        Self {
            secret_key,
            base_url: STRIPE_BASE_URL.to_string(),
            currency: "usd".to_string(),
            description: "Payment for purchasing pizza".to_string(),
            card_tokens: CardTokens::stripe_test_cards(),
            timeout: TimeoutConfig::default(),
        }
    }
}

impl std::fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeConfig")
            .field("secret_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("currency", &self.currency)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Charges cards through Stripe's `/charges` endpoint.
#[derive(Clone)]
pub struct StripeGateway {
    client: reqwest::Client,
    config: StripeConfig,
}

impl StripeGateway {
    /// Create a new Stripe client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: StripeConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.timeout.connect)
            .timeout(config.timeout.total)
            .build()
            .map_err(|e| ClientError::InvalidRequest(e.to_string()))?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn charge(&self, request: &ChargeRequest) -> Result<ProviderResponse, ClientError> {
        let source = self
            .config
            .card_tokens
            .resolve(&request.card_number)
            .ok_or_else(|| {
                ClientError::InvalidRequest(format!(
                    "unsupported card ending in {}",
                    request.card_last4()
                ))
            })?;

        let url = format!("{}/charges", self.config.base_url);
        let amount = request.amount_cents.to_string();
        let form = [
            ("amount", amount.as_str()),
            ("currency", self.config.currency.as_str()),
            ("description", self.config.description.as_str()),
            ("source", source),
        ];

        let builder = self
            .client
            .post(&url)
            .basic_auth(self.config.secret_key.expose_secret(), None::<&str>)
            .form(&form);

        let response = send(builder, self.config.timeout.total).await?;
        tracing::info!(
            amount_cents = request.amount_cents,
            card = request.card_last4(),
            status = response.status.as_u16(),
            "stripe charge attempted"
        );
        Ok(response)
    }
}
