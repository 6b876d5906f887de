//! Stand-in provider for deployments without credentials.

use crate::{ChargeRequest, ClientError, EmailClient, EmailMessage, PaymentGateway, ProviderResponse};
use async_trait::async_trait;

/// Refuses every call without contacting anyone. Used in staging when a
/// provider's credentials are not set, so checkout fails with a named
/// provider instead of the service refusing to start.
#[derive(Debug, Clone, Copy)]
pub struct Unconfigured {
    provider: &'static str,
}

impl Unconfigured {
    pub fn new(provider: &'static str) -> Self {
        Self { provider }
    }

    fn refuse(&self) -> ClientError {
        ClientError::InvalidRequest(format!("{} is not configured", self.provider))
    }
}

#[async_trait]
impl PaymentGateway for Unconfigured {
    async fn charge(&self, _request: &ChargeRequest) -> Result<ProviderResponse, ClientError> {
        tracing::warn!(provider = self.provider, "charge refused: provider not configured");
        Err(self.refuse())
    }
}

#[async_trait]
impl EmailClient for Unconfigured {
    async fn send(&self, _message: &EmailMessage) -> Result<ProviderResponse, ClientError> {
        tracing::warn!(provider = self.provider, "email refused: provider not configured");
        Err(self.refuse())
    }
}
