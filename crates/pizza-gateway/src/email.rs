//! Email client contract and the Mailgun client.

use crate::response::send;
use crate::{ClientError, ProviderResponse, TimeoutConfig};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

const MAILGUN_BASE_URL: &str = "https://api.mailgun.net/v3";

/// A plain-text email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Sends transactional email.
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<ProviderResponse, ClientError>;
}

/// Mailgun client settings.
#[derive(Clone)]
pub struct MailgunConfig {
    pub api_key: SecretString,
    pub domain: String,
    pub from: String,
    pub base_url: String,
    pub timeout: TimeoutConfig,
}

impl MailgunConfig {
    pub fn new(api_key: SecretString, domain: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            api_key,
            domain: domain.into(),
            from: from.into(),
            base_url: MAILGUN_BASE_URL.to_string(),
            timeout: TimeoutConfig::default(),
        }
    }
}

impl std::fmt::Debug for MailgunConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailgunConfig")
            .field("api_key", &"[REDACTED]")
            .field("domain", &self.domain)
            .field("from", &self.from)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Sends email through Mailgun's messages endpoint.
#[derive(Clone)]
pub struct MailgunClient {
    client: reqwest::Client,
    config: MailgunConfig,
}

impl MailgunClient {
    /// Create a new Mailgun client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: MailgunConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.timeout.connect)
            .timeout(config.timeout.total)
            .build()
            .map_err(|e| ClientError::InvalidRequest(e.to_string()))?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl EmailClient for MailgunClient {
    async fn send(&self, message: &EmailMessage) -> Result<ProviderResponse, ClientError> {
        let url = format!("{}/{}/messages", self.config.base_url, self.config.domain);
        let form = [
            ("from", self.config.from.as_str()),
            ("to", message.to.as_str()),
            ("subject", message.subject.as_str()),
            ("text", message.body.as_str()),
        ];

        let builder = self
            .client
            .post(&url)
            .basic_auth("api", Some(self.config.api_key.expose_secret()))
            .form(&form);

        let response = send(builder, self.config.timeout.total).await?;
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            status = response.status.as_u16(),
            "mailgun message submitted"
        );
        Ok(response)
    }
}
