//! Service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `PIZZA_HASHING_SECRET` - Key for password hashing
//!
//! ## Required in production, optional in staging
//! - `STRIPE_SECRET_KEY` - Stripe API secret key
//! - `MAILGUN_API_KEY` - Mailgun API key
//! - `MAILGUN_DOMAIN` - Mailgun sending domain
//! - `MAILGUN_FROM` - Sender address (default: `orders@<MAILGUN_DOMAIN>`)
//!
//! ## Optional
//! - `PIZZA_ENV` - `staging` (default) or `production`
//! - `PIZZA_UNIT_PRICE_CENTS` - Price per cart item (default: 50)
//! - `PIZZA_CARD_YEARS` - Accepted card expiry years as `<from>-<to>`
//!   (default: the current year and the ten after it, re-evaluated on
//!   every check)
//! - `PIZZA_PROVIDER_TIMEOUT_MS` - Payment and email call timeout (default: 10000)
//! - `PIZZA_TOKEN_TTL_SECS` - Session token lifetime (default: 3600)
//! - `PIZZA_DATA_DIR` - Document store root (default: `.data`)

use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use pizza_auth::AuthConfig;
use pizza_commerce::{CardYears, CheckoutConfig, Money};
use pizza_gateway::{MailgunConfig, StripeConfig, TimeoutConfig};
use pizza_store::ErrorKind;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_PRODUCTION_SECRET_LENGTH: usize = 16;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

impl ConfigError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            other => Err(format!("unknown environment '{other}'")),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application configuration.
///
/// Implements `Debug` manually to redact the hashing secret.
#[derive(Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub hashing_secret: SecretString,
    pub data_dir: PathBuf,
    pub unit_price_cents: i64,
    pub card_years: CardYears,
    pub provider_timeout: Duration,
    pub token_ttl: Duration,
    pub stripe: Option<StripeConfig>,
    pub mailgun: Option<MailgunConfig>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("environment", &self.environment)
            .field("hashing_secret", &"[REDACTED]")
            .field("data_dir", &self.data_dir)
            .field("unit_price_cents", &self.unit_price_cents)
            .field("card_years", &self.card_years)
            .field("provider_timeout", &self.provider_timeout)
            .field("token_ttl", &self.token_ttl)
            .field("stripe", &self.stripe)
            .field("mailgun", &self.mailgun)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a value
    /// does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its
    /// value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let environment = env.parse_or("PIZZA_ENV", Environment::default())?;
        let hashing_secret = env.required_secret("PIZZA_HASHING_SECRET")?;
        if environment.is_production()
            && hashing_secret.expose_secret().len() < MIN_PRODUCTION_SECRET_LENGTH
        {
            return Err(ConfigError::InvalidEnvVar(
                "PIZZA_HASHING_SECRET".to_string(),
                format!("must be at least {MIN_PRODUCTION_SECRET_LENGTH} characters in production"),
            ));
        }

        let unit_price_cents: i64 = env.parse_or("PIZZA_UNIT_PRICE_CENTS", 50)?;
        if unit_price_cents <= 0 {
            return Err(ConfigError::InvalidEnvVar(
                "PIZZA_UNIT_PRICE_CENTS".to_string(),
                "must be positive".to_string(),
            ));
        }
        let card_years = match env.optional("PIZZA_CARD_YEARS") {
            Some(raw) => parse_years(&raw)
                .map(CardYears::Fixed)
                .map_err(|e| ConfigError::InvalidEnvVar("PIZZA_CARD_YEARS".to_string(), e))?,
            None => CardYears::default(),
        };
        let provider_timeout =
            Duration::from_millis(env.parse_or("PIZZA_PROVIDER_TIMEOUT_MS", 10_000)?);
        let token_ttl = Duration::from_secs(env.parse_or("PIZZA_TOKEN_TTL_SECS", 3600)?);
        let data_dir = PathBuf::from(env.or_default("PIZZA_DATA_DIR", ".data"));

        let timeout = TimeoutConfig::from_total(provider_timeout);
        let stripe = env.optional("STRIPE_SECRET_KEY").map(|key| StripeConfig {
            timeout,
            ..StripeConfig::new(SecretString::from(key))
        });
        let mailgun = match (env.optional("MAILGUN_API_KEY"), env.optional("MAILGUN_DOMAIN")) {
            (Some(key), Some(domain)) => {
                let from = env
                    .optional("MAILGUN_FROM")
                    .unwrap_or_else(|| format!("orders@{domain}"));
                Some(MailgunConfig {
                    timeout,
                    ..MailgunConfig::new(SecretString::from(key), domain, from)
                })
            }
            (Some(_), None) => return Err(ConfigError::MissingEnvVar("MAILGUN_DOMAIN".to_string())),
            _ => None,
        };

        if environment.is_production() {
            if stripe.is_none() {
                return Err(ConfigError::MissingEnvVar("STRIPE_SECRET_KEY".to_string()));
            }
            if mailgun.is_none() {
                return Err(ConfigError::MissingEnvVar("MAILGUN_API_KEY".to_string()));
            }
        }

        Ok(Self {
            environment,
            hashing_secret,
            data_dir,
            unit_price_cents,
            card_years,
            provider_timeout,
            token_ttl,
            stripe,
            mailgun,
        })
    }

    pub fn auth(&self) -> AuthConfig {
        AuthConfig {
            token_ttl: chrono::Duration::from_std(self.token_ttl)
                .unwrap_or_else(|_| AuthConfig::default().token_ttl),
        }
    }

    pub fn checkout(&self) -> CheckoutConfig {
        CheckoutConfig {
            unit_price: Money::usd(self.unit_price_cents),
            accepted_years: self.card_years.clone(),
            provider_timeout: self.provider_timeout,
            ..CheckoutConfig::default()
        }
    }
}

/// Parse `<from>-<to>` into an inclusive year range.
fn parse_years(raw: &str) -> Result<RangeInclusive<i32>, String> {
    let (from, to) = raw
        .trim()
        .split_once('-')
        .ok_or_else(|| format!("expected '<from>-<to>', got '{raw}'"))?;
    let from: i32 = from.trim().parse().map_err(|e| format!("{e}"))?;
    let to: i32 = to.trim().parse().map_err(|e| format!("{e}"))?;
    if from > to {
        return Err(format!("empty range {from}-{to}"));
    }
    Ok(from..=to)
}

struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    fn required_secret(&self, key: &str) -> Result<SecretString, ConfigError> {
        self.optional(key)
            .map(SecretString::from)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.optional(key) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
            None => Ok(default),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("PIZZA_HASHING_SECRET", "thisIsASecret")]).unwrap();
        assert_eq!(config.environment, Environment::Staging);
        assert_eq!(config.unit_price_cents, 50);
        assert_eq!(config.provider_timeout, Duration::from_secs(10));
        assert_eq!(config.token_ttl, Duration::from_secs(3600));
        assert_eq!(config.data_dir, PathBuf::from(".data"));
        assert_eq!(config.card_years, CardYears::Rolling { span: 10 });
        assert!(config.stripe.is_none());
        assert!(config.mailgun.is_none());
    }

    #[test]
    fn test_missing_secret() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref k) if k == "PIZZA_HASHING_SECRET"));
    }

    #[test]
    fn test_invalid_number() {
        let err = load(&[
            ("PIZZA_HASHING_SECRET", "s"),
            ("PIZZA_UNIT_PRICE_CENTS", "fifty"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref k, _) if k == "PIZZA_UNIT_PRICE_CENTS"));
    }

    #[test]
    fn test_card_years() {
        let config = load(&[
            ("PIZZA_HASHING_SECRET", "s"),
            ("PIZZA_CARD_YEARS", "2019-2020"),
        ])
        .unwrap();
        assert_eq!(config.card_years, CardYears::Fixed(2019..=2020));
        assert_eq!(config.checkout().accepted_years, CardYears::Fixed(2019..=2020));

        assert!(parse_years("2020").is_err());
        assert!(parse_years("2021-2020").is_err());
    }

    #[test]
    fn test_production_requires_providers() {
        let secret = ("PIZZA_HASHING_SECRET", "a-long-production-secret");
        let err = load(&[("PIZZA_ENV", "production"), secret]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref k) if k == "STRIPE_SECRET_KEY"));

        let config = load(&[
            ("PIZZA_ENV", "production"),
            secret,
            ("STRIPE_SECRET_KEY", "sk_live_x"),
            ("MAILGUN_API_KEY", "key-x"),
            ("MAILGUN_DOMAIN", "mg.example.com"),
        ])
        .unwrap();
        assert!(config.environment.is_production());
        let mailgun = config.mailgun.unwrap();
        assert_eq!(mailgun.from, "orders@mg.example.com");
        assert_eq!(mailgun.timeout.total, Duration::from_secs(10));
    }

    #[test]
    fn test_production_rejects_short_secret() {
        let err = load(&[("PIZZA_ENV", "production"), ("PIZZA_HASHING_SECRET", "short")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref k, _) if k == "PIZZA_HASHING_SECRET"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = load(&[
            ("PIZZA_HASHING_SECRET", "hunter2hunter2"),
            ("STRIPE_SECRET_KEY", "sk_test_abc"),
        ])
        .unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("sk_test_abc"));
        assert!(debug.contains("[REDACTED]"));
    }
}
