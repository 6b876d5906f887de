//! Outbound provider clients.
//!
//! The checkout flow talks to two external services through narrow traits:
//!
//! - [`PaymentGateway`]: one charge call per checkout attempt.
//! - [`EmailClient`]: one receipt email per successful charge.
//!
//! Both return the provider's raw [`ProviderResponse`] so callers can surface
//! the provider's own status and message. Production implementations speak
//! to Stripe and Mailgun over `reqwest`; [`mock`] holds scripted in-memory
//! doubles for tests.

mod email;
mod error;
pub mod mock;
mod payment;
mod response;
mod timeout;
mod unconfigured;

pub use email::{EmailClient, EmailMessage, MailgunClient, MailgunConfig};
pub use error::ClientError;
pub use payment::{CardTokens, ChargeRequest, PaymentGateway, StripeConfig, StripeGateway};
pub use response::ProviderResponse;
pub use timeout::TimeoutConfig;
pub use unconfigured::Unconfigured;
