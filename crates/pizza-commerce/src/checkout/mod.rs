//! Checkout module.
//!
//! Contains the checkout state machine, card validation, receipts and the
//! orchestrator that drives payment, email and cart clearing.

mod config;
mod flow;
mod orchestrator;
mod payment;
mod receipt;

pub use config::{CardYears, CheckoutConfig};
pub use flow::{CheckoutAttempt, CheckoutStep};
pub use orchestrator::{CheckoutOrchestrator, CheckoutOutcome};
pub use payment::PaymentDetails;
pub use receipt::Receipt;
