//! Menu, cart and checkout for the pizza order service.
//!
//! - **Menu**: the catalog of orderable items, stored as one document
//! - **Cart**: per-token carts, each item at most once
//! - **Checkout**: validate card, charge, email receipt, empty the cart
//!
//! Every cart and checkout operation first verifies the caller's token
//! against the email it claims.

pub mod cart;
pub mod checkout;
pub mod error;
pub mod menu;
pub mod money;

pub use cart::{Cart, CartManager};
pub use checkout::{
    CardYears, CheckoutAttempt, CheckoutConfig, CheckoutOrchestrator, CheckoutOutcome, CheckoutStep,
    PaymentDetails, Receipt,
};
pub use error::{CartError, CheckoutError};
pub use menu::{Menu, MenuItem, MENU_DOCUMENT};
pub use money::{Currency, Money};
