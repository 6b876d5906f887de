//! Authentication for the pizza order service.
//!
//! - [`PasswordHasher`]: keyed one-way password hashing.
//! - [`TokenAuthenticator`]: issues, extends, revokes and verifies
//!   short-lived session tokens bound to an email.
//! - [`AccountService`]: user registration and profile management, gated on
//!   a verified token.

mod accounts;
mod authenticator;
mod error;
mod password;
mod token;
mod user;

pub use accounts::AccountService;
pub use authenticator::{AuthConfig, TokenAuthenticator};
pub use error::AuthError;
pub use password::PasswordHasher;
pub use token::{Token, TokenId, TOKEN_ID_LEN};
pub use user::{Email, NewUser, User, UserProfile, UserUpdate};
