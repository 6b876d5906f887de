//! Request dispatch for the pizza order service.
//!
//! This crate turns decoded requests into calls on the account, token, cart
//! and checkout services, and maps their errors to status codes. It does not
//! speak HTTP itself: a transport decodes into [`ApiRequest`] and encodes the
//! returned [`ApiResponse`].
//!
//! ```rust,ignore
//! use pizza_api::{ApiRequest, AppConfig, Router, Services};
//!
//! let config = AppConfig::from_env()?;
//! let router = Router::new(Services::from_config(&config).await?);
//!
//! let res = router
//!     .dispatch(&ApiRequest::get("cart").query_param("email", "ada@example.com").token(id))
//!     .await;
//! ```

pub mod admin;
pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod request;
pub mod router;

pub use admin::{AdminReports, OrderSummary, UserSummary};
pub use app::{Services, ServicesBuilder, StartupError};
pub use config::{AppConfig, ConfigError, Environment};
pub use error::{status_for, ApiError};
pub use request::{ApiRequest, ApiResponse, TOKEN_HEADER};
pub use router::{Route, Router};
