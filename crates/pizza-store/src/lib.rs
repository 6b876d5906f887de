//! Document storage for the pizza order service.
//!
//! Every persisted record (users, tokens, menu, carts) lives in a
//! [`DocumentStore`]. The store owns the bytes; callers work on transient
//! per-request copies and write whole documents back.
//!
//! - [`InMemoryStore`] keeps documents in a map and is used by tests.
//! - [`FileStore`] keeps one JSON file per document under a data directory.
//! - [`Documents`] wraps either adapter with serde-typed access.
//!
//! Each document carries a version that starts at 1 and increases on every
//! update. Passing the version read earlier to [`DocumentStore::update`]
//! turns the write into a compare-and-swap.
//!
//! # Example
//!
//! ```rust,ignore
//! use pizza_store::{Collection, Documents, InMemoryStore};
//!
//! let docs = Documents::new(Arc::new(InMemoryStore::new()));
//! docs.insert(Collection::Carts, "abc", &cart).await?;
//! let current = docs.get::<Cart>(Collection::Carts, "abc").await?;
//! docs.replace(Collection::Carts, "abc", &updated, Some(current.version)).await?;
//! ```

mod collection;
mod documents;
mod error;
mod file;
mod kind;
mod memory;
mod store;

pub use collection::Collection;
pub use documents::{Documents, Versioned};
pub use error::StoreError;
pub use file::FileStore;
pub use kind::ErrorKind;
pub use memory::InMemoryStore;
pub use store::{validate_id, Document, DocumentStat, DocumentStore, Version};
