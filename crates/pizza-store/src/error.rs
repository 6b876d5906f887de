//! Store error types.

use crate::{Collection, ErrorKind};
use thiserror::Error;

/// Errors that can occur when using the document store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Document does not exist.
    #[error("Document not found: {collection}/{id}")]
    NotFound { collection: Collection, id: String },

    /// A document with the same id already exists.
    #[error("Document already exists: {collection}/{id}")]
    AlreadyExists { collection: Collection, id: String },

    /// The stored version differs from the expected one.
    #[error("Concurrent modification of {collection}/{id}: expected version {expected}, found {found}")]
    VersionConflict {
        collection: Collection,
        id: String,
        expected: u64,
        found: u64,
    },

    /// The id cannot be used as a document key.
    #[error("Invalid document id: {0:?}")]
    InvalidId(String),

    /// Failed to (de)serialize a document.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Underlying storage failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub fn not_found(collection: Collection, id: &str) -> Self {
        StoreError::NotFound {
            collection,
            id: id.to_string(),
        }
    }

    pub fn already_exists(collection: Collection, id: &str) -> Self {
        StoreError::AlreadyExists {
            collection,
            id: id.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::NotFound { .. } => ErrorKind::NotFound,
            StoreError::AlreadyExists { .. } | StoreError::VersionConflict { .. } => {
                ErrorKind::Conflict
            }
            StoreError::InvalidId(_) => ErrorKind::Validation,
            StoreError::Serialization(_) | StoreError::Io(_) => ErrorKind::Persistence,
        }
    }

    /// Check if this error means the document is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
