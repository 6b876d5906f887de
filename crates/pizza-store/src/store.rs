//! The document store contract.

use crate::{Collection, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Document version. Starts at 1 on create.
pub type Version = u64;

/// A stored document together with its current version.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub body: Value,
    pub version: Version,
}

/// Metadata about a stored document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStat {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: Version,
}

/// Persistent keyed storage of JSON documents.
///
/// Implementations serialise writes per key. `update` with an expected
/// version fails with [`StoreError::VersionConflict`] when the stored version
/// differs, so a read-modify-write cycle never silently overwrites a
/// concurrent change.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create a new document. Fails if the id is taken.
    async fn create(
        &self,
        collection: Collection,
        id: &str,
        body: Value,
    ) -> Result<Version, StoreError>;

    /// Read a document.
    async fn read(&self, collection: Collection, id: &str) -> Result<Document, StoreError>;

    /// Replace an existing document, optionally checking its version first.
    async fn update(
        &self,
        collection: Collection,
        id: &str,
        body: Value,
        expected: Option<Version>,
    ) -> Result<Version, StoreError>;

    /// Delete a document.
    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError>;

    /// List document ids in a collection, sorted.
    async fn list(&self, collection: Collection) -> Result<Vec<String>, StoreError>;

    /// Read document metadata without the body.
    async fn stat(&self, collection: Collection, id: &str) -> Result<DocumentStat, StoreError>;
}

/// Reject ids that cannot safely be used as a key or file name. A leading
/// `.` is reserved for the file store's temporary files.
pub fn validate_id(id: &str) -> Result<(), StoreError> {
    let bad = id.is_empty()
        || id.starts_with('.')
        || id.chars().any(|c| matches!(c, '/' | '\\' | '\0'));
    if bad {
        return Err(StoreError::InvalidId(id.to_string()));
    }
    Ok(())
}
