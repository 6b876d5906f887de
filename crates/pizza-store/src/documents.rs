//! Typed access to documents with automatic serialization.

use crate::{Collection, DocumentStat, DocumentStore, StoreError, Version};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// A deserialized document and the version it was read at.
#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<T> {
    pub value: T,
    pub version: Version,
}

/// Serde-typed view over a [`DocumentStore`].
///
/// Cheap to clone; every clone shares the same underlying store.
#[derive(Clone)]
pub struct Documents {
    store: Arc<dyn DocumentStore>,
}

impl Documents {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// The untyped store underneath.
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Read and deserialize a document.
    pub async fn get<T: DeserializeOwned>(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Versioned<T>, StoreError> {
        let doc = self.store.read(collection, id).await?;
        Ok(Versioned {
            value: serde_json::from_value(doc.body)?,
            version: doc.version,
        })
    }

    /// Like [`get`](Self::get) but maps a missing document to `None`.
    pub async fn find<T: DeserializeOwned>(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Versioned<T>>, StoreError> {
        match self.get(collection, id).await {
            Ok(v) => Ok(Some(v)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn insert<T: Serialize>(
        &self,
        collection: Collection,
        id: &str,
        value: &T,
    ) -> Result<Version, StoreError> {
        let body = serde_json::to_value(value)?;
        self.store.create(collection, id, body).await
    }

    /// Overwrite a document. With `expected` set this is a compare-and-swap.
    pub async fn replace<T: Serialize>(
        &self,
        collection: Collection,
        id: &str,
        value: &T,
        expected: Option<Version>,
    ) -> Result<Version, StoreError> {
        let body = serde_json::to_value(value)?;
        self.store.update(collection, id, body, expected).await
    }

    pub async fn remove(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        self.store.delete(collection, id).await
    }

    pub async fn ids(&self, collection: Collection) -> Result<Vec<String>, StoreError> {
        self.store.list(collection).await
    }

    pub async fn stat(&self, collection: Collection, id: &str) -> Result<DocumentStat, StoreError> {
        self.store.stat(collection, id).await
    }
}
