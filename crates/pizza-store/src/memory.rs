//! In-memory document store.

use crate::store::validate_id;
use crate::{Collection, Document, DocumentStat, DocumentStore, StoreError, Version};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct Record {
    body: Value,
    version: Version,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Document store held entirely in memory.
///
/// Writes take the map's write lock, so updates to one key are serialised.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<HashMap<(Collection, String), Record>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents across all collections.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn create(
        &self,
        collection: Collection,
        id: &str,
        body: Value,
    ) -> Result<Version, StoreError> {
        validate_id(id)?;
        let mut records = self.records.write().await;
        let key = (collection, id.to_string());
        if records.contains_key(&key) {
            return Err(StoreError::already_exists(collection, id));
        }
        let now = Utc::now();
        records.insert(
            key,
            Record {
                body,
                version: 1,
                created_at: now,
                updated_at: now,
            },
        );
        Ok(1)
    }

    async fn read(&self, collection: Collection, id: &str) -> Result<Document, StoreError> {
        validate_id(id)?;
        let records = self.records.read().await;
        records
            .get(&(collection, id.to_string()))
            .map(|r| Document {
                body: r.body.clone(),
                version: r.version,
            })
            .ok_or_else(|| StoreError::not_found(collection, id))
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        body: Value,
        expected: Option<Version>,
    ) -> Result<Version, StoreError> {
        validate_id(id)?;
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&(collection, id.to_string()))
            .ok_or_else(|| StoreError::not_found(collection, id))?;

        if let Some(expected) = expected {
            if record.version != expected {
                return Err(StoreError::VersionConflict {
                    collection,
                    id: id.to_string(),
                    expected,
                    found: record.version,
                });
            }
        }

        record.body = body;
        record.version += 1;
        record.updated_at = Utc::now();
        Ok(record.version)
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        validate_id(id)?;
        let mut records = self.records.write().await;
        records
            .remove(&(collection, id.to_string()))
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(collection, id))
    }

    async fn list(&self, collection: Collection) -> Result<Vec<String>, StoreError> {
        let records = self.records.read().await;
        let mut ids: Vec<String> = records
            .keys()
            .filter(|(c, _)| *c == collection)
            .map(|(_, id)| id.clone())
            .collect();
        ids.sort();
        Ok(ids)
    }

    async fn stat(&self, collection: Collection, id: &str) -> Result<DocumentStat, StoreError> {
        validate_id(id)?;
        let records = self.records.read().await;
        records
            .get(&(collection, id.to_string()))
            .map(|r| DocumentStat {
                created_at: r.created_at,
                updated_at: r.updated_at,
                version: r.version,
            })
            .ok_or_else(|| StoreError::not_found(collection, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_and_read() {
        let store = InMemoryStore::new();
        let version = store
            .create(Collection::Users, "a@b.c", json!({"firstName": "Ada"}))
            .await
            .unwrap();
        assert_eq!(version, 1);

        let doc = store.read(Collection::Users, "a@b.c").await.unwrap();
        assert_eq!(doc.body["firstName"], "Ada");
        assert_eq!(doc.version, 1);
    }

    #[tokio::test]
    async fn test_create_duplicate_fails() {
        let store = InMemoryStore::new();
        store.create(Collection::Tokens, "t1", json!({})).await.unwrap();
        let err = store
            .create(Collection::Tokens, "t1", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists { .. }));
    }

    #[tokio::test]
    async fn test_collections_are_separate() {
        let store = InMemoryStore::new();
        store.create(Collection::Tokens, "x", json!(1)).await.unwrap();
        assert!(store.read(Collection::Carts, "x").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_update_bumps_version() {
        let store = InMemoryStore::new();
        store.create(Collection::Carts, "c", json!([])).await.unwrap();
        let v = store
            .update(Collection::Carts, "c", json!(["margherita"]), Some(1))
            .await
            .unwrap();
        assert_eq!(v, 2);
        let v = store
            .update(Collection::Carts, "c", json!([]), None)
            .await
            .unwrap();
        assert_eq!(v, 3);
    }

    #[tokio::test]
    async fn test_update_with_stale_version_conflicts() {
        let store = InMemoryStore::new();
        store.create(Collection::Carts, "c", json!([])).await.unwrap();
        store
            .update(Collection::Carts, "c", json!(["a"]), Some(1))
            .await
            .unwrap();

        let err = store
            .update(Collection::Carts, "c", json!(["b"]), Some(1))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::VersionConflict {
                expected: 1,
                found: 2,
                ..
            }
        ));
        let doc = store.read(Collection::Carts, "c").await.unwrap();
        assert_eq!(doc.body, json!(["a"]));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = InMemoryStore::new();
        let err = store
            .update(Collection::Carts, "nope", json!([]), None)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_and_list() {
        let store = InMemoryStore::new();
        store.create(Collection::Users, "b", json!({})).await.unwrap();
        store.create(Collection::Users, "a", json!({})).await.unwrap();
        assert_eq!(store.list(Collection::Users).await.unwrap(), vec!["a", "b"]);

        store.delete(Collection::Users, "a").await.unwrap();
        assert_eq!(store.list(Collection::Users).await.unwrap(), vec!["b"]);
        assert!(store.delete(Collection::Users, "a").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_stat_tracks_timestamps() {
        let store = InMemoryStore::new();
        let before = Utc::now();
        store.create(Collection::Carts, "c", json!([])).await.unwrap();
        store.update(Collection::Carts, "c", json!([1]), None).await.unwrap();

        let stat = store.stat(Collection::Carts, "c").await.unwrap();
        assert!(stat.created_at >= before);
        assert!(stat.updated_at >= stat.created_at);
        assert_eq!(stat.version, 2);
    }

    #[tokio::test]
    async fn test_invalid_id_rejected() {
        let store = InMemoryStore::new();
        let err = store
            .create(Collection::Users, "../etc", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidId(_)));
    }
}
