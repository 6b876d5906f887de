//! Flat-file document store.
//!
//! Layout: `<root>/<collection>/<id>.json`. Each file holds an envelope with
//! the version and timestamps next to the document body. Files are written to
//! a temporary sibling and renamed into place so readers never observe a
//! partial document.

use crate::store::validate_id;
use crate::{Collection, Document, DocumentStat, DocumentStore, StoreError, Version};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    version: Version,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    body: Value,
}

/// Document store backed by JSON files in a directory tree.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open a store rooted at `root`. Directories are created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Root data directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_dir(&self, collection: Collection) -> PathBuf {
        self.root.join(collection.as_str())
    }

    fn document_path(&self, collection: Collection, id: &str) -> PathBuf {
        self.collection_dir(collection).join(format!("{id}.json"))
    }

    async fn load(&self, collection: Collection, id: &str) -> Result<Envelope, StoreError> {
        validate_id(id)?;
        let path = self.document_path(collection, id);
        match fs::read(&path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == IoErrorKind::NotFound => {
                Err(StoreError::not_found(collection, id))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save(
        &self,
        collection: Collection,
        id: &str,
        envelope: &Envelope,
    ) -> Result<(), StoreError> {
        let dir = self.collection_dir(collection);
        fs::create_dir_all(&dir).await?;

        let path = self.document_path(collection, id);
        let tmp = dir.join(format!(".{id}.json.tmp"));
        fs::write(&tmp, serde_json::to_vec_pretty(envelope)?).await?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn create(
        &self,
        collection: Collection,
        id: &str,
        body: Value,
    ) -> Result<Version, StoreError> {
        validate_id(id)?;
        let _guard = self.write_lock.lock().await;

        if fs::try_exists(self.document_path(collection, id)).await? {
            return Err(StoreError::already_exists(collection, id));
        }

        let now = Utc::now();
        let envelope = Envelope {
            version: 1,
            created_at: now,
            updated_at: now,
            body,
        };
        self.save(collection, id, &envelope).await?;
        tracing::debug!(collection = %collection, id, "document created");
        Ok(1)
    }

    async fn read(&self, collection: Collection, id: &str) -> Result<Document, StoreError> {
        let envelope = self.load(collection, id).await?;
        Ok(Document {
            body: envelope.body,
            version: envelope.version,
        })
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        body: Value,
        expected: Option<Version>,
    ) -> Result<Version, StoreError> {
        let _guard = self.write_lock.lock().await;
        let current = self.load(collection, id).await?;

        if let Some(expected) = expected {
            if current.version != expected {
                return Err(StoreError::VersionConflict {
                    collection,
                    id: id.to_string(),
                    expected,
                    found: current.version,
                });
            }
        }

        let envelope = Envelope {
            version: current.version + 1,
            created_at: current.created_at,
            updated_at: Utc::now(),
            body,
        };
        self.save(collection, id, &envelope).await?;
        Ok(envelope.version)
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        validate_id(id)?;
        let _guard = self.write_lock.lock().await;
        match fs::remove_file(self.document_path(collection, id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == IoErrorKind::NotFound => {
                Err(StoreError::not_found(collection, id))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self, collection: Collection) -> Result<Vec<String>, StoreError> {
        let mut entries = match fs::read_dir(self.collection_dir(collection)).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut ids = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if name.starts_with('.') {
                continue;
            }
            if let Some(id) = name.strip_suffix(".json") {
                ids.push(id.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }

    async fn stat(&self, collection: Collection, id: &str) -> Result<DocumentStat, StoreError> {
        let envelope = self.load(collection, id).await?;
        Ok(DocumentStat {
            created_at: envelope.created_at,
            updated_at: envelope.updated_at,
            version: envelope.version,
        })
    }
}
