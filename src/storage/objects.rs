//! Object storage for uploaded files

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Bytes and content type of a stored object
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Blob store addressed by key (`{folder}/{uuid}-{name}`)
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store an object, replacing any previous content under the key
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<()>;

    /// Read an object; `None` when the key is unknown
    async fn fetch(&self, key: &str) -> Result<Option<StoredObject>>;

    /// Remove an object; unknown keys are ignored
    async fn delete(&self, key: &str) -> Result<()>;

    /// Permanent URL of the object
    fn public_url(&self, key: &str) -> String;

    /// Time-limited URL granting read access
    async fn signed_url(&self, key: &str, expires_in: Duration) -> Result<String>;
}

/// Process-local object storage for development and tests
#[derive(Clone)]
pub struct InMemoryObjectStorage {
    base_url: String,
    objects: Arc<RwLock<HashMap<String, StoredObject>>>,
}

impl InMemoryObjectStorage {
    pub fn new() -> Self {
        Self::with_base_url("memory://gestor")
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            objects: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored objects
    pub fn len(&self) -> usize {
        self.objects.read().map(|objects| objects.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryObjectStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStorage for InMemoryObjectStorage {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        let mut objects = self
            .objects
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        objects.insert(
            key.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn fetch(&self, key: &str) -> Result<Option<StoredObject>> {
        let objects = self
            .objects
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(objects.get(key).cloned())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut objects = self
            .objects
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        objects.remove(key);
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }

    async fn signed_url(&self, key: &str, expires_in: Duration) -> Result<String> {
        let expires = Utc::now().timestamp() + expires_in.as_secs() as i64;
        Ok(format!("{}?expires={}", self.public_url(key), expires))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_fetch_delete() {
        let storage = InMemoryObjectStorage::new();
        storage
            .put("general/a.txt", b"hola".to_vec(), "text/plain")
            .await
            .unwrap();
        assert_eq!(storage.len(), 1);

        let object = storage.fetch("general/a.txt").await.unwrap().unwrap();
        assert_eq!(object.bytes, b"hola");
        assert_eq!(object.content_type, "text/plain");

        storage.delete("general/a.txt").await.unwrap();
        assert!(storage.fetch("general/a.txt").await.unwrap().is_none());
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_urls() {
        let storage = InMemoryObjectStorage::with_base_url("http://files.local/");
        assert_eq!(storage.public_url("a/b.pdf"), "http://files.local/a/b.pdf");

        let signed = storage
            .signed_url("a/b.pdf", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(signed.starts_with("http://files.local/a/b.pdf?expires="));
    }
}
