//! In-memory object store
//!
//! Backs unit tests and local development. Objects live in a single map
//! behind an RwLock; nothing survives a restart.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::Result;

use super::{ObjectStore, StoredObject};

/// In-process object store
#[derive(Default)]
pub struct MemoryStore {
    objects: RwLock<HashMap<String, StoredObject>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects
    pub fn len(&self) -> usize {
        self.objects.read().unwrap().len()
    }

    /// Whether the store holds no objects
    pub fn is_empty(&self) -> bool {
        self.objects.read().unwrap().is_empty()
    }
}

/// Entity tag for a payload: quoted hex prefix of the content hash
fn compute_etag(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    format!("\"{}\"", hex::encode(&hash[..16]))
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> Result<()> {
        let object = StoredObject {
            etag: compute_etag(&data),
            content_type: content_type.to_string(),
            body: data,
        };
        debug!("memory put: {} ({} bytes)", key, object.body.len());
        self.objects.write().unwrap().insert(key.to_string(), object);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<StoredObject>> {
        Ok(self.objects.read().unwrap().get(key).cloned())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        // Removing an absent key is a no-op, same as the remote backends
        self.objects.write().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_roundtrip() {
        let store = MemoryStore::new();
        store
            .put("a.txt", Bytes::from_static(b"hello"), "text/plain")
            .await
            .unwrap();

        let object = store.get("a.txt").await.unwrap().unwrap();
        assert_eq!(&object.body[..], b"hello");
        assert_eq!(object.content_type, "text/plain");
        assert!(!object.etag.is_empty());
    }

    #[tokio::test]
    async fn test_get_absent() {
        let store = MemoryStore::new();
        assert!(store.get("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let store = MemoryStore::new();
        store
            .put("k", Bytes::from_static(b"one"), "text/plain")
            .await
            .unwrap();
        store
            .put("k", Bytes::from_static(b"two"), "application/json")
            .await
            .unwrap();

        let object = store.get("k").await.unwrap().unwrap();
        assert_eq!(&object.body[..], b"two");
        assert_eq!(object.content_type, "application/json");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_idempotent() {
        let store = MemoryStore::new();
        store
            .put("k", Bytes::from_static(b"data"), "text/plain")
            .await
            .unwrap();

        store.delete("k").await.unwrap();
        assert!(store.get("k").await.unwrap().is_none());

        // A second delete of the same key succeeds silently
        store.delete("k").await.unwrap();
        store.delete("never-existed").await.unwrap();
    }

    #[test]
    fn test_etag_tracks_content() {
        assert_eq!(compute_etag(b"hello"), compute_etag(b"hello"));
        assert_ne!(compute_etag(b"hello"), compute_etag(b"world"));
        assert!(compute_etag(b"hello").starts_with('"'));
    }
}
