//! Object store backends
//!
//! The gateway performs exactly three storage operations: put, get, delete,
//! all keyed by caller-supplied strings. Keys carry no namespacing and no
//! uniqueness enforcement, last write wins.

pub mod memory;
pub mod s3;

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::config::{StoreBackend, StoreConfig};
use crate::error::Result;

pub use self::memory::MemoryStore;
pub use self::s3::S3Store;

/// An object fetched from the store: the payload plus the metadata the
/// gateway copies onto the HTTP response.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub body: Bytes,
    pub content_type: String,
    pub etag: String,
}

/// Capability interface over the backing object store
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `data` under `key`, tagged with `content_type`. Overwrites any
    /// existing object under the same key.
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> Result<()>;

    /// Fetch the object under `key`, or `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<StoredObject>>;

    /// Delete the object under `key`. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;
}

/// Construct the configured backend
pub fn build_store(config: &StoreConfig) -> Result<Arc<dyn ObjectStore>> {
    match config.backend {
        StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
        StoreBackend::S3 => Ok(Arc::new(S3Store::new(config)?)),
    }
}
