//! S3-compatible object store backend
//!
//! Talks to any store speaking the S3 wire protocol (AWS S3, Cloudflare R2,
//! MinIO) through the `rust-s3` client. A custom endpoint in the config
//! selects the R2/MinIO style of addressing; otherwise the region is parsed
//! as a standard AWS region.

use async_trait::async_trait;
use bytes::Bytes;
use s3::creds::Credentials;
use s3::error::S3Error;
use s3::region::Region;
use s3::Bucket;
use tracing::debug;

use crate::config::StoreConfig;
use crate::error::{Error, Result};

use super::{ObjectStore, StoredObject};

/// Object store backed by a remote S3-compatible bucket
pub struct S3Store {
    bucket: Box<Bucket>,
}

impl S3Store {
    /// Build a client for the configured bucket
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let region = match &config.endpoint {
            Some(endpoint) => Region::Custom {
                region: config.region.clone(),
                endpoint: endpoint.clone(),
            },
            None => config
                .region
                .parse()
                .map_err(|e| Error::Config(format!("invalid region '{}': {}", config.region, e)))?,
        };

        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| Error::Config(format!("invalid store credentials: {}", e)))?;

        let mut bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| Error::Config(format!("failed to create bucket client: {}", e)))?;

        // Custom endpoints (R2, MinIO) generally require path-style addressing
        if config.endpoint.is_some() {
            bucket = bucket.with_path_style();
        }

        Ok(Self { bucket })
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> Result<()> {
        self.bucket
            .put_object_with_content_type(key, &data, content_type)
            .await
            .map_err(|e| Error::Store(e.to_string()))?;
        debug!("s3 put: {} ({} bytes)", key, data.len());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<StoredObject>> {
        let response = match self.bucket.get_object(key).await {
            Ok(r) => r,
            Err(S3Error::HttpFailWithBody(404, _)) => return Ok(None),
            Err(e) => return Err(Error::Store(e.to_string())),
        };

        let headers = response.headers();
        let content_type = headers
            .get("content-type")
            .cloned()
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let etag = headers.get("etag").cloned().unwrap_or_default();

        Ok(Some(StoredObject {
            body: Bytes::from(response.bytes().to_vec()),
            content_type,
            etag,
        }))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        match self.bucket.delete_object(key).await {
            Ok(_) => Ok(()),
            // Absent keys delete silently, matching the rest of the trait
            Err(S3Error::HttpFailWithBody(404, _)) => Ok(()),
            Err(e) => Err(Error::Store(e.to_string())),
        }
    }
}
