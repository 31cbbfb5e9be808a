//! Configuration types for objectgate

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::auth::Credentials;
use crate::error::Result;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Gateway credentials required on upload and delete requests
    #[serde(default)]
    pub credentials: Credentials,

    /// Storage backend settings
    #[serde(default)]
    pub store: StoreConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the HTTP listener
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Maximum accepted request body size in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_bind() -> String {
    "0.0.0.0:8087".to_string()
}

fn default_max_upload_bytes() -> usize {
    512 * 1024 * 1024 // 512MB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// S3-compatible remote store (AWS, R2, MinIO)
    S3,
    /// In-process map, nothing survives a restart. Local development only.
    Memory,
}

/// Storage backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Which backend to use
    #[serde(default = "default_backend")]
    pub backend: StoreBackend,

    /// Bucket name (s3 backend)
    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// Region (s3 backend)
    #[serde(default = "default_region")]
    pub region: String,

    /// Custom endpoint for S3-compatible stores (R2, MinIO). When set, the
    /// region value is only a label.
    pub endpoint: Option<String>,

    /// Backend access key. Distinct from the gateway credentials.
    #[serde(default)]
    pub access_key: String,

    /// Backend secret key
    #[serde(default)]
    pub secret_key: String,
}

fn default_backend() -> StoreBackend {
    StoreBackend::S3
}

fn default_bucket() -> String {
    "objectgate".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            bucket: default_bucket(),
            region: default_region(),
            endpoint: None,
            access_key: String::new(),
            secret_key: String::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            credentials: Credentials::default(),
            store: StoreConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply `ACCESS_KEY` / `SECRET_KEY` environment overrides for the
    /// gateway credentials. The hosting environment supplies secrets this
    /// way in deployments where the config file is checked in.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("ACCESS_KEY") {
            self.credentials.access_key = key;
        }
        if let Ok(key) = std::env::var("SECRET_KEY") {
            self.credentials.secret_key = key;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.bind, "0.0.0.0:8087");
        assert_eq!(config.server.max_upload_bytes, 512 * 1024 * 1024);
        assert_eq!(config.store.backend, StoreBackend::S3);
        assert!(config.store.endpoint.is_none());
    }

    #[test]
    fn test_load_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.credentials.access_key = "AKID".to_string();
        config.credentials.secret_key = "secret".to_string();
        config.store.backend = StoreBackend::Memory;
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.credentials.access_key, "AKID");
        assert_eq!(loaded.store.backend, StoreBackend::Memory);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [credentials]
            access_key = "AKID"
            secret_key = "secret"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:8087");
        assert_eq!(config.credentials.access_key, "AKID");
    }
}
