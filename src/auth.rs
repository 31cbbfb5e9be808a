//! Gateway authentication
//!
//! Write operations (upload, delete) carry an access key / secret key pair in
//! the request body, checked against the process-wide configured pair. Reads
//! are unauthenticated; anyone who knows an object key can fetch it.

use serde::{Deserialize, Serialize};

/// Gateway credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
}

/// Validate a request's key pair against the configured credentials.
/// Plain string equality on both values; this is a shared-secret check,
/// not request signing.
pub fn check_credentials(access_key: &str, secret_key: &str, credentials: &Credentials) -> bool {
    access_key == credentials.access_key && secret_key == credentials.secret_key
}
