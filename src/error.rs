//! Error types for objectgate

use axum::http::StatusCode;
use thiserror::Error;

/// Result type alias using objectgate Error
pub type Result<T> = std::result::Result<T, Error>;

/// objectgate error types
#[derive(Error, Debug)]
pub enum Error {
    /// A required request field is absent or empty
    #[error("Missing required parameters")]
    MissingParameters,

    /// Gateway access/secret key mismatch
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Object not found in the store
    #[error("Not Found")]
    NotFound,

    /// Storage backend failure
    #[error("Storage error: {0}")]
    Store(String),

    /// Request body could not be read or parsed
    #[error("Failed to read request body: {0}")]
    BodyRead(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

impl Error {
    /// Map an error kind to the HTTP status it surfaces as.
    ///
    /// Every handler converts errors to responses through this single lookup
    /// rather than ad hoc match arms, so the taxonomy stays in one place.
    pub fn status(&self) -> StatusCode {
        match self {
            Error::MissingParameters => StatusCode::BAD_REQUEST,
            Error::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Error::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(Error::MissingParameters.status(), StatusCode::BAD_REQUEST);
        assert_eq!(Error::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(Error::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            Error::Store("backend down".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            Error::BodyRead("truncated multipart".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_fixed_messages() {
        // The 400/401 bodies are part of the HTTP contract
        assert_eq!(
            Error::MissingParameters.to_string(),
            "Missing required parameters"
        );
        assert_eq!(Error::InvalidCredentials.to_string(), "Invalid credentials");
    }
}
