//! Request handlers
//!
//! Three operations map onto the object store: upload (multipart form),
//! delete (JSON body), and serve (any other request, path as object key).
//! Each performs a single store call and converts any error to an HTTP
//! response at its boundary; nothing propagates past a handler.

use axum::{
    body::Body,
    extract::{FromRequest, Multipart, Request},
    http::{header, Response, StatusCode},
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::auth::check_credentials;
use crate::error::{Error, Result};

use super::response::{json_error, json_success, plain_error};
use super::AppState;

/// Success body for POST /upload
#[derive(Debug, Serialize)]
struct UploadResponse {
    success: bool,
    key: String,
    url: String,
}

/// Success body for POST /delete
#[derive(Debug, Serialize)]
struct DeleteResponse {
    success: bool,
    key: String,
}

/// Request body for POST /delete. Every field is optional at the serde level
/// so a missing field surfaces as the 400 contract instead of a
/// deserialization failure.
#[derive(Debug, Deserialize)]
struct DeleteRequest {
    key: Option<String>,
    #[serde(rename = "accessKey")]
    access_key: Option<String>,
    #[serde(rename = "secretKey")]
    secret_key: Option<String>,
    bucket: Option<String>,
}

/// Require a present, non-empty string field
fn require(value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::MissingParameters),
    }
}

// ─── Upload ──────────────────────────────────────────────────────────────────

/// Fields collected from the multipart form
#[derive(Default)]
struct UploadForm {
    file: Option<(Bytes, String)>,
    key: Option<String>,
    access_key: Option<String>,
    secret_key: Option<String>,
    bucket: Option<String>,
}

/// POST /upload
pub async fn handle_upload(state: AppState, request: Request) -> Response<Body> {
    // The host header feeds the public URL in the success body
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let multipart = match Multipart::from_request(request, &()).await {
        Ok(m) => m,
        // A body that is not multipart at all is a parse failure, not a
        // missing-field failure
        Err(e) => return json_error(StatusCode::INTERNAL_SERVER_ERROR, &e.body_text()),
    };

    match upload(&state, &host, multipart).await {
        Ok(response) => response,
        Err(e) => json_error(e.status(), &e.to_string()),
    }
}

async fn upload(state: &AppState, host: &str, mut multipart: Multipart) -> Result<Response<Body>> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::BodyRead(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| Error::BodyRead(e.to_string()))?;
                form.file = Some((data, content_type));
            }
            "key" => form.key = Some(field.text().await.map_err(|e| Error::BodyRead(e.to_string()))?),
            "accessKey" => {
                form.access_key =
                    Some(field.text().await.map_err(|e| Error::BodyRead(e.to_string()))?);
            }
            "secretKey" => {
                form.secret_key =
                    Some(field.text().await.map_err(|e| Error::BodyRead(e.to_string()))?);
            }
            "bucket" => {
                form.bucket = Some(field.text().await.map_err(|e| Error::BodyRead(e.to_string()))?);
            }
            _ => {}
        }
    }

    // An uploaded file counts as present even when its payload is empty; the
    // string fields must be present and non-empty
    let (data, content_type) = form.file.ok_or(Error::MissingParameters)?;
    let key = require(form.key)?;
    let access_key = require(form.access_key)?;
    let secret_key = require(form.secret_key)?;
    // Accepted in the contract but never used to select a destination; a
    // single store binding always receives the object
    let _bucket = require(form.bucket)?;

    if !check_credentials(&access_key, &secret_key, &state.credentials) {
        return Err(Error::InvalidCredentials);
    }

    state.store.put(&key, data, &content_type).await?;

    info!("uploaded object '{}' ({})", key, content_type);

    let url = format!("https://{}/{}", host, key);
    Ok(json_success(&UploadResponse {
        success: true,
        key,
        url,
    }))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// POST /delete
pub async fn handle_delete(state: AppState, request: Request) -> Response<Body> {
    match delete(&state, request).await {
        Ok(response) => response,
        Err(e) => json_error(e.status(), &e.to_string()),
    }
}

async fn delete(state: &AppState, request: Request) -> Result<Response<Body>> {
    let body = axum::body::to_bytes(request.into_body(), state.max_upload_bytes)
        .await
        .map_err(|e| Error::BodyRead(e.to_string()))?;
    let request: DeleteRequest =
        serde_json::from_slice(&body).map_err(|e| Error::BodyRead(e.to_string()))?;

    let key = require(request.key)?;
    let access_key = require(request.access_key)?;
    let secret_key = require(request.secret_key)?;
    let _bucket = require(request.bucket)?;

    if !check_credentials(&access_key, &secret_key, &state.credentials) {
        return Err(Error::InvalidCredentials);
    }

    // The store's delete is idempotent: removing an absent key is
    // indistinguishable from removing a present one
    state.store.delete(&key).await?;

    info!("deleted object '{}'", key);

    Ok(json_success(&DeleteResponse { success: true, key }))
}

// ─── Serve ───────────────────────────────────────────────────────────────────

/// Any request that is not a preflight, upload, or delete. The path with the
/// leading slash stripped is the object key; no decoding or normalization
/// beyond that. Reads are unauthenticated.
pub async fn handle_serve(state: AppState, key: &str) -> Response<Body> {
    match serve(&state, key).await {
        Ok(response) => response,
        Err(Error::NotFound) => plain_error(StatusCode::NOT_FOUND, "Not Found"),
        Err(e) => {
            error!("failed to serve object '{}': {}", key, e);
            plain_error(e.status(), "Internal Server Error")
        }
    }
}

async fn serve(state: &AppState, key: &str) -> Result<Response<Body>> {
    let object = state.store.get(key).await?.ok_or(Error::NotFound)?;

    debug!("serving object '{}' ({} bytes)", key, object.body.len());

    // Objects are treated as immutable once served; there is no cache
    // invalidation path
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, object.content_type.as_str())
        .header(header::ETAG, object.etag.as_str())
        .header(header::CACHE_CONTROL, "public, max-age=31536000")
        .body(Body::from(object.body))
        // Stored metadata that is not a valid header value
        .map_err(|e| Error::Store(e.to_string()))
}
