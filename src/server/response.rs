//! HTTP response shaping helpers
//!
//! The JSON routes (upload, delete) answer with JSON bodies and a permissive
//! CORS header on success; the serve route answers with raw bytes or fixed
//! plain-text error phrases.

use axum::{
    body::Body,
    http::{header, Response, StatusCode},
};
use serde::Serialize;

/// JSON error body used by the upload and delete routes
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// 200 JSON response with `Access-Control-Allow-Origin: *`
pub fn json_success<T: Serialize>(body: &T) -> Response<Body> {
    let body = serde_json::to_string(body).unwrap_or_else(|_| "{}".to_string());
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .body(Body::from(body))
        .unwrap()
}

/// JSON `{"error": ...}` response
pub fn json_error(status: StatusCode, message: &str) -> Response<Body> {
    let body = serde_json::to_string(&ErrorBody {
        error: message.to_string(),
    })
    .unwrap_or_else(|_| "{}".to_string());
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

/// Plain-text response for serve-route failures
pub fn plain_error(status: StatusCode, message: &'static str) -> Response<Body> {
    Response::builder()
        .status(status)
        .body(Body::from(message))
        .unwrap()
}

/// Empty 200 answering a CORS preflight, for any path
pub fn preflight() -> Response<Body> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .header(header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, DELETE, OPTIONS")
        .header(header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type, Authorization")
        .header(header::ACCESS_CONTROL_MAX_AGE, "86400")
        .body(Body::empty())
        .unwrap()
}
