//! HTTP gateway server
//!
//! Maps a fixed set of routes onto object store operations:
//! - `OPTIONS` on any path answers the CORS preflight
//! - `POST /upload` stores a multipart-uploaded object
//! - `POST /delete` removes an object named in a JSON body
//! - every other method/path combination serves the object whose key is the
//!   request path with the leading slash stripped
//!
//! The fall-through to serve-by-path is deliberate; the serve handler itself
//! produces the 404 for unknown keys.

pub mod handlers;
pub mod response;

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{DefaultBodyLimit, Request, State},
    http::{Method, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::auth::Credentials;
use crate::store::ObjectStore;

/// Shared state for the gateway
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ObjectStore>,
    pub credentials: Credentials,
    pub max_upload_bytes: usize,
}

/// HTTP gateway in front of a single object store binding
pub struct GatewayServer {
    bind_addr: String,
    state: AppState,
}

impl GatewayServer {
    /// Create a new gateway server
    pub fn new(
        bind_addr: String,
        store: Arc<dyn ObjectStore>,
        credentials: Credentials,
        max_upload_bytes: usize,
    ) -> Self {
        let state = AppState {
            store,
            credentials,
            max_upload_bytes,
        };
        Self { bind_addr, state }
    }

    /// Build the router
    pub fn router(state: AppState) -> Router {
        let max_body = state.max_upload_bytes;
        Router::new()
            // Catch-all routes; dispatch is method/path based
            .route("/", any(handle_any))
            .route("/{*path}", any(handle_any))
            .layer(DefaultBodyLimit::max(max_body))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Start the server (call from a tokio runtime)
    pub async fn run(self) -> std::io::Result<()> {
        let app = Self::router(self.state.clone());

        info!("objectgate listening on {}", self.bind_addr);

        let listener = TcpListener::bind(&self.bind_addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

async fn handle_any(
    State(state): State<AppState>,
    method: Method,
    request: Request,
) -> Response<Body> {
    // The object key is the raw request path minus the leading slash. The
    // captured-segment extractor percent-decodes, so it never touches key
    // derivation; a key uploaded as `a%20b.txt` is fetched as `/a%20b.txt`.
    let raw_path = request.uri().path();
    let path = raw_path.strip_prefix('/').unwrap_or(raw_path).to_string();
    dispatch(state, path, method, request).await
}

/// Classify a request by method and path and hand it to exactly one handler
async fn dispatch(
    state: AppState,
    path: String,
    method: Method,
    request: Request,
) -> Response<Body> {
    if method == Method::OPTIONS {
        return response::preflight();
    }

    if method == Method::POST && path == "upload" {
        handlers::handle_upload(state, request).await
    } else if method == Method::POST && path == "delete" {
        handlers::handle_delete(state, request).await
    } else {
        handlers::handle_serve(state, &path).await
    }
}
