//! Placard preview server library logic.
//!
//! The preview server is the transport collaborator between a frame
//! client and the frame hosts it interacts with: it forwards action
//! bodies as interaction payloads, captures redirects without following
//! them, and stores every interaction outcome under an opaque result id
//! so the client's history stack can replay it later.

pub mod api;
pub mod config;
pub mod store;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use store::ResultStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Maximum request body size (256 KiB). Action bodies are small; this
/// protects against OOM from oversized payloads.
const MAX_REQUEST_BODY_BYTES: usize = 256 * 1024;

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Stored interaction results.
    pub store: ResultStore,
    /// Client for plain action proxying.
    pub http: reqwest::Client,
    /// Client for redirect capture; never follows redirects so a `302`
    /// and its `Location` header reach the envelope intact.
    pub redirect_http: reqwest::Client,
}

impl AppState {
    /// Builds the shared state with both outbound clients configured for
    /// the given per-request timeout.
    pub fn new(request_timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;
        let redirect_http = reqwest::Client::builder()
            .timeout(request_timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self {
            store: ResultStore::new(),
            http,
            redirect_http,
        })
    }
}

/// Health check handler.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/frames/action", post(api::post_action_handler))
        .route("/api/frames/redirect", post(api::post_redirect_handler))
        .route("/api/frames/{id}", get(api::get_result_handler))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(Arc::new(state)))
}

/// Initializes tracing from the logging configuration.
pub fn init_tracing(config: &config::LoggingConfig) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn health_check_returns_ok() {
        let state = AppState::new(Duration::from_secs(1)).unwrap();
        let app = app(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }
}
