//! Uplink API
//!
//! HTTP surface for the upload ingest gateway: multipart ingestion, the
//! per-request upload pipeline, and error mapping.

pub mod api_doc;
pub mod error;
pub mod handlers;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod utils;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Whole-request body ceiling. Individual parts are bounded by the policy
/// ceilings while streaming; this only stops pathological request bodies.
const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024 * 1024;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/v0/files", post(handlers::upload::upload_files))
        .route("/api/v0/files/{id}", get(handlers::files::get_file))
        .route("/api/v0/openapi.json", get(api_doc::openapi_json))
        .layer(axum::extract::DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
