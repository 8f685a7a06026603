//! HTTP API route definitions.

use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeFile, trace::TraceLayer};

use super::handlers::{health, openapi, prometheus_metrics, summarize, AppState};

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let index = ServeFile::new(&state.index_path);

    Router::new()
        // Landing page
        .route_service("/", index)
        // Health endpoint
        .route("/health", get(health))
        // Summarization
        .route("/summarize", post(summarize))
        // Observability
        .route("/metrics", get(prometheus_metrics))
        .route("/api-docs/openapi.json", get(openapi))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Any origin, credentials allowed.
fn cors_layer() -> CorsLayer {
    CorsLayer::very_permissive().max_age(Duration::from_secs(12 * 60 * 60))
}
