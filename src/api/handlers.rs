//! HTTP API handlers.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use tracing::debug;
use utoipa::{OpenApi, ToSchema};

use crate::config::Config;
use crate::error::{SummarizeError, ValidationError};
use crate::metrics;
use crate::summarizer::{SummarizeRequest, SummarizeResponse, Summarizer};

use super::errors::ErrorBody;
use super::openapi::ApiDoc;

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Summarization request handler.
    pub summarizer: Arc<Summarizer>,
    /// Landing page file.
    pub index_path: PathBuf,
    /// Prometheus handle when metrics are enabled.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state from config.
    pub fn new(config: &Config) -> crate::Result<Self> {
        Ok(Self {
            summarizer: Arc::new(Summarizer::new(config)?),
            index_path: PathBuf::from(&config.index_path),
            metrics: None,
        })
    }

    /// Attach a Prometheus handle for `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// "ok", or "ok_no_token" when no Hugging Face token is configured.
    #[schema(value_type = String)]
    pub status: &'static str,
}

/// Health check handler - always returns 200.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Meta",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let status = if state.summarizer.has_token() {
        "ok"
    } else {
        "ok_no_token"
    };

    Json(HealthResponse { status })
}

/// Summarize handler.
#[utoipa::path(
    post,
    path = "/summarize",
    tag = "Summarize",
    request_body = SummarizeRequest,
    responses(
        (status = 200, description = "Summary", body = SummarizeResponse),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 500, description = "Upstream or configuration failure", body = ErrorBody),
        (status = 503, description = "Model is loading", body = ErrorBody)
    )
)]
pub async fn summarize(
    State(state): State<AppState>,
    payload: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Result<Json<SummarizeResponse>, SummarizeError> {
    let _timer = metrics::timer_summarize();

    let Json(request) = payload.map_err(|rejection| {
        debug!(rejection = %rejection, "Rejected summarize payload");
        metrics::inc_summarize_requests("invalid_input");
        ValidationError::MissingText
    })?;

    let result = state.summarizer.summarize(&request).await;

    metrics::inc_summarize_requests(match &result {
        Ok(_) => "ok",
        Err(e) => e.kind(),
    });

    result.map(Json)
}

/// Prometheus scrape handler.
pub async fn prometheus_metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorBody::new("Metrics are disabled")),
        )
            .into_response(),
    }
}

/// OpenAPI document handler.
pub async fn openapi() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
