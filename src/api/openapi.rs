//! OpenAPI document for the public endpoints.

use utoipa::OpenApi;

use super::errors::ErrorBody;
use super::handlers::HealthResponse;
use crate::summarizer::{SummarizeRequest, SummarizeResponse};

#[derive(OpenApi)]
#[openapi(
    paths(crate::api::handlers::health, crate::api::handlers::summarize),
    components(schemas(SummarizeRequest, SummarizeResponse, ErrorBody, HealthResponse)),
    tags(
        (name = "Meta", description = "Service health"),
        (name = "Summarize", description = "Text summarization")
    )
)]
pub struct ApiDoc;
