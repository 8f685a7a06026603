//! Request, response, and upstream payload types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ParseError;

/// Key holding the generated summary in each upstream result object.
pub const SUMMARY_TEXT_KEY: &str = "summary_text";

/// Inbound summarize request.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct SummarizeRequest {
    /// Text to summarize. At least 10 words.
    #[serde(default)]
    #[schema(value_type = String, example = "The quick brown fox jumps over the lazy dog again and again.")]
    pub text: Option<String>,
}

impl SummarizeRequest {
    /// Create a request for the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

/// Summarize response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct SummarizeResponse {
    /// Generated summary.
    pub summary: String,
}

/// Body sent to the inference endpoint.
#[derive(Debug, Serialize)]
pub struct InferenceRequest<'a> {
    /// Text to summarize.
    pub inputs: &'a str,
}

/// Upstream payload: `[{"summary_text": "..."}, ...]`. Only index 0 is used.
pub type RemoteSummaryResult = Vec<HashMap<String, String>>;

/// Extract the summary from a successful upstream body.
pub fn parse_summary(body: &[u8]) -> Result<String, ParseError> {
    let result: RemoteSummaryResult =
        serde_json::from_slice(body).map_err(|e| ParseError::InvalidJson(e.to_string()))?;

    let mut first = result.into_iter().next().ok_or(ParseError::Empty)?;

    first
        .remove(SUMMARY_TEXT_KEY)
        .ok_or(ParseError::MissingSummaryText)
}
