//! Unified error types for the summarization service.

use thiserror::Error;

/// Top-level error type for startup and CLI paths.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Summarization failed.
    #[error("summarize error: {0}")]
    Summarize(#[from] SummarizeError),

    /// HTTP client construction or request error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Reading summarize input failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rejected request payloads. Messages are returned to the caller verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Body did not deserialize or `text` was absent.
    #[error("Text field is required")]
    MissingText,

    /// `text` was empty after trimming.
    #[error("Text cannot be empty")]
    EmptyText,

    /// Fewer than the minimum number of words.
    #[error("Text should be at least {min_words} words long")]
    TooShort {
        /// Required word count.
        min_words: usize,
    },
}

/// Failures interpreting a successful upstream response body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Body was not an array of string maps.
    #[error("Failed to parse Hugging Face response: {0}")]
    InvalidJson(String),

    /// Body was an empty array.
    #[error("Empty response from Hugging Face API")]
    Empty,

    /// First element had no `summary_text`.
    #[error("Invalid response format from Hugging Face API")]
    MissingSummaryText,
}

/// Everything that can end a summarize call.
#[derive(Error, Debug)]
pub enum SummarizeError {
    /// Client sent a bad request.
    #[error(transparent)]
    InvalidInput(#[from] ValidationError),

    /// Strict policy and no token configured.
    #[error("Hugging Face API token is not configured")]
    MissingCredential,

    /// Upstream unreachable after all retry attempts.
    #[error("Failed to connect to Hugging Face API: {0}")]
    Connection(#[source] reqwest::Error),

    /// Upstream answered 503 while the model loads.
    #[error("Model is loading, please try again in a few seconds")]
    ModelLoading,

    /// Upstream answered with another non-success status.
    #[error("Hugging Face API Error: {body}")]
    Upstream {
        /// Upstream HTTP status.
        status: u16,
        /// Raw upstream body.
        body: String,
    },

    /// Upstream answered 2xx with an unusable body.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl SummarizeError {
    /// Short label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::MissingCredential => "configuration",
            Self::Connection(_) => "connection",
            Self::ModelLoading => "service_unavailable",
            Self::Upstream { .. } | Self::Parse(_) => "upstream",
        }
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;
