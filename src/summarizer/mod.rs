//! Summarization request handling.
//!
//! This module handles:
//! - Request/response types and the upstream wire format
//! - Input validation
//! - Local mock summaries when no token is configured
//! - The Hugging Face inference client with bounded retries

pub mod client;
pub mod handler;
pub mod mock;
pub mod types;
pub mod validate;

pub use client::{HuggingFaceClient, RetryPolicy};
pub use handler::Summarizer;
pub use mock::mock_summary;
pub use types::{parse_summary, RemoteSummaryResult, SummarizeRequest, SummarizeResponse};
pub use validate::validate;
