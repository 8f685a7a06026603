//! Text summarization service backed by the Hugging Face inference API.
//!
//! `POST /summarize` takes `{"text": "..."}` and answers `{"summary": "..."}`.
//! Without an `HF_API_TOKEN` the service either returns a local mock summary
//! (the first 50 words plus a marker) or rejects the request, depending on
//! `CREDENTIAL_POLICY`.
//!
//! ```text
//! client ──► validate ──► token? ──no──► mock summary / 500
//!                            │
//!                           yes
//!                            ▼
//!             POST {"inputs": text} ──► [{"summary_text": "..."}]
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`summarizer`]: Validation, mock summaries, and the upstream client
//! - [`api`]: HTTP API for summarize/health/metrics
//! - [`metrics`]: Prometheus counters and latency histograms
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod summarizer;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result};
