//! Hugging Face inference API client.

use std::time::Duration;

use reqwest::StatusCode;
use tokio_retry::strategy::FixedInterval;
use tokio_retry::RetryIf;
use tracing::{debug, instrument, warn};

use crate::config::Config;
use crate::error::SummarizeError;
use crate::metrics;

use super::types::{parse_summary, InferenceRequest};

/// Bounded retry policy for transport-level failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: usize,
    /// Delay between consecutive attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::fixed(3, Duration::from_secs(2))
    }
}

impl RetryPolicy {
    /// Fixed delay between at most `max_attempts` attempts.
    pub fn fixed(max_attempts: usize, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Single attempt, no retries.
    pub fn none() -> Self {
        Self::fixed(1, Duration::ZERO)
    }

    /// Delays to wait before each retry.
    pub fn delays(&self) -> impl Iterator<Item = Duration> {
        FixedInterval::new(self.delay).take(self.max_attempts.saturating_sub(1))
    }

    /// Whether a send error is worth another attempt.
    ///
    /// Only failures that never produced an HTTP response qualify.
    pub fn is_retryable(err: &reqwest::Error) -> bool {
        err.is_connect() || err.is_timeout() || err.is_request()
    }
}

/// Client for a hosted summarization model.
#[derive(Debug, Clone)]
pub struct HuggingFaceClient {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Model endpoint.
    url: String,
    /// Retry policy for transport failures.
    retry: RetryPolicy,
}

impl HuggingFaceClient {
    /// Create a client from config.
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .connect_timeout(Duration::from_secs(10))
            .tcp_keepalive(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            url: config.hf_api_url.clone(),
            retry: config.retry_policy(),
        })
    }

    /// Model endpoint.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Retry policy in use.
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Summarize `text` with the hosted model.
    #[instrument(skip_all, fields(url = %self.url, chars = text.len()))]
    pub async fn summarize(&self, token: &str, text: &str) -> Result<String, SummarizeError> {
        let response = self
            .send_with_retry(token, text)
            .await
            .map_err(SummarizeError::Connection)?;

        let status = response.status();

        if status == StatusCode::SERVICE_UNAVAILABLE {
            let body = read_error_body(response).await;
            warn!(body = %body, "Hugging Face model is loading");
            return Err(SummarizeError::ModelLoading);
        }

        if !status.is_success() {
            let body = read_error_body(response).await;
            warn!(status = %status, "Hugging Face API returned an error");
            return Err(SummarizeError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await.map_err(SummarizeError::Connection)?;
        let summary = parse_summary(&body)?;

        debug!(summary_chars = summary.len(), "Received summary");

        Ok(summary)
    }

    async fn send_with_retry(
        &self,
        token: &str,
        text: &str,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let mut attempt = 0usize;

        RetryIf::start(
            self.retry.delays(),
            || {
                attempt += 1;
                self.send_once(token, text, attempt)
            },
            |err: &reqwest::Error| {
                let retry = RetryPolicy::is_retryable(err);
                if retry {
                    warn!(error = %err, "Hugging Face request failed");
                }
                retry
            },
        )
        .await
    }

    async fn send_once(
        &self,
        token: &str,
        text: &str,
        attempt: usize,
    ) -> Result<reqwest::Response, reqwest::Error> {
        if attempt > 1 {
            debug!(attempt, max_attempts = self.retry.max_attempts, "Retrying Hugging Face request");
            metrics::inc_upstream_retries();
        }
        metrics::inc_upstream_attempts();
        let _timer = metrics::timer_upstream_request();

        self.http
            .post(&self.url)
            .bearer_auth(token)
            .json(&InferenceRequest { inputs: text })
            .send()
            .await
    }
}

/// Body of an error response; empty if it cannot be read.
async fn read_error_body(response: reqwest::Response) -> String {
    let status = response.status();
    response.text().await.unwrap_or_else(|e| {
        debug!(status = %status, error = %e, "Failed to read Hugging Face error body");
        String::new()
    })
}
