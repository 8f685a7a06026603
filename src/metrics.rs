//! Prometheus metrics for request outcomes and upstream latency.
//!
//! This module provides:
//! - Summarize request counts by outcome
//! - Mock summary counts
//! - Upstream attempt/retry counts
//! - End-to-end and upstream latency histograms

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// Summarize handler latency metric name.
pub const METRIC_SUMMARIZE_LATENCY: &str = "summarize_latency_ms";
/// Upstream request latency metric name.
pub const METRIC_UPSTREAM_LATENCY: &str = "upstream_request_latency_ms";
/// Summarize requests counter metric name.
pub const METRIC_SUMMARIZE_REQUESTS: &str = "summarize_requests_total";
/// Mock summaries counter metric name.
pub const METRIC_MOCK_SUMMARIES: &str = "mock_summaries_total";
/// Upstream attempts counter metric name.
pub const METRIC_UPSTREAM_ATTEMPTS: &str = "upstream_attempts_total";
/// Upstream retries counter metric name.
pub const METRIC_UPSTREAM_RETRIES: &str = "upstream_retries_total";

/// Initialize all metric descriptions.
/// Call this once at startup, after installing a recorder.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_SUMMARIZE_LATENCY,
        "End-to-end summarize handler latency in milliseconds"
    );
    describe_histogram!(
        METRIC_UPSTREAM_LATENCY,
        "Hugging Face request latency in milliseconds"
    );

    describe_counter!(
        METRIC_SUMMARIZE_REQUESTS,
        "Total summarize requests by outcome"
    );
    describe_counter!(
        METRIC_MOCK_SUMMARIES,
        "Total mock summaries returned"
    );
    describe_counter!(
        METRIC_UPSTREAM_ATTEMPTS,
        "Total requests sent to the Hugging Face API"
    );
    describe_counter!(
        METRIC_UPSTREAM_RETRIES,
        "Total retried requests to the Hugging Face API"
    );

    debug!("Metrics initialized");
}

/// Install the global Prometheus recorder and describe metrics.
pub fn install_prometheus() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Increment summarize requests counter for an outcome.
pub fn inc_summarize_requests(outcome: &'static str) {
    counter!(METRIC_SUMMARIZE_REQUESTS, "outcome" => outcome).increment(1);
}

/// Increment mock summaries counter.
pub fn inc_mock_summaries() {
    counter!(METRIC_MOCK_SUMMARIES).increment(1);
}

/// Increment upstream attempts counter.
pub fn inc_upstream_attempts() {
    counter!(METRIC_UPSTREAM_ATTEMPTS).increment(1);
}

/// Increment upstream retries counter.
pub fn inc_upstream_retries() {
    counter!(METRIC_UPSTREAM_RETRIES).increment(1);
}

/// RAII guard for timing operations.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    metric_name: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given metric.
    pub fn new(metric_name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            metric_name,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        histogram!(self.metric_name).record(self.elapsed_ms());
    }
}

/// Create a latency timer for the summarize handler.
pub fn timer_summarize() -> LatencyTimer {
    LatencyTimer::new(METRIC_SUMMARIZE_LATENCY)
}

/// Create a latency timer for one upstream request.
pub fn timer_upstream_request() -> LatencyTimer {
    LatencyTimer::new(METRIC_UPSTREAM_LATENCY)
}
