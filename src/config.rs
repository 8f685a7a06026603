//! Application configuration loaded from environment variables.

use std::time::Duration;

use serde::Deserialize;
use strum::{Display, EnumString};
use url::Url;

use crate::error::AppError;
use crate::summarizer::RetryPolicy;

/// Hosted BART summarization model on the Hugging Face inference API.
pub const DEFAULT_HF_API_URL: &str =
    "https://api-inference.huggingface.co/models/facebook/bart-large-cnn";

/// Log filter used when verbose logging is on.
pub const VERBOSE_LOG_FILTER: &str = "concise_news=debug,info";

/// What to do when no upstream credential is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CredentialPolicy {
    /// Synthesize a local mock summary.
    #[default]
    Mock,
    /// Fail the request with a configuration error.
    Strict,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Upstream ===
    /// Hugging Face API token. Empty counts as unset.
    #[serde(default)]
    pub hf_api_token: Option<String>,

    /// Summarization endpoint.
    #[serde(default = "default_hf_api_url")]
    pub hf_api_url: String,

    /// Behavior when `hf_api_token` is missing.
    #[serde(default)]
    pub credential_policy: CredentialPolicy,

    /// Per-attempt timeout for the upstream call.
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Total attempts on transport failure.
    #[serde(default = "default_retry_max_attempts")]
    pub retry_max_attempts: usize,

    /// Fixed delay between attempts.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    // === Server Configuration ===
    /// HTTP listen port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Landing page served at `/`.
    #[serde(default = "default_index_path")]
    pub index_path: String,

    /// Install the Prometheus recorder and serve `/metrics`.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_hf_api_url() -> String {
    DEFAULT_HF_API_URL.to_string()
}

fn default_http_timeout_secs() -> u64 {
    30
}

fn default_retry_max_attempts() -> usize {
    3
}

fn default_retry_delay_ms() -> u64 {
    2000
}

fn default_port() -> u16 {
    8090
}

fn default_index_path() -> String {
    "./index.html".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn invalid(reason: &str) -> AppError {
    AppError::InvalidConfig(reason.to_string())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hf_api_token: None,
            hf_api_url: default_hf_api_url(),
            credential_policy: CredentialPolicy::default(),
            http_timeout_secs: default_http_timeout_secs(),
            retry_max_attempts: default_retry_max_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
            port: default_port(),
            index_path: default_index_path(),
            metrics_enabled: default_true(),
            rust_log: default_log_level(),
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> crate::Result<()> {
        if self.http_timeout_secs == 0 {
            return Err(invalid("HTTP_TIMEOUT_SECS must be greater than 0"));
        }

        if self.retry_max_attempts == 0 {
            return Err(invalid("RETRY_MAX_ATTEMPTS must be at least 1"));
        }

        if self.port == 0 {
            return Err(invalid("PORT must be non-zero"));
        }

        let url = Url::parse(&self.hf_api_url)
            .map_err(|e| AppError::InvalidConfig(format!("HF_API_URL is not a valid URL: {}", e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("HF_API_URL must use http or https"));
        }

        if url.host_str().map_or(true, str::is_empty) {
            return Err(invalid("HF_API_URL must include a host"));
        }

        Ok(())
    }

    /// Tracing filter directive: debug for this crate when verbose, else `RUST_LOG`.
    pub fn log_filter(&self, force_verbose: bool) -> &str {
        if force_verbose || self.verbose {
            VERBOSE_LOG_FILTER
        } else {
            &self.rust_log
        }
    }

    /// The configured token, treating an empty string as absent.
    pub fn api_token(&self) -> Option<&str> {
        self.hf_api_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }

    /// Whether a usable token is configured.
    pub fn has_token(&self) -> bool {
        self.api_token().is_some()
    }

    /// Per-attempt upstream timeout.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Retry policy for the upstream call.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::fixed(
            self.retry_max_attempts,
            Duration::from_millis(self.retry_delay_ms),
        )
    }
}
