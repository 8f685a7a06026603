//! Validate, then mock or call upstream.

use std::fmt;

use tracing::{debug, instrument, warn};

use crate::config::{Config, CredentialPolicy};
use crate::error::SummarizeError;
use crate::metrics;

use super::client::HuggingFaceClient;
use super::mock::mock_summary;
use super::types::{SummarizeRequest, SummarizeResponse};
use super::validate::validate;

/// Summarization request handler.
///
/// Built once from [`Config`] and shared read-only between requests.
#[derive(Clone)]
pub struct Summarizer {
    client: HuggingFaceClient,
    token: Option<String>,
    policy: CredentialPolicy,
}

impl fmt::Debug for Summarizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Summarizer")
            .field("client", &self.client)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("policy", &self.policy)
            .finish()
    }
}

impl Summarizer {
    /// Create a summarizer from config.
    pub fn new(config: &Config) -> crate::Result<Self> {
        Ok(Self {
            client: HuggingFaceClient::new(config)?,
            token: config.api_token().map(str::to_string),
            policy: config.credential_policy,
        })
    }

    /// Whether an upstream token is configured.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Policy applied when no token is configured.
    pub fn policy(&self) -> CredentialPolicy {
        self.policy
    }

    /// Summarize a request.
    #[instrument(skip_all, fields(policy = %self.policy, token = self.has_token()))]
    pub async fn summarize(
        &self,
        request: &SummarizeRequest,
    ) -> Result<SummarizeResponse, SummarizeError> {
        let text = validate(request)?;

        let Some(token) = self.token.as_deref() else {
            return match self.policy {
                CredentialPolicy::Mock => {
                    debug!("No token configured, returning mock summary");
                    metrics::inc_mock_summaries();
                    Ok(SummarizeResponse {
                        summary: mock_summary(text),
                    })
                }
                CredentialPolicy::Strict => {
                    warn!("No token configured, rejecting request");
                    Err(SummarizeError::MissingCredential)
                }
            };
        };

        let summary = self.client.summarize(token, text).await?;

        Ok(SummarizeResponse { summary })
    }
}
