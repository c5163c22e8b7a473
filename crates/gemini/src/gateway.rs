//! [`InferenceGateway`] backed by the Gemini REST API.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use decideroom_core::gateway::{GatewayError, InferenceGateway, InferenceRequest};

use crate::api::{GeminiApi, GeminiApiError};
use crate::retry::{next_delay, RetryConfig};
use crate::types::GenerateContentRequest;

/// Default API root for the public Gemini endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Connection settings for [`GeminiGateway`].
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    /// Deadline for a single attempt.
    pub timeout: Duration,
    pub retry: RetryConfig,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            retry: RetryConfig::default(),
        }
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("retry", &self.retry)
            .finish()
    }
}

/// Process-wide Gemini handle. Safe to share; holds a pooled HTTP client.
pub struct GeminiGateway {
    api: GeminiApi,
    timeout: Duration,
    retry: RetryConfig,
}

impl From<GeminiApiError> for GatewayError {
    fn from(err: GeminiApiError) -> Self {
        match err {
            GeminiApiError::Request(e) if e.is_timeout() => GatewayError::Transport(format!(
                "request timed out: {}",
                e.without_url()
            )),
            GeminiApiError::Request(e) => GatewayError::Transport(e.without_url().to_string()),
            GeminiApiError::ApiError { status, body } => GatewayError::Api { status, body },
        }
    }
}

impl GeminiGateway {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            api: GeminiApi::new(config.base_url, config.api_key),
            timeout: config.timeout,
            retry: config.retry,
        }
    }

    /// One attempt, bounded by the per-attempt timeout.
    async fn attempt(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<String, GatewayError> {
        let response = tokio::time::timeout(self.timeout, self.api.generate_content(model, body))
            .await
            .map_err(|_| GatewayError::Timeout(self.timeout))??;

        response
            .text()
            .ok_or_else(|| GatewayError::EmptyResponse(response.empty_reason()))
    }
}

#[async_trait]
impl InferenceGateway for GeminiGateway {
    async fn generate(&self, request: InferenceRequest<'_>) -> Result<String, GatewayError> {
        let body = GenerateContentRequest::single_turn(request.system_instruction, request.content);
        let max_attempts = self.retry.max_attempts.max(1);
        let mut delay = self.retry.initial_delay;
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            match self.attempt(request.model, &body).await {
                Ok(text) => {
                    tracing::debug!(model = request.model, attempt, "Gemini call succeeded");
                    return Ok(text);
                }
                Err(e) if e.is_transient() && attempt < max_attempts => {
                    tracing::warn!(
                        model = request.model,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Gemini call failed, retrying",
                    );
                    tokio::time::sleep(delay).await;
                    delay = next_delay(delay, &self.retry);
                }
                Err(e) if e.is_transient() && max_attempts > 1 => {
                    tracing::error!(model = request.model, attempt, error = %e, "Gemini retries exhausted");
                    return Err(GatewayError::RetriesExhausted {
                        attempts: attempt,
                        last: Box::new(e),
                    });
                }
                Err(e) => {
                    tracing::error!(model = request.model, attempt, error = %e, "Gemini call failed");
                    return Err(e);
                }
            }
        }
    }
}
