//! REST client for the Gemini HTTP endpoints.
//!
//! Wraps `POST {base}/models/{model}:generateContent` using [`reqwest`].
//! The API key travels in the `x-goog-api-key` header so it never appears
//! in URLs or error messages.

use crate::types::{GenerateContentRequest, GenerateContentResponse};

/// Upper bound on the error body kept in [`GeminiApiError::ApiError`].
const MAX_ERROR_BODY_CHARS: usize = 512;

/// HTTP client for the Gemini REST API.
pub struct GeminiApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Errors from the Gemini REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum GeminiApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Gemini returned a non-2xx status code.
    #[error("Gemini API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated, for debugging.
        body: String,
    },
}

impl GeminiApi {
    /// Create a new API client.
    ///
    /// * `base_url` - API root, e.g. `https://generativelanguage.googleapis.com/v1beta`.
    pub fn new(base_url: String, api_key: String) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, api_key)
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Full `generateContent` URL for a model.
    pub fn endpoint(&self, model: &str) -> String {
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!("{}/models/{model}:generateContent", self.base_url)
    }

    /// Run a single `generateContent` call.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiApiError> {
        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        Ok(response.json::<GenerateContentResponse>().await?)
    }

    /// Return the response unchanged on success, or an
    /// [`GeminiApiError::ApiError`] with the status and body on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, GeminiApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GeminiApiError::ApiError {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }
        Ok(response)
    }
}
