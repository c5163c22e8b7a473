//! The seam between domain logic and the hosted language model.
//!
//! Handlers never talk to the backend directly; they go through an
//! `Arc<dyn InferenceGateway>` held in application state, which lets tests
//! substitute a canned implementation.

use std::time::Duration;

use async_trait::async_trait;

/// One text-generation call.
#[derive(Debug, Clone, Copy)]
pub struct InferenceRequest<'a> {
    /// Backend model variant, e.g. `gemini-2.0-flash`.
    pub model: &'a str,
    /// Optional system instruction.
    pub system_instruction: Option<&'a str>,
    /// User content.
    pub content: &'a str,
}

/// Errors from the inference backend.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The request never completed (network, DNS, TLS, body decoding).
    #[error("inference request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("inference backend error ({status}): {body}")]
    Api { status: u16, body: String },

    /// No answer within the configured deadline.
    #[error("inference call timed out after {0:?}")]
    Timeout(Duration),

    /// The backend answered but produced no text (blocked, empty candidates).
    #[error("inference backend returned no text: {0}")]
    EmptyResponse(String),

    /// Every retry attempt failed; carries the last failure.
    #[error("inference failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        attempts: u32,
        last: Box<GatewayError>,
    },
}

impl GatewayError {
    /// Whether a fresh attempt might succeed.
    ///
    /// Rate limiting and server-side errors are transient; other 4xx
    /// statuses mean the request itself is wrong.
    pub fn is_transient(&self) -> bool {
        match self {
            GatewayError::Transport(_) | GatewayError::Timeout(_) => true,
            GatewayError::Api { status, .. } => *status == 429 || *status >= 500,
            GatewayError::EmptyResponse(_) | GatewayError::RetriesExhausted { .. } => false,
        }
    }

    /// Whether the failure was ultimately a deadline being hit.
    pub fn is_timeout(&self) -> bool {
        match self {
            GatewayError::Timeout(_) => true,
            GatewayError::RetriesExhausted { last, .. } => last.is_timeout(),
            _ => false,
        }
    }
}

#[async_trait]
pub trait InferenceGateway: Send + Sync {
    /// Perform one generation call and return the raw text output.
    async fn generate(&self, request: InferenceRequest<'_>) -> Result<String, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_and_server_errors_are_transient() {
        for status in [429, 500, 503] {
            let err = GatewayError::Api {
                status,
                body: String::new(),
            };
            assert!(err.is_transient(), "{status} should be transient");
        }
    }

    #[test]
    fn client_errors_are_not_transient() {
        for status in [400, 401, 403, 404] {
            let err = GatewayError::Api {
                status,
                body: String::new(),
            };
            assert!(!err.is_transient(), "{status} should not be transient");
        }
        assert!(!GatewayError::EmptyResponse("SAFETY".into()).is_transient());
    }

    #[test]
    fn exhausted_timeouts_report_as_timeout() {
        let err = GatewayError::RetriesExhausted {
            attempts: 3,
            last: Box::new(GatewayError::Timeout(Duration::from_secs(5))),
        };
        assert!(err.is_timeout());
        assert!(err.to_string().contains("after 3 attempts"));
    }
}
