use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use decideroom_core::error::CoreError;
use decideroom_core::gateway::GatewayError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `decideroom_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Gateway(err) => classify_gateway_error(err),
                CoreError::MalformedOutput(msg) => {
                    tracing::error!(error = %msg, "Model output rejected");
                    (
                        StatusCode::BAD_GATEWAY,
                        "MALFORMED_MODEL_OUTPUT",
                        "The layout assistant returned an unusable answer".to_string(),
                    )
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a gateway failure into an HTTP status, error code, and message.
///
/// - Deadline hits (including exhausted retries that ended on one) map to 504.
/// - Everything else maps to 502 with a sanitized message.
fn classify_gateway_error(err: &GatewayError) -> (StatusCode, &'static str, String) {
    tracing::error!(error = %err, "Inference gateway failure");
    if err.is_timeout() {
        (
            StatusCode::GATEWAY_TIMEOUT,
            "GATEWAY_TIMEOUT",
            "The layout assistant did not respond in time".to_string(),
        )
    } else {
        (
            StatusCode::BAD_GATEWAY,
            "GATEWAY_ERROR",
            "The layout assistant is unavailable".to_string(),
        )
    }
}
