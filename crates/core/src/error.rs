use crate::gateway::GatewayError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Caller-supplied input failed validation before any model call.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The inference backend could not produce text.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The model answered, but the answer is unparseable or breaks a rule.
    #[error("Malformed model output: {0}")]
    MalformedOutput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
