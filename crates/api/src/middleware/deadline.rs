//! Whole-request deadline.

use std::time::Duration;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use decideroom_core::error::CoreError;
use decideroom_core::gateway::GatewayError;

use crate::error::AppError;

/// Abort a request that runs past `limit`.
///
/// The only slow step in any handler is the model call, so an expired
/// deadline is reported the same way as a gateway timeout: 504 with the
/// standard `{ "error", "code" }` body.
pub async fn enforce_deadline(
    State(limit): State<Duration>,
    request: Request,
    next: Next,
) -> Response {
    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(limit_secs = limit.as_secs(), "Request deadline exceeded");
            AppError::Core(CoreError::Gateway(GatewayError::Timeout(limit))).into_response()
        }
    }
}
