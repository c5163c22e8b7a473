use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Model used for layout selection.
    pub selection_model: String,
    /// Model used for arrangement shuffles.
    pub arrangement_model: String,
}

/// GET /health -- liveness only; does not call the inference backend.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let models = state.planner.models();
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        selection_model: models.selection.clone(),
        arrangement_model: models.arrangement.clone(),
    })
}

/// Mount health check routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
