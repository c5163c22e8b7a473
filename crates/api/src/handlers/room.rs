//! Handlers for layout selection and arrangement shuffling.
//!
//! Both endpoints return the bare payload the front end consumes (no
//! `{ "data": ... }` envelope).

use axum::extract::State;
use axum::Json;
use decideroom_core::layout::LayoutDecision;
use decideroom_core::placement::{ArrangementRequest, ArrangementResponse};
use decideroom_core::preferences::Preferences;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::json::JsonBody;
use crate::state::AppState;

/// Body of `POST /generate-room`.
#[derive(Debug, Deserialize)]
pub struct GenerateRoomRequest {
    pub preferences: Preferences,
}

/// POST /generate-room
///
/// Ask the model to pick one of the layout presets for the given preferences.
pub async fn generate_room(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<GenerateRoomRequest>,
) -> AppResult<Json<LayoutDecision>> {
    tracing::info!(
        productivity_goal = %input.preferences.productivity_goal,
        mood = %input.preferences.mood,
        lighting = %input.preferences.lighting,
        "Generating room layout",
    );

    let decision = state.planner.select_layout(&input.preferences).await?;

    Ok(Json(decision))
}

/// POST /shuffle-arrangement
///
/// Ask the model to rearrange the given assets and return the verified result.
pub async fn shuffle_arrangement(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<ArrangementRequest>,
) -> AppResult<Json<ArrangementResponse>> {
    input.validate()?;

    tracing::info!(
        layout_id = %input.layout_id,
        assets = input.arrange.len(),
        "Shuffling arrangement",
    );

    let arrange = state
        .planner
        .shuffle_arrangement(input.layout_id, &input.arrange)
        .await?;

    Ok(Json(ArrangementResponse { arrange }))
}
