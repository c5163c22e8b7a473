//! Route definitions for the layout assistant.

use axum::routing::post;
use axum::Router;

use crate::handlers::room;
use crate::state::AppState;

/// Layout routes, mounted at the root.
///
/// ```text
/// POST /generate-room        -> generate_room
/// POST /shuffle-arrangement  -> shuffle_arrangement
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate-room", post(room::generate_room))
        .route("/shuffle-arrangement", post(room::shuffle_arrangement))
}
