use std::sync::Arc;

use decideroom_core::planner::RoomPlanner;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Layout planner wrapping the injected inference gateway.
    pub planner: RoomPlanner,
}
