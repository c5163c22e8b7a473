//! Domain logic for the DecideRoom layout service.
//!
//! Everything between the HTTP surface and the inference backend lives
//! here: the preference encoder, the prompt templates, the response
//! extractor with its invariant checks, and the [`planner::RoomPlanner`]
//! that chains them around an injected [`gateway::InferenceGateway`].

pub mod arrangement;
pub mod error;
pub mod extract;
pub mod gateway;
pub mod layout;
pub mod placement;
pub mod planner;
pub mod preferences;
pub mod prompts;
