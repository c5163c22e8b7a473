//! Google Gemini REST client for the DecideRoom service.
//!
//! Provides the `generateContent` wire types, a thin HTTP wrapper, the
//! retry/backoff policy, and the [`GeminiGateway`] that implements
//! [`decideroom_core::gateway::InferenceGateway`].

pub mod api;
pub mod gateway;
pub mod retry;
pub mod types;

pub use gateway::{GeminiConfig, GeminiGateway};
