//! Lume Coach - AI workout recommendations for the Lume sports app
//!
//! Turns a user's health readings, workout history and nearby activities into a
//! prompt, sends it to a generative-text provider, and parses the line-oriented
//! reply into typed suggestions and tips. Any failure degrades to a fixed
//! fallback set, so callers always get something to show.
//!
//! Also includes typed clients for the Lume REST backend (activities, chats,
//! users, quick-match).

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{build_prompt, fallback_response, format_measurement, parse_completion, Unit};
pub use models::{RecommendationRequest, RecommendationResponse, ResponseSource, Suggestion, Tip};
pub use services::{ApiError, BackendClient, CompletionError, CompletionProvider, GeminiClient, Recommender};
