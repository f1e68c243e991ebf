//! # relay_core
//!
//! Core logic for the assistant relay: the remote assistant API client and
//! the orchestrator that drives a conversation turn to completion.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod pricing;
pub mod render;

pub use client::AssistantApi;
pub use error::{RelayError, RelayResult};
pub use orchestrator::{ConversationRequest, Orchestrator, Reply};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
