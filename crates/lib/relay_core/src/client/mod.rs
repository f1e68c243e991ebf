// @awa-component: RLY-AssistantApi
//
//! Remote assistant API.
//!
//! The orchestrator only talks to the remote service through [`AssistantApi`],
//! so the HTTP client can be swapped for an in-memory fake in tests.

pub mod openai;

use async_trait::async_trait;

use crate::error::RelayResult;
use crate::models::{Assistant, Message, MessageList, Run, Thread};

pub use openai::OpenAiClient;

/// Operations the relay needs from the remote assistant service.
#[async_trait]
pub trait AssistantApi: Send + Sync {
    async fn retrieve_assistant(&self, assistant_id: &str) -> RelayResult<Assistant>;

    async fn create_thread(&self) -> RelayResult<Thread>;

    async fn retrieve_thread(&self, thread_id: &str) -> RelayResult<Thread>;

    /// Append a `user` message to a thread.
    async fn create_message(&self, thread_id: &str, content: &str) -> RelayResult<Message>;

    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> RelayResult<Run>;

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> RelayResult<Run>;

    async fn cancel_run(&self, thread_id: &str, run_id: &str) -> RelayResult<Run>;

    /// List thread messages, newest first.
    async fn list_messages(&self, thread_id: &str) -> RelayResult<MessageList>;
}
