// @awa-component: RLY-Orchestrator
//
//! Request orchestrator — drives one conversation turn against the remote
//! assistant service.
//!
//! 1. Resolve the assistant
//! 2. Create a thread, or resolve the caller's existing one
//! 3. Append the user message
//! 4. Start a run and poll it until it completes, fails or times out
//! 5. Render the newest assistant message as HTML

use std::sync::Arc;

use serde::Deserialize;
use tokio::time::{Instant, sleep};
use tracing::{debug, info, warn};

use crate::client::AssistantApi;
use crate::config::OrchestratorConfig;
use crate::error::{RelayError, RelayResult};
use crate::models::{Run, RunStatus, Thread};
use crate::render::render_content;

/// Message returned when a run does not complete.
pub const TIMEOUT_MESSAGE: &str = "Request timed out.";

/// One conversation turn as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationRequest {
    pub assistant_id: String,
    /// `None` starts a new conversation.
    #[serde(default)]
    pub thread_id: Option<String>,
    pub content: String,
}

/// Result of a conversation turn that did not raise an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Completed { message: String, thread_id: String },
    /// The run timed out or failed; both surface the same fixed message.
    TimedOut,
}

impl Reply {
    pub fn message(&self) -> &str {
        match self {
            Reply::Completed { message, .. } => message,
            Reply::TimedOut => TIMEOUT_MESSAGE,
        }
    }

    pub fn thread_id(&self) -> Option<&str> {
        match self {
            Reply::Completed { thread_id, .. } => Some(thread_id),
            Reply::TimedOut => None,
        }
    }
}

/// How the polling loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed(Run),
    TimedOut,
    Failed,
}

/// Drives conversation turns. Holds no per-request state, so one instance is
/// shared by all concurrent requests.
#[derive(Clone)]
pub struct Orchestrator {
    api: Arc<dyn AssistantApi>,
    config: OrchestratorConfig,
}

impl Orchestrator {
    pub fn new(api: Arc<dyn AssistantApi>, config: OrchestratorConfig) -> Self {
        Self { api, config }
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Run one conversation turn to completion, failure or timeout.
    pub async fn handle(&self, request: &ConversationRequest) -> RelayResult<Reply> {
        let assistant = self.api.retrieve_assistant(&request.assistant_id).await?;
        let thread = self.resolve_thread(request.thread_id.as_deref()).await?;

        self.api
            .create_message(&thread.id, &request.content)
            .await?;

        let run = self.api.create_run(&thread.id, &assistant.id).await?;
        info!(
            thread_id = %thread.id,
            run_id = %run.id,
            assistant_id = %assistant.id,
            "run created"
        );

        match self.poll_run(&thread.id, &run.id).await? {
            RunOutcome::Completed(run) => {
                let message = self.collect_reply(&thread.id, &run).await?;
                Ok(Reply::Completed {
                    message,
                    thread_id: thread.id,
                })
            }
            RunOutcome::TimedOut | RunOutcome::Failed => Ok(Reply::TimedOut),
        }
    }

    async fn resolve_thread(&self, thread_id: Option<&str>) -> RelayResult<Thread> {
        match thread_id {
            None => {
                let thread = self.api.create_thread().await?;
                info!(thread_id = %thread.id, "no thread supplied, created new thread");
                Ok(thread)
            }
            Some(id) => {
                let thread = self.api.retrieve_thread(id).await?;
                debug!(thread_id = %thread.id, "reusing thread");
                Ok(thread)
            }
        }
    }

    /// Poll a run until it completes, fails, or the timeout elapses.
    ///
    /// Timeout and failure both cancel the run. A `failed` status is acted on
    /// at the top of the iteration after the one that observed it, so failure
    /// is reported one poll interval late.
    pub async fn poll_run(&self, thread_id: &str, run_id: &str) -> RelayResult<RunOutcome> {
        let started = Instant::now();
        let mut last_status: Option<RunStatus> = None;

        loop {
            if started.elapsed() >= self.config.run_timeout {
                warn!(thread_id, run_id, "run timed out, cancelling");
                self.api.cancel_run(thread_id, run_id).await?;
                return Ok(RunOutcome::TimedOut);
            }

            if last_status == Some(RunStatus::Failed) {
                warn!(thread_id, run_id, "run failed, cancelling");
                self.api.cancel_run(thread_id, run_id).await?;
                return Ok(RunOutcome::Failed);
            }

            let run = self.api.retrieve_run(thread_id, run_id).await?;
            debug!(run_id, status = %run.status, "current run status");

            if run.status == RunStatus::Completed {
                return Ok(RunOutcome::Completed(run));
            }
            last_status = Some(run.status);

            sleep(self.config.poll_interval).await;
        }
    }

    async fn collect_reply(&self, thread_id: &str, run: &Run) -> RelayResult<String> {
        let messages = self.api.list_messages(thread_id).await?;
        let reply = messages
            .latest_assistant_message()
            .ok_or_else(|| RelayError::MissingReply(thread_id.to_string()))?;

        match &run.usage {
            Some(usage) => info!(
                run_id = %run.id,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                price = self.config.pricing.estimate(usage),
                "run completed"
            ),
            None => info!(run_id = %run.id, "run completed without usage report"),
        }

        let html = render_content(&reply.content);
        debug!(message_id = %reply.id, len = html.len(), "rendered assistant reply");
        Ok(html)
    }
}
