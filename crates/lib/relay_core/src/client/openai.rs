// @awa-component: RLY-OpenAIClient
//
//! OpenAI Assistants API client.
//!
//! Every call carries the bearer credential and the `OpenAI-Beta` header.
//! There is no retry: a failed call aborts the whole conversation turn.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::AssistantApi;
use crate::config::OpenAiConfig;
use crate::error::{RelayError, RelayResult};
use crate::models::{
    Assistant, CreateMessage, CreateRun, Message, MessageList, Role, Run, Thread,
};

const OPENAI_BETA_HEADER: &str = "OpenAI-Beta";
const OPENAI_BETA_VALUE: &str = "assistants=v2";

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// reqwest-backed [`AssistantApi`] implementation.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Use a preconfigured reqwest client (proxies, timeouts, ...).
    pub fn with_client(http: Client, config: OpenAiConfig) -> Self {
        Self { http, config }
    }

    fn get(&self, segments: &[&str]) -> RequestBuilder {
        self.authorize(self.http.get(self.config.endpoint(segments)))
    }

    fn post(&self, segments: &[&str]) -> RequestBuilder {
        self.authorize(self.http.post(self.config.endpoint(segments)))
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        req.bearer_auth(&self.config.api_key)
            .header(OPENAI_BETA_HEADER, OPENAI_BETA_VALUE)
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> RelayResult<T> {
        let resp = req.send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(RelayError::from_status(
                status.as_u16(),
                remote_error_message(&body),
            ));
        }

        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| RelayError::Decode(e.to_string()))
    }
}

/// Ids that would vanish from the path (`""`, `.`, `..`) can never name a
/// remote object.
fn id_segment<'a>(kind: &str, id: &'a str) -> RelayResult<&'a str> {
    match id {
        "" | "." | ".." => Err(RelayError::NotFound(format!(
            "No {kind} found with id '{id}'."
        ))),
        _ => Ok(id),
    }
}

/// Pull `error.message` out of an API error body, falling back to the raw text.
fn remote_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[async_trait]
impl AssistantApi for OpenAiClient {
    async fn retrieve_assistant(&self, assistant_id: &str) -> RelayResult<Assistant> {
        debug!(assistant_id, "retrieving assistant");
        let assistant_id = id_segment("assistant", assistant_id)?;
        self.send(self.get(&["assistants", assistant_id]))
            .await
    }

    async fn create_thread(&self) -> RelayResult<Thread> {
        debug!("creating thread");
        self.send(self.post(&["threads"]).json(&serde_json::json!({})))
            .await
    }

    async fn retrieve_thread(&self, thread_id: &str) -> RelayResult<Thread> {
        debug!(thread_id, "retrieving thread");
        let thread_id = id_segment("thread", thread_id)?;
        self.send(self.get(&["threads", thread_id])).await
    }

    async fn create_message(&self, thread_id: &str, content: &str) -> RelayResult<Message> {
        debug!(thread_id, "creating message");
        let body = CreateMessage {
            role: Role::User,
            content,
        };
        let thread_id = id_segment("thread", thread_id)?;
        self.send(self.post(&["threads", thread_id, "messages"]).json(&body))
            .await
    }

    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> RelayResult<Run> {
        debug!(thread_id, assistant_id, "creating run");
        let body = CreateRun { assistant_id };
        let thread_id = id_segment("thread", thread_id)?;
        self.send(self.post(&["threads", thread_id, "runs"]).json(&body))
            .await
    }

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> RelayResult<Run> {
        let thread_id = id_segment("thread", thread_id)?;
        let run_id = id_segment("run", run_id)?;
        self.send(self.get(&["threads", thread_id, "runs", run_id]))
            .await
    }

    async fn cancel_run(&self, thread_id: &str, run_id: &str) -> RelayResult<Run> {
        debug!(thread_id, run_id, "cancelling run");
        let thread_id = id_segment("thread", thread_id)?;
        let run_id = id_segment("run", run_id)?;
        self.send(self.post(&["threads", thread_id, "runs", run_id, "cancel"]))
            .await
    }

    async fn list_messages(&self, thread_id: &str) -> RelayResult<MessageList> {
        let thread_id = id_segment("thread", thread_id)?;
        self.send(self.get(&["threads", thread_id, "messages"]))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_extracted_from_envelope() {
        let body = r#"{"error":{"message":"No thread found with id 'thread_x'.","type":"invalid_request_error"}}"#;
        assert_eq!(
            remote_error_message(body),
            "No thread found with id 'thread_x'."
        );
    }

    #[test]
    fn dot_segment_ids_are_not_found() {
        for id in ["", ".", ".."] {
            let err = id_segment("thread", id).unwrap_err();
            assert!(matches!(err, RelayError::NotFound(_)));
        }
        assert_eq!(id_segment("thread", "thread_1").unwrap(), "thread_1");
        assert_eq!(id_segment("thread", "..x").unwrap(), "..x");
    }

    #[test]
    fn non_json_error_body_used_verbatim() {
        assert_eq!(remote_error_message(" Bad Gateway \n"), "Bad Gateway");
    }
}
