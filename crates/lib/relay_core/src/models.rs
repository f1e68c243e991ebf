//! Wire types for the remote assistant API.
//!
//! Only the fields the relay reads are modelled; everything else in the
//! remote payloads is ignored.

use serde::{Deserialize, Serialize};

/// A remote-defined assistant configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Assistant {
    pub id: String,
}

/// A remote-persisted conversation context.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Thread {
    pub id: String,
}

/// Author of a thread message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Text payload of a `text` content block.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TextContent {
    pub value: String,
}

/// One content block of a message.
///
/// `kind` keeps the remote `type` string verbatim so blocks the relay cannot
/// render can still be named.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageContent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: Option<TextContent>,
}

impl MessageContent {
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: Some(TextContent {
                value: value.into(),
            }),
        }
    }

    pub fn other(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            text: None,
        }
    }

    pub fn is_text(&self) -> bool {
        self.kind == "text"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    #[serde(default)]
    pub content: Vec<MessageContent>,
}

/// A page of thread messages, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageList {
    pub data: Vec<Message>,
}

impl MessageList {
    /// The most recent message authored by the assistant.
    pub fn latest_assistant_message(&self) -> Option<&Message> {
        self.data.iter().find(|m| m.role == Role::Assistant)
    }
}

/// Remote-reported execution state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Cancelled,
    Failed,
    Completed,
    Incomplete,
    Expired,
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Queued => "queued",
            RunStatus::InProgress => "in_progress",
            RunStatus::RequiresAction => "requires_action",
            RunStatus::Cancelling => "cancelling",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Failed => "failed",
            RunStatus::Completed => "completed",
            RunStatus::Incomplete => "incomplete",
            RunStatus::Expired => "expired",
            RunStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token usage reported on a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

/// One execution of an assistant against a thread.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Run {
    pub id: String,
    pub status: RunStatus,
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// Body of `POST /threads/{id}/messages`.
#[derive(Debug, Serialize)]
pub struct CreateMessage<'a> {
    pub role: Role,
    pub content: &'a str,
}

/// Body of `POST /threads/{id}/runs`.
#[derive(Debug, Serialize)]
pub struct CreateRun<'a> {
    pub assistant_id: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn run_status_parses_remote_values() {
        let run: Run = serde_json::from_value(json!({
            "id": "run_1",
            "object": "thread.run",
            "status": "in_progress",
            "usage": null
        }))
        .unwrap();
        assert_eq!(run.status, RunStatus::InProgress);
        assert!(run.usage.is_none());
    }

    #[test]
    fn unknown_run_status_does_not_fail() {
        let run: Run =
            serde_json::from_value(json!({ "id": "run_1", "status": "paused" })).unwrap();
        assert_eq!(run.status, RunStatus::Unknown);
    }

    #[test]
    fn non_text_content_keeps_its_type() {
        let msg: Message = serde_json::from_value(json!({
            "id": "msg_1",
            "role": "assistant",
            "content": [
                { "type": "text", "text": { "value": "hi", "annotations": [] } },
                { "type": "image_file", "image_file": { "file_id": "file_1" } }
            ]
        }))
        .unwrap();
        assert_eq!(msg.content[0], MessageContent::text("hi"));
        assert_eq!(msg.content[1].kind, "image_file");
        assert!(msg.content[1].text.is_none());
    }

    #[test]
    fn latest_assistant_message_scans_from_newest() {
        let list: MessageList = serde_json::from_value(json!({
            "object": "list",
            "data": [
                { "id": "msg_3", "role": "user", "content": [] },
                { "id": "msg_2", "role": "assistant", "content": [] },
                { "id": "msg_1", "role": "assistant", "content": [] }
            ]
        }))
        .unwrap();
        assert_eq!(list.latest_assistant_message().unwrap().id, "msg_2");
    }

    #[test]
    fn create_message_serializes_user_role() {
        let body = serde_json::to_value(CreateMessage {
            role: Role::User,
            content: "Hello",
        })
        .unwrap();
        assert_eq!(body, json!({ "role": "user", "content": "Hello" }));
    }
}
