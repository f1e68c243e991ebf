// @awa-component: RLY-RelayHandler
//
//! Relay handler — the single endpoint of the service.
//!
//! - `OPTIONS` on any path: empty 200, headers only
//! - `POST` on any path: run one conversation turn and return its reply

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use relay_core::{ConversationRequest, Reply};
use serde::Serialize;
use tracing::{debug, info};

use crate::AppState;
use crate::error::{AppError, AppResult};

/// Response body for every non-preflight request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
}

impl RelayResponse {
    /// Body with a message and no thread id.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            thread_id: None,
        }
    }
}

impl From<Reply> for RelayResponse {
    fn from(reply: Reply) -> Self {
        match reply {
            Reply::Completed { message, thread_id } => Self {
                message,
                thread_id: Some(thread_id),
            },
            Reply::TimedOut => Self::message(Reply::TimedOut.message()),
        }
    }
}

/// Dispatch on method; the path is ignored.
pub async fn relay_handler(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> AppResult<Response> {
    match method {
        Method::OPTIONS => Ok(StatusCode::OK.into_response()),
        Method::POST => {
            let reply = converse(&state, &body).await?;
            Ok(Json(reply).into_response())
        }
        _ => Err(AppError::MethodNotAllowed),
    }
}

async fn converse(state: &AppState, body: &[u8]) -> AppResult<RelayResponse> {
    let request: ConversationRequest =
        serde_json::from_slice(body).map_err(|e| AppError::Validation(e.to_string()))?;

    debug!(
        assistant_id = %request.assistant_id,
        thread_id = request.thread_id.as_deref().unwrap_or("<new>"),
        "conversation turn received"
    );

    let reply = state.orchestrator.handle(&request).await?;
    info!(
        thread_id = reply.thread_id().unwrap_or("<none>"),
        completed = matches!(reply, Reply::Completed { .. }),
        "conversation turn finished"
    );

    Ok(RelayResponse::from(reply))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn completed_reply_serializes_thread_id() {
        let body = RelayResponse::from(Reply::Completed {
            message: "Hi there".into(),
            thread_id: "thread_1".into(),
        });
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({ "message": "Hi there", "threadId": "thread_1" })
        );
    }

    #[test]
    fn timed_out_reply_omits_thread_id() {
        let body = RelayResponse::from(Reply::TimedOut);
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({ "message": "Request timed out." })
        );
    }
}
