//! Application error types.
//!
//! Failures of the remote assistant service are application-level outcomes:
//! they are reported in the body with a 200 status. Only requests the relay
//! cannot read at all get a non-200 status.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use relay_core::RelayError;
use thiserror::Error;
use tracing::warn;

use crate::handlers::relay::RelayResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid request body: {0}")]
    Validation(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error(transparent)]
    Relay(#[from] RelayError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Relay(_) => StatusCode::OK,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(%status, error = %self, "request failed");
        (status, Json(RelayResponse::message(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_failures_keep_ok_status_and_text() {
        let err = AppError::from(RelayError::from_status(404, "No assistant found with id 'x'."));
        assert_eq!(err.status(), StatusCode::OK);
        assert_eq!(err.to_string(), "404 No assistant found with id 'x'.");
    }

    #[test]
    fn unreadable_body_is_bad_request() {
        assert_eq!(
            AppError::Validation("expected value".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn other_methods_are_rejected() {
        assert_eq!(
            AppError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }
}
