//! Relay error types.
//!
//! The `Display` text of every variant is what the caller sees in the
//! `message` field of the response body.

use thiserror::Error;

/// Convenience alias for fallible relay operations.
pub type RelayResult<T> = Result<T, RelayError>;

/// Errors raised while talking to the remote assistant service.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The assistant, thread or run id is unknown to the remote service.
    #[error("404 {0}")]
    NotFound(String),

    /// The remote service answered with a non-success status.
    #[error("{status} {message}")]
    Api { status: u16, message: String },

    /// The request never produced a response.
    #[error("Connection error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response from assistant service: {0}")]
    Decode(String),

    /// The run completed but the thread holds no assistant message.
    #[error("No assistant message found on thread {0}")]
    MissingReply(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl RelayError {
    /// Build an error from a non-success HTTP status and the remote message.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        if status == 404 {
            RelayError::NotFound(message)
        } else {
            RelayError::Api { status, message }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_status_maps_to_not_found() {
        let err = RelayError::from_status(404, "No assistant found with id 'asst_x'.");
        assert!(matches!(err, RelayError::NotFound(_)));
        assert_eq!(err.to_string(), "404 No assistant found with id 'asst_x'.");
    }

    #[test]
    fn other_status_maps_to_api_error() {
        let err = RelayError::from_status(429, "Rate limit reached");
        assert!(matches!(err, RelayError::Api { status: 429, .. }));
        assert_eq!(err.to_string(), "429 Rate limit reached");
    }

    #[test]
    fn missing_reply_names_thread() {
        let err = RelayError::MissingReply("thread_1".into());
        assert_eq!(err.to_string(), "No assistant message found on thread thread_1");
    }
}
