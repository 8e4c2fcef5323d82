//! API client error type.
//!
//! The remote service reports failures as `{ "message": "..." }` bodies. The
//! client folds every failure (HTTP status, transport, undecodable body) into
//! one human-readable message, keeping the underlying cause for logs only.

use thiserror::Error;

use super::category::ErrorCategory;
use crate::traits::HttpError;

/// Why an API call failed. Used for logging; never shown to the user.
#[derive(Debug, Clone, Error)]
pub enum ApiFailure {
    /// The server answered with a non-2xx status.
    #[error("server responded with status {0}")]
    Status(u16),

    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] HttpError),

    /// A 2xx response whose body did not match the expected shape.
    #[error("could not decode response body: {0}")]
    Decode(String),

    /// The request could not be built (missing file, bad input).
    #[error("could not build request: {0}")]
    Request(String),
}

/// A failed API call, reduced to the message the user will see.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ApiError {
    /// The normalized message: the server's `message` field when present,
    /// otherwise the operation's default.
    pub message: String,
    /// The underlying failure.
    #[source]
    pub cause: ApiFailure,
}

impl ApiError {
    /// Create an error with an explicit message.
    pub fn new(message: impl Into<String>, cause: ApiFailure) -> Self {
        Self {
            message: message.into(),
            cause,
        }
    }

    /// Build an error from a failed response body.
    ///
    /// Uses the body's `message` field if it is a non-empty string, otherwise
    /// `default`.
    pub fn from_body(status: u16, body: &[u8], default: &str) -> Self {
        let message = serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("message")
                    .and_then(|m| m.as_str())
                    .filter(|m| !m.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| default.to_string());
        Self::new(message, ApiFailure::Status(status))
    }

    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self.cause {
            ApiFailure::Status(status) => Some(status),
            _ => None,
        }
    }

    /// Error category for logging.
    pub fn category(&self) -> ErrorCategory {
        match self.cause {
            ApiFailure::Request(_) => ErrorCategory::Unexpected,
            _ => ErrorCategory::Transport,
        }
    }

    /// Consume the error, keeping only the user-facing message.
    pub fn into_message(self) -> String {
        self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_body_uses_server_message() {
        let err = ApiError::from_body(401, br#"{"message":"Invalid credentials"}"#, "Login failed");
        assert_eq!(err.message, "Invalid credentials");
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn test_from_body_falls_back_on_missing_message() {
        let err = ApiError::from_body(500, br#"{"success":false}"#, "Login failed");
        assert_eq!(err.message, "Login failed");
    }

    #[test]
    fn test_from_body_falls_back_on_empty_message() {
        let err = ApiError::from_body(400, br#"{"message":""}"#, "Request failed");
        assert_eq!(err.message, "Request failed");
    }

    #[test]
    fn test_from_body_falls_back_on_non_json() {
        let err = ApiError::from_body(502, b"<html>Bad Gateway</html>", "Failed to fetch users");
        assert_eq!(err.message, "Failed to fetch users");
        assert_eq!(err.category(), ErrorCategory::Transport);
    }

    #[test]
    fn test_transport_error_has_no_status() {
        let err = ApiError::new(
            "Logout failed",
            ApiFailure::Transport(HttpError::ConnectionFailed("refused".to_string())),
        );
        assert_eq!(err.status(), None);
        assert_eq!(err.into_message(), "Logout failed");
    }
}
