//! Error category classification.

use std::fmt;

/// High-level classification of a failure for logging and toast styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Rejected on the client before any request was made.
    Validation,
    /// HTTP status, connection or decode failure reported by the API client.
    Transport,
    /// Anything a submit handler did not expect (unreadable file, etc.).
    Unexpected,
}

impl ErrorCategory {
    /// Whether errors of this category are stored in slice state.
    pub fn reaches_state(&self) -> bool {
        matches!(self, ErrorCategory::Transport)
    }

    /// Short label for log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Validation => "validation",
            ErrorCategory::Transport => "transport",
            ErrorCategory::Unexpected => "unexpected",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
