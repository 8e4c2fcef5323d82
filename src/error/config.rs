//! Configuration errors.

use thiserror::Error;

/// A configuration value could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The API base URL is not an absolute http(s) URL.
    #[error("invalid API URL '{0}': expected http:// or https://")]
    InvalidBaseUrl(String),

    /// An environment variable held an unparsable value.
    #[error("invalid value '{value}' for {key}")]
    InvalidEnv { key: &'static str, value: String },

    /// No directory is available for the log file.
    #[error("could not determine a data directory for the log file")]
    NoDataDir,
}
