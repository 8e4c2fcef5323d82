//! Error types for libdesk.
//!
//! Errors follow the three-way taxonomy the front end reports to the user:
//!
//! | Category | Raised by | Reaches slice state |
//! |----------|-----------|---------------------|
//! | Validation | form checks before dispatch | No |
//! | Transport | [`ApiError`] from the API client | Yes, as the slice `error` |
//! | Unexpected | submit handlers (file reads, etc.) | No |
//!
//! Every variant ultimately surfaces to the user as a single message string.
//! No structured error codes are carried past the API client.

mod api;
mod category;
mod config;
mod validation;

pub use api::{ApiError, ApiFailure};
pub use category::ErrorCategory;
pub use config::ConfigError;
pub use validation::ValidationError;
