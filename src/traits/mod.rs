//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP client operations (GET, POST, PUT, DELETE, multipart)

pub mod http;

pub use http::{FilePart, Headers, HttpClient, HttpError, MultipartForm, Response};
