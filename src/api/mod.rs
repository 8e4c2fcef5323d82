//! Client for the remote library-management REST service.
//!
//! [`LibraryApi`] exposes one async method per endpoint. Requests and
//! replies are typed in [`types`]; failures are [`crate::error::ApiError`].

pub mod client;
pub mod types;

pub use client::{defaults, LibraryApi, DEFAULT_BASE_URL, USER_FETCHED};
pub use types::*;
