//! libdesk - a terminal front end for a library-management REST service
//!
//! The crate is layered bottom-up:
//!
//! - [`traits`] and [`adapters`]: the HTTP seam and its reqwest and mock
//!   implementations
//! - [`api`]: typed calls to the service
//! - [`state`]: slices and their reducers
//! - [`store`]: dispatching operations and applying their settlements
//! - [`feedback`]: toasts, follow-up requests and redirects derived from state
//! - [`app`] and [`ui`]: the interactive shell and its ratatui views
//!
//! Modules are public so integration tests can drive the store directly.

pub mod adapters;
pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod feedback;
pub mod logging;
pub mod state;
pub mod store;
pub mod terminal;
pub mod traits;
pub mod ui;
