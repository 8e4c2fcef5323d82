//! Mock implementations for test fixtures.
//!
//! Re-exports the HTTP test double from `libdesk::adapters::mock` and adds
//! a helper for real-HTTP tests against a wiremock server.

pub use libdesk::adapters::mock::{MockHttpClient, MockResponse};

use libdesk::adapters::ReqwestHttpClient;
use libdesk::api::LibraryApi;
use std::sync::Arc;
use std::time::Duration;
use wiremock::MockServer;

/// API client speaking real HTTP, with a cookie store, to `server`.
pub fn wiremock_api(server: &MockServer) -> LibraryApi {
    let http = ReqwestHttpClient::new(Duration::from_secs(5)).expect("client builds");
    LibraryApi::new(Arc::new(http), format!("{}/api/v1", server.uri()))
}
