//! Common test utilities for integration tests.
//!
//! Fixtures for wiring a [`Store`] or an [`App`] to a [`MockHttpClient`],
//! plus JSON builders shaped like the library service's replies.
//!
//! ```ignore
//! use common::{mock_store, user_json, url};
//!
//! let (mut store, mock) = mock_store();
//! mock.set_response(&url("/auth/me"), MockResponse::json(200, json!({"data": user_json("u1", "Admin")})));
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use libdesk::api::LibraryApi;
use libdesk::app::{App, Route};
use libdesk::feedback::ToastKind;
use libdesk::state::StalePolicy;
use libdesk::store::Store;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

/// Base URL the mock client answers on.
pub const BASE: &str = "http://api.test/api/v1";

/// Full mock URL of an API path.
pub fn url(path: &str) -> String {
    format!("{BASE}{path}")
}

pub fn mock_api() -> (LibraryApi, MockHttpClient) {
    let mock = MockHttpClient::new();
    (LibraryApi::new(Arc::new(mock.clone()), BASE), mock)
}

pub fn mock_store() -> (Store, MockHttpClient) {
    mock_store_with(StalePolicy::default())
}

pub fn mock_store_with(policy: StalePolicy) -> (Store, MockHttpClient) {
    let (api, mock) = mock_api();
    (Store::new(api).with_policy(policy), mock)
}

/// App on `route` backed by a fresh mock. Nothing is dispatched yet.
pub fn mock_app(route: Route) -> (App, MockHttpClient) {
    let (store, mock) = mock_store();
    (App::new(store, Duration::from_secs(5), route), mock)
}

/// Toasts currently queued, oldest first.
pub fn toasts(app: &App) -> Vec<(ToastKind, String)> {
    app.toasts.iter().map(|t| (t.kind, t.text.clone())).collect()
}

pub fn user_json(id: &str, role: &str) -> Value {
    json!({
        "_id": id,
        "name": format!("User {id}"),
        "email": format!("{id}@library.test"),
        "role": role,
    })
}

pub fn book_json(id: &str, title: &str) -> Value {
    json!({
        "_id": id,
        "title": title,
        "author": "Anon",
        "description": "",
        "price": 10.0,
        "quantity": 2,
        "availability": true,
    })
}

pub fn record_json(id: &str, book: &str, email: &str) -> Value {
    json!({
        "_id": id,
        "user": {"id": "u1", "name": "Reader", "email": email},
        "book": book,
        "price": 10.0,
        "dueDate": "2030-01-01T00:00:00.000Z",
        "returnDate": null,
        "fine": 0,
        "notified": false,
        "borrowDate": "2029-12-25T00:00:00.000Z",
    })
}

/// Answer the two requests every home route makes on entry.
pub fn serve_session(mock: &MockHttpClient, role: &str) {
    mock.set_response(
        &url("/auth/me"),
        MockResponse::json(200, json!({"success": true, "data": user_json("me", role)})),
    );
    mock.set_response(
        &url("/book/all"),
        MockResponse::json(
            200,
            json!({"message": "Books fetched", "data": [book_json("b1", "Dune")]}),
        ),
    );
}
