//! Mock HTTP client for testing.
//!
//! Provides a configurable mock HTTP client that can return predefined
//! responses or errors, optionally after a delay so that tests can control
//! the order in which concurrent requests settle.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::traits::{Headers, HttpClient, HttpError, MultipartForm, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method (GET, POST, PUT, DELETE or MULTIPART)
    pub method: String,
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body. Multipart requests record `name=value` lines and
    /// `name@file_name` for file parts.
    pub body: Option<String>,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a successful response
    Success(Response),
    /// Return an error
    Error(HttpError),
    /// Wait, then behave like the inner response
    Delayed {
        delay: Duration,
        response: Box<MockResponse>,
    },
}

impl MockResponse {
    /// JSON response with the given status.
    pub fn json(status: u16, value: serde_json::Value) -> Self {
        MockResponse::Success(Response::json_body(status, &value))
    }

    /// Wrap this response so it settles after `delay`.
    pub fn delayed(self, delay: Duration) -> Self {
        MockResponse::Delayed {
            delay,
            response: Box::new(self),
        }
    }
}

/// Mock HTTP client for testing.
///
/// Responses are looked up by URL. Queued responses for a URL are consumed
/// first, in FIFO order. After the queue is empty the persistent response
/// for the exact URL is used, then the longest registered prefix, then the
/// default response.
///
/// # Example
///
/// ```ignore
/// use libdesk::adapters::mock::{MockHttpClient, MockResponse};
/// use libdesk::traits::{HttpClient, Headers};
/// use serde_json::json;
///
/// let client = MockHttpClient::new();
/// client.set_response(
///     "http://api.test/book/all",
///     MockResponse::json(200, json!({"books": []})),
/// );
///
/// let response = client.get("http://api.test/book/all", &Headers::new()).await?;
/// assert_eq!(response.status, 200);
/// assert_eq!(client.get_requests().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    /// Configured responses by URL pattern
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// One-shot responses by exact URL
    queued: Arc<Mutex<HashMap<String, VecDeque<MockResponse>>>>,
    /// Default response when no specific match
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a response for a URL or URL prefix.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        lock(&self.responses).insert(url.to_string(), response);
    }

    /// Queue a response that is returned once for the exact URL.
    pub fn push_response(&self, url: &str, response: MockResponse) {
        lock(&self.queued)
            .entry(url.to_string())
            .or_default()
            .push_back(response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        *lock(&self.default_response) = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// Recorded requests with the given method.
    pub fn requests_with_method(&self, method: &str) -> Vec<RecordedRequest> {
        lock(&self.requests)
            .iter()
            .filter(|r| r.method == method)
            .cloned()
            .collect()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        lock(&self.requests).clear();
    }

    fn record_request(&self, method: &str, url: &str, headers: &Headers, body: Option<String>) {
        lock(&self.requests).push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body,
        });
    }

    fn get_response(&self, url: &str) -> Option<MockResponse> {
        if let Some(queue) = lock(&self.queued).get_mut(url) {
            if let Some(response) = queue.pop_front() {
                return Some(response);
            }
        }

        let responses = lock(&self.responses);
        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }

        // Longest prefix wins so that nested paths can be overridden.
        let prefixed = responses
            .iter()
            .filter(|(pattern, _)| url.starts_with(pattern.as_str()))
            .max_by_key(|(pattern, _)| pattern.len())
            .map(|(_, response)| response.clone());
        if prefixed.is_some() {
            return prefixed;
        }

        lock(&self.default_response).clone()
    }

    async fn respond(&self, url: &str) -> Result<Response, HttpError> {
        let mut next = self.get_response(url);
        loop {
            match next {
                Some(MockResponse::Success(response)) => return Ok(response),
                Some(MockResponse::Error(err)) => return Err(err),
                Some(MockResponse::Delayed { delay, response }) => {
                    tokio::time::sleep(delay).await;
                    next = Some(*response);
                }
                None => {
                    return Err(HttpError::Other(format!("No mock response for URL: {}", url)))
                }
            }
        }
    }
}

fn summarize_form(form: &MultipartForm) -> String {
    let fields = form.fields.iter().map(|(name, value)| format!("{name}={value}"));
    let files = form
        .files
        .iter()
        .map(|file| format!("{}@{}", file.field, file.file_name));
    fields.chain(files).collect::<Vec<_>>().join("\n")
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("GET", url, headers, None);
        self.respond(url).await
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("POST", url, headers, Some(body.to_string()));
        self.respond(url).await
    }

    async fn put(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("PUT", url, headers, Some(body.to_string()));
        self.respond(url).await
    }

    async fn delete(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("DELETE", url, headers, None);
        self.respond(url).await
    }

    async fn post_multipart(
        &self,
        url: &str,
        form: MultipartForm,
        headers: &Headers,
    ) -> Result<Response, HttpError> {
        self.record_request("MULTIPART", url, headers, Some(summarize_form(&form)));
        self.respond(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_get_success() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://api.test/data",
            MockResponse::Success(Response::new(200, Bytes::from("Hello"))),
        );

        let response = client
            .get("https://api.test/data", &Headers::new())
            .await
            .unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, Bytes::from("Hello"));
    }

    #[tokio::test]
    async fn test_mock_error() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://api.test/fail",
            MockResponse::Error(HttpError::Timeout("30s".to_string())),
        );

        let result = client.get("https://api.test/fail", &Headers::new()).await;
        assert!(matches!(result, Err(HttpError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_queued_responses_are_consumed_in_order() {
        let client = MockHttpClient::new();
        let url = "https://api.test/user/all";
        client.push_response(url, MockResponse::json(200, json!({"n": 1})));
        client.push_response(url, MockResponse::json(200, json!({"n": 2})));
        client.set_response(url, MockResponse::json(200, json!({"n": 0})));

        let mut seen = Vec::new();
        for _ in 0..3 {
            let response = client.get(url, &Headers::new()).await.unwrap();
            let value: serde_json::Value = response.json().unwrap();
            seen.push(value["n"].as_i64().unwrap());
        }
        assert_eq!(seen, vec![1, 2, 0]);
    }

    #[tokio::test]
    async fn test_longest_prefix_match() {
        let client = MockHttpClient::new();
        client.set_response("https://api.test/", MockResponse::json(200, json!({"p": "root"})));
        client.set_response(
            "https://api.test/book/",
            MockResponse::json(200, json!({"p": "book"})),
        );

        let response = client
            .delete("https://api.test/book/delete/id123", &Headers::new())
            .await
            .unwrap();
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["p"], "book");
    }

    #[tokio::test]
    async fn test_default_response() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::Success(Response::new(
            404,
            Bytes::from("Not Found"),
        )));

        let response = client
            .get("https://api.test/unknown", &Headers::new())
            .await
            .unwrap();
        assert_eq!(response.status, 404);
    }

    #[tokio::test]
    async fn test_no_response_configured() {
        let client = MockHttpClient::new();
        let result = client.get("https://api.test/none", &Headers::new()).await;
        assert!(matches!(result, Err(HttpError::Other(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delayed_response() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://api.test/slow",
            MockResponse::json(200, json!({})).delayed(Duration::from_millis(500)),
        );

        let started = tokio::time::Instant::now();
        let response = client
            .get("https://api.test/slow", &Headers::new())
            .await
            .unwrap();
        assert_eq!(response.status, 200);
        assert!(started.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_records_methods_and_bodies() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::json(200, json!({})));

        client
            .put("https://api.test/a", r#"{"x":1}"#, &Headers::new())
            .await
            .unwrap();
        let form = MultipartForm::new()
            .text("name", "Ada")
            .file(crate::traits::FilePart {
                field: "avatar".to_string(),
                file_name: "ada.png".to_string(),
                mime: "image/png".to_string(),
                bytes: Bytes::from_static(b"png"),
            });
        client
            .post_multipart("https://api.test/b", form, &Headers::new())
            .await
            .unwrap();

        let requests = client.get_requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, "PUT");
        assert_eq!(requests[0].body.as_deref(), Some(r#"{"x":1}"#));
        assert_eq!(requests[1].method, "MULTIPART");
        assert_eq!(requests[1].body.as_deref(), Some("name=Ada\navatar@ada.png"));
        assert_eq!(client.requests_with_method("PUT").len(), 1);

        client.clear_requests();
        assert!(client.get_requests().is_empty());
    }
}
