//! Mock HTTP client for testing.
//!
//! Scripts buffered responses and streamed bodies per URL, and records every
//! request so tests can assert on the wire shape of what was sent.

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::StreamExt;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::traits::{ByteStream, Headers, HttpClient, HttpError, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method (GET or POST)
    pub method: String,
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body (for POST requests)
    pub body: Option<String>,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a buffered response
    Success(Response),
    /// Fail before any response is produced
    Error(HttpError),
    /// Stream these chunks, then end cleanly
    Stream(Vec<Bytes>),
    /// Stream these chunks, then fail with the given error
    StreamThenError(Vec<Bytes>, HttpError),
    /// Stream these chunks, then stay open without sending anything more
    StreamThenHang(Vec<Bytes>),
}

/// Mock HTTP client for testing.
///
/// Lookup order is exact URL, then the longest configured prefix, then the
/// default response.
///
/// # Example
///
/// ```ignore
/// use secchat::adapters::mock::{MockHttpClient, MockResponse};
/// use bytes::Bytes;
///
/// let client = MockHttpClient::new();
/// client.set_response(
///     "http://localhost:8000/chat",
///     MockResponse::Stream(vec![Bytes::from("data: {\"type\":\"token\",\"content\":\"hi\"}\n\n")]),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct MockHttpClient {
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    default_response: Arc<Mutex<Option<MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Recover the guard even if a panicking test poisoned the lock.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_response: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set a response for a URL (or URL prefix).
    pub fn set_response(&self, url: &str, response: MockResponse) {
        lock(&self.responses).insert(url.to_string(), response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        *lock(&self.default_response) = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
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
        let responses = lock(&self.responses);

        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }

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
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("GET", url, headers, None);

        match self.get_response(url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            Some(MockResponse::Stream(_))
            | Some(MockResponse::StreamThenError(..))
            | Some(MockResponse::StreamThenHang(_)) => Err(
                HttpError::Other("Stream response on non-stream request".to_string()),
            ),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }

    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError> {
        self.record_request("POST", url, headers, Some(body.to_string()));

        match self.get_response(url) {
            Some(MockResponse::Stream(chunks)) => {
                let stream = futures::stream::iter(chunks.into_iter().map(Ok));
                Ok(Box::pin(stream))
            }
            Some(MockResponse::StreamThenError(chunks, err)) => {
                let items = chunks
                    .into_iter()
                    .map(Ok)
                    .chain(std::iter::once(Err(err)))
                    .collect::<Vec<_>>();
                Ok(Box::pin(futures::stream::iter(items)))
            }
            Some(MockResponse::StreamThenHang(chunks)) => {
                let stream = futures::stream::iter(chunks.into_iter().map(Ok))
                    .chain(futures::stream::pending());
                Ok(Box::pin(stream))
            }
            Some(MockResponse::Success(response)) if !response.is_success() => {
                Err(HttpError::ServerError {
                    status: response.status,
                    message: response.text(),
                })
            }
            Some(MockResponse::Success(response)) => {
                let body = response.body;
                Ok(Box::pin(futures::stream::iter(std::iter::once(Ok(body)))))
            }
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}
