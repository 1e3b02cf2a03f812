//! HTTP client trait abstraction.
//!
//! Provides a trait-based abstraction over the two HTTP shapes the chat
//! client needs: a buffered GET and a streamed POST. The orchestrator is
//! generic over this trait so tests can script byte streams, including
//! streams that break half way through.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::collections::HashMap;
use std::pin::Pin;
use thiserror::Error;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// A streamed response body.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, HttpError>> + Send>>;

/// Buffered HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: Bytes,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, body: Bytes) -> Self {
        Self { status, body }
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as a string, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parse the response body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// HTTP client errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    /// Connection failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    /// Request timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
    /// Server returned an error status
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },
    /// The response body broke off while it was being read
    #[error("IO error: {0}")]
    Io(String),
    /// Other error
    #[error("HTTP error: {0}")]
    Other(String),
}

/// Trait for HTTP client operations.
///
/// Implementations include the production reqwest-based client and a
/// scriptable mock for tests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a GET request and buffer the whole body.
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError>;

    /// Perform a POST request and return the body as a byte stream.
    ///
    /// A non-success status is reported as [`HttpError::ServerError`] before
    /// any body bytes are handed out.
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError>;
}
