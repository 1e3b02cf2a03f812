//! Chat API client for backend communication.
//!
//! Knows the endpoint layout of the assistant backend and encodes requests.
//! Transport is delegated to an [`HttpClient`] so the same code runs against
//! reqwest in production and scripted byte streams in tests.

use std::sync::Arc;

use thiserror::Error;

use crate::adapters::ReqwestHttpClient;
use crate::config::ClientConfig;
use crate::models::{ChatRequest, ToolDefinition, ToolsResponse};
use crate::traits::{ByteStream, Headers, HttpClient, HttpError};

/// Error type for chat client operations
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failed or the server answered with a non-success status
    #[error(transparent)]
    Http(#[from] HttpError),
    /// Buffered endpoint answered with a non-success status
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },
    /// Response or request body was not the expected JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Client for the assistant backend.
pub struct ChatClient<C: HttpClient = ReqwestHttpClient> {
    http: Arc<C>,
    base_url: String,
}

impl<C: HttpClient> Clone for ChatClient<C> {
    fn clone(&self) -> Self {
        Self {
            http: Arc::clone(&self.http),
            base_url: self.base_url.clone(),
        }
    }
}

impl ChatClient<ReqwestHttpClient> {
    /// Build a reqwest-backed client from configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = ReqwestHttpClient::with_connect_timeout(config.connect_timeout)?;
        Ok(Self::new(http, &config.base_url))
    }
}

impl<C: HttpClient> ChatClient<C> {
    /// Create a client over the given transport. A trailing `/` on
    /// `base_url` is ignored.
    pub fn new(http: C, base_url: &str) -> Self {
        Self {
            http: Arc::new(http),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send one chat turn and return the raw response body.
    ///
    /// Sends `POST /chat`. A non-success status fails here, before any body
    /// bytes are read.
    pub async fn open_chat(&self, request: &ChatRequest) -> Result<ByteStream, ClientError> {
        let body = serde_json::to_string(request)?;

        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "text/event-stream".to_string());

        let stream = self
            .http
            .post_stream(&self.url("/chat"), &body, &headers)
            .await?;
        Ok(stream)
    }

    /// Check whether the backend answers `GET /` with a success status.
    pub async fn health_check(&self) -> Result<bool, ClientError> {
        let response = self.http.get(&self.url("/"), &Headers::new()).await?;
        Ok(response.is_success())
    }

    /// Fetch the tools the backend agent can call (`GET /tools`).
    pub async fn list_tools(&self) -> Result<Vec<ToolDefinition>, ClientError> {
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/json".to_string());

        let response = self.http.get(&self.url("/tools"), &headers).await?;
        if !response.is_success() {
            return Err(ClientError::ServerError {
                status: response.status,
                message: response.text(),
            });
        }

        let parsed: ToolsResponse = response.json()?;
        Ok(parsed.tools)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::traits::Response;
    use bytes::Bytes;

    const BASE: &str = "http://localhost:8000";

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = ChatClient::new(MockHttpClient::new(), "http://localhost:8000/");
        assert_eq!(client.base_url(), BASE);
    }

    #[tokio::test]
    async fn test_open_chat_request_shape() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://localhost:8000/chat",
            MockResponse::Stream(vec![Bytes::from("data: {}\n")]),
        );
        let client = ChatClient::new(mock.clone(), BASE);

        client
            .open_chat(&ChatRequest::new("ping", "conv-1"))
            .await
            .unwrap();

        let requests = mock.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].url, "http://localhost:8000/chat");
        assert_eq!(
            requests[0].headers.get("Accept").map(String::as_str),
            Some("text/event-stream")
        );
        assert_eq!(
            requests[0].headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        let body: serde_json::Value =
            serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"message": "ping", "conversation_id": "conv-1"})
        );
    }

    #[tokio::test]
    async fn test_open_chat_server_error() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://localhost:8000/chat",
            MockResponse::Success(Response::new(500, Bytes::from("boom"))),
        );
        let client = ChatClient::new(mock, BASE);

        let result = client.open_chat(&ChatRequest::new("ping", "c")).await;
        assert!(matches!(
            result,
            Err(ClientError::Http(HttpError::ServerError { status: 500, .. }))
        ));
    }

    #[tokio::test]
    async fn test_health_check() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://localhost:8000/",
            MockResponse::Success(Response::new(200, Bytes::from(r#"{"status":"ok"}"#))),
        );
        let client = ChatClient::new(mock.clone(), BASE);
        assert!(client.health_check().await.unwrap());

        mock.set_response(
            "http://localhost:8000/",
            MockResponse::Success(Response::new(503, Bytes::new())),
        );
        assert!(!client.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_health_check_unreachable() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::Error(HttpError::ConnectionFailed(
            "refused".to_string(),
        )));
        let client = ChatClient::new(mock, BASE);
        assert!(client.health_check().await.is_err());
    }

    #[tokio::test]
    async fn test_list_tools() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://localhost:8000/tools",
            MockResponse::Success(Response::new(
                200,
                Bytes::from(r#"{"tools":[{"name":"create_ticket","description":"Open a ticket","parameters":{}}]}"#),
            )),
        );
        let client = ChatClient::new(mock, BASE);

        let tools = client.list_tools().await.unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "create_ticket");
        assert_eq!(tools[0].description, "Open a ticket");
    }

    #[tokio::test]
    async fn test_list_tools_errors() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://localhost:8000/tools",
            MockResponse::Success(Response::new(404, Bytes::from("Not Found"))),
        );
        let client = ChatClient::new(mock.clone(), BASE);
        assert!(matches!(
            client.list_tools().await,
            Err(ClientError::ServerError { status: 404, .. })
        ));

        mock.set_response(
            "http://localhost:8000/tools",
            MockResponse::Success(Response::new(200, Bytes::from("not json"))),
        );
        assert!(matches!(
            client.list_tools().await,
            Err(ClientError::Json(_))
        ));
    }
}
