//! Common test utilities for integration tests.
//!
//! Builders for SSE bodies and clients pointed at a wiremock server or the
//! scripted mock transport.

#![allow(dead_code)]

use bytes::Bytes;
use futures::StreamExt;
use secchat::adapters::mock::{MockHttpClient, MockResponse};
use secchat::adapters::ReqwestHttpClient;
use secchat::models::AssistantMessage;
use secchat::sse::StreamEvent;
use secchat::{ChatClient, ChatOrchestrator, SnapshotStream};
use serde_json::{json, Map, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const MOCK_BASE_URL: &str = "http://backend.test";
pub const MOCK_CHAT_URL: &str = "http://backend.test/chat";

pub fn token(content: &str) -> StreamEvent {
    StreamEvent::Token {
        content: content.to_string(),
    }
}

pub fn tool_call(tool: &str, args: Value) -> StreamEvent {
    StreamEvent::ToolCall {
        tool: tool.to_string(),
        args: args.as_object().cloned().unwrap_or_else(Map::new),
    }
}

pub fn tool_result(tool: &str, result: Value) -> StreamEvent {
    StreamEvent::ToolResult {
        tool: tool.to_string(),
        result,
    }
}

pub fn error_event(content: &str) -> StreamEvent {
    StreamEvent::Error {
        content: content.to_string(),
    }
}

/// One `data: ` record with the blank separator line, as the backend
/// frames it.
pub fn record(event: &StreamEvent) -> String {
    format!("data: {}\n\n", serde_json::to_string(event).unwrap())
}

/// Same as [`record`] but with CRLF line endings and the echoed
/// `conversation_id` field.
pub fn crlf_record(event: &StreamEvent, conversation_id: &str) -> String {
    let mut value = serde_json::to_value(event).unwrap();
    value["conversation_id"] = json!(conversation_id);
    format!("data: {}\r\n\r\n", value)
}

pub fn sse_body(events: &[StreamEvent]) -> String {
    events.iter().map(record).collect()
}

/// Mount `POST /chat` answering with `body` as an event stream.
pub async fn mount_chat(server: &MockServer, body: String) {
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(server)
        .await;
}

pub fn server_orchestrator(server: &MockServer) -> ChatOrchestrator<ReqwestHttpClient> {
    ChatOrchestrator::new(ChatClient::new(ReqwestHttpClient::new(), &server.uri()))
}

pub fn mock_orchestrator(response: MockResponse) -> (ChatOrchestrator<MockHttpClient>, MockHttpClient) {
    let mock = MockHttpClient::new();
    mock.set_response(MOCK_CHAT_URL, response);
    let client = ChatClient::new(mock.clone(), MOCK_BASE_URL);
    (ChatOrchestrator::new(client), mock)
}

pub fn chunks(parts: &[&str]) -> Vec<Bytes> {
    parts.iter().map(|part| Bytes::from(part.to_string())).collect()
}

pub async fn collect(snapshots: SnapshotStream) -> Vec<AssistantMessage> {
    snapshots.collect().await
}
