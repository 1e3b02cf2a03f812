//! SSE event types and definitions
//!
//! Contains the [`StreamEvent`] enum with the four record kinds the chat
//! backend streams, and the non-fatal [`SseParseError`].

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Typed events from the chat stream.
///
/// The serde representation matches the wire format: an object tagged by
/// `type`, e.g. `{"type":"token","content":"Hel"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// Text fragment appended to the reply
    Token { content: String },
    /// The assistant started a tool invocation
    ToolCall {
        tool: String,
        args: Map<String, Value>,
    },
    /// A tool invocation finished
    ToolResult { tool: String, result: Value },
    /// Backend-side failure reported in-band
    Error { content: String },
}

impl StreamEvent {
    /// Get the event type name as it appears in the `type` field
    pub fn event_type_name(&self) -> &'static str {
        match self {
            StreamEvent::Token { .. } => "token",
            StreamEvent::ToolCall { .. } => "tool_call",
            StreamEvent::ToolResult { .. } => "tool_result",
            StreamEvent::Error { .. } => "error",
        }
    }
}

/// Errors that can occur while parsing a record payload.
///
/// None of these are fatal to a stream; the record is dropped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SseParseError {
    /// Payload is not valid JSON
    #[error("Invalid JSON in data payload: {reason}")]
    InvalidJson { reason: String },
    /// Payload is not an object with a string `type`
    #[error("Missing or non-string 'type' field")]
    MissingType,
    /// Unknown event type received
    #[error("Unknown SSE event type: {0}")]
    UnknownEventType(String),
    /// A required field is absent
    #[error("Missing field '{field}' for event type: {event_type}")]
    MissingField { event_type: String, field: String },
    /// A field holds the wrong JSON type
    #[error("Invalid {event_type} payload: {reason}")]
    InvalidPayload { event_type: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_type_name() {
        assert_eq!(
            StreamEvent::Token {
                content: String::new()
            }
            .event_type_name(),
            "token"
        );
        assert_eq!(
            StreamEvent::ToolCall {
                tool: "x".to_string(),
                args: Map::new()
            }
            .event_type_name(),
            "tool_call"
        );
        assert_eq!(
            StreamEvent::ToolResult {
                tool: "x".to_string(),
                result: Value::Null
            }
            .event_type_name(),
            "tool_result"
        );
        assert_eq!(
            StreamEvent::Error {
                content: String::new()
            }
            .event_type_name(),
            "error"
        );
    }

    #[test]
    fn test_serializes_in_wire_shape() {
        let event = StreamEvent::ToolResult {
            tool: "get_latest_scan".to_string(),
            result: json!({"critical": 2}),
        };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({"type": "tool_result", "tool": "get_latest_scan", "result": {"critical": 2}})
        );
    }

    #[test]
    fn test_sse_parse_error_display() {
        let err = SseParseError::UnknownEventType("done".to_string());
        assert_eq!(err.to_string(), "Unknown SSE event type: done");

        let err = SseParseError::MissingField {
            event_type: "tool_call".to_string(),
            field: "tool".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Missing field 'tool' for event type: tool_call"
        );

        let err = SseParseError::InvalidPayload {
            event_type: "tool_call".to_string(),
            reason: "invalid type: sequence, expected a map".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid tool_call payload: invalid type: sequence, expected a map"
        );
    }
}
