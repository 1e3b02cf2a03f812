//! SSE payload deserialization structs
//!
//! Internal structs used to deserialize record payloads from the chat
//! stream. Every field is optional on the wire; the parser applies the
//! defaulting rule for each one. Unlisted fields such as `type` and
//! `conversation_id` are ignored.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::sse::events::SseParseError;

/// `token` and `error` payloads
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TextPayload {
    #[serde(default)]
    pub content: Option<String>,
}

/// `tool_call` payload
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ToolCallPayload {
    #[serde(default)]
    pub tool: Option<String>,
    #[serde(default)]
    pub args: Option<Map<String, Value>>,
}

/// `tool_result` payload. `result` may be any JSON value.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ToolResultPayload {
    #[serde(default)]
    pub tool: Option<String>,
    #[serde(default)]
    pub result: Value,
}

/// Deserialize a payload object into `T`.
pub(crate) fn decode<T: DeserializeOwned>(
    event_type: &str,
    fields: Map<String, Value>,
) -> Result<T, SseParseError> {
    serde_json::from_value(Value::Object(fields)).map_err(|e| SseParseError::InvalidPayload {
        event_type: event_type.to_string(),
        reason: e.to_string(),
    })
}

/// Unwrap a field the event cannot do without.
pub(crate) fn required(
    event_type: &str,
    field: &str,
    value: Option<String>,
) -> Result<String, SseParseError> {
    value.ok_or_else(|| SseParseError::MissingField {
        event_type: event_type.to_string(),
        field: field.to_string(),
    })
}
