//! Record payload parsing
//!
//! Turns the text of one `data: ` record into a [`StreamEvent`].

use serde_json::Value;

use crate::sse::events::{SseParseError, StreamEvent};
use crate::sse::payloads::{decode, required, TextPayload, ToolCallPayload, ToolResultPayload};

/// Parse one record payload into a typed event.
///
/// Fields not named by the event kind (such as the `conversation_id` the
/// backend echoes on every record) are ignored.
pub fn parse_event(data: &str) -> Result<StreamEvent, SseParseError> {
    let value: Value = serde_json::from_str(data).map_err(|e| SseParseError::InvalidJson {
        reason: e.to_string(),
    })?;

    let fields = match value {
        Value::Object(fields) => fields,
        _ => return Err(SseParseError::MissingType),
    };
    let event_type = match fields.get("type") {
        Some(Value::String(t)) => t.clone(),
        _ => return Err(SseParseError::MissingType),
    };

    match event_type.as_str() {
        "token" => {
            let payload: TextPayload = decode(&event_type, fields)?;
            Ok(StreamEvent::Token {
                content: payload.content.unwrap_or_default(),
            })
        }
        "tool_call" => {
            let payload: ToolCallPayload = decode(&event_type, fields)?;
            Ok(StreamEvent::ToolCall {
                tool: required(&event_type, "tool", payload.tool)?,
                args: payload.args.unwrap_or_default(),
            })
        }
        "tool_result" => {
            let payload: ToolResultPayload = decode(&event_type, fields)?;
            Ok(StreamEvent::ToolResult {
                tool: required(&event_type, "tool", payload.tool)?,
                result: payload.result,
            })
        }
        "error" => {
            let payload: TextPayload = decode(&event_type, fields)?;
            Ok(StreamEvent::Error {
                content: payload.content.unwrap_or_default(),
            })
        }
        _ => Err(SseParseError::UnknownEventType(event_type)),
    }
}
