use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for `POST /chat`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    /// The user's utterance
    pub message: String,
    /// Groups every exchange of one session on the backend
    pub conversation_id: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, conversation_id: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            conversation_id: conversation_id.into(),
        }
    }
}

/// A tool the backend agent can call, as listed by `GET /tools`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// JSON schema of the tool's arguments
    #[serde(default)]
    pub parameters: Value,
}

/// Response envelope of `GET /tools`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolsResponse {
    #[serde(default)]
    pub tools: Vec<ToolDefinition>,
}
