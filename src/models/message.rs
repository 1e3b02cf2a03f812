use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::tools::ToolInvocation;

/// A user utterance. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationTurn {
    pub id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}

/// The assistant's reply as reconstructed from the event stream.
///
/// Values are snapshots: every update produces a new value and earlier
/// snapshots are never modified.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssistantMessage {
    pub id: Uuid,
    /// Reply text, append-only while streaming
    pub content: String,
    /// Tool invocations in the order they were first observed
    pub tool_invocations: Vec<ToolInvocation>,
    pub created_at: DateTime<Utc>,
}

impl AssistantMessage {
    /// Create the empty placeholder shown before any event arrives
    pub fn placeholder() -> Self {
        Self {
            id: Uuid::new_v4(),
            content: String::new(),
            tool_invocations: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty() && self.tool_invocations.is_empty()
    }

    /// Number of invocations still waiting for a result
    pub fn pending_count(&self) -> usize {
        self.tool_invocations
            .iter()
            .filter(|invocation| invocation.is_pending())
            .count()
    }
}

/// One entry of the in-memory transcript
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptEntry {
    User(ConversationTurn),
    Assistant(AssistantMessage),
}
