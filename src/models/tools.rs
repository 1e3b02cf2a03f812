use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Lifecycle state of one tool invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolStatus {
    /// Called, no result yet
    Pending,
    /// Result received
    Success,
    /// The stream reported an error while the tool was pending
    Error,
}

/// A tool the assistant invoked while composing its reply
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolInvocation {
    /// Tool name as sent by the backend. Unknown names are valid.
    pub tool: String,
    /// Arguments object (arbitrary nested JSON)
    pub args: Map<String, Value>,
    /// Tool output, absent until resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    pub status: ToolStatus,
}

impl ToolInvocation {
    /// Create a new pending invocation
    pub fn pending(tool: impl Into<String>, args: Map<String, Value>) -> Self {
        Self {
            tool: tool.into(),
            args,
            result: None,
            status: ToolStatus::Pending,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == ToolStatus::Pending
    }

    /// Attach a result and mark the invocation successful
    pub fn resolve(&mut self, result: Value) {
        self.result = Some(result);
        self.status = ToolStatus::Success;
    }

    /// Mark the invocation as failed
    pub fn fail(&mut self) {
        self.status = ToolStatus::Error;
    }
}
