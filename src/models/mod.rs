mod message;
mod request;
mod text_utils;
mod tools;

pub use message::*;
pub use request::{ChatRequest, ToolDefinition, ToolsResponse};
pub use text_utils::truncate_chars;
pub use tools::*;
