//! SSE (Server-Sent Events) stream handling
//!
//! The chat backend answers with a body of `data: <json>` lines, each JSON
//! object tagged by `type`.
//!
//! # Module structure
//! - `decoder` - Byte chunks to record payloads (FrameDecoder, frames)
//! - `events` - Event type definitions (StreamEvent, SseParseError)
//! - `payloads` - Payload deserialization structs
//! - `parser` - Payload to event classification (parse_event)

mod decoder;
mod events;
mod parser;
mod payloads;

// Re-export public types
pub use decoder::{frames, FrameDecoder};
pub use events::{SseParseError, StreamEvent};
pub use parser::parse_event;
