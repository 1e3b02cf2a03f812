//! Folding stream events into the assistant message.
//!
//! [`reduce`] is pure: it never touches its input and returns the next
//! snapshot. Events are applied strictly in arrival order, text only ever
//! grows and invocations are never removed.

use crate::models::{AssistantMessage, ToolInvocation};
use crate::sse::StreamEvent;

/// Prefix appended to the reply text when the stream reports an error.
pub const ERROR_TEXT_PREFIX: &str = "\n\n❌ Error: ";

/// Apply one event to a message snapshot.
///
/// A `tool_result` resolves the *first* pending invocation with the same
/// tool name, in list order. When the same tool is called twice before
/// either returns, results pair up oldest-first; a result with no pending
/// match changes nothing.
pub fn reduce(message: &AssistantMessage, event: &StreamEvent) -> AssistantMessage {
    let mut next = message.clone();

    match event {
        StreamEvent::Token { content } => {
            next.content.push_str(content);
        }
        StreamEvent::ToolCall { tool, args } => {
            next.tool_invocations
                .push(ToolInvocation::pending(tool.clone(), args.clone()));
        }
        StreamEvent::ToolResult { tool, result } => {
            match next
                .tool_invocations
                .iter_mut()
                .find(|invocation| invocation.is_pending() && invocation.tool == *tool)
            {
                Some(invocation) => invocation.resolve(result.clone()),
                None => tracing::debug!(tool = %tool, "tool_result without a pending call"),
            }
        }
        StreamEvent::Error { content } => {
            next.content.push_str(ERROR_TEXT_PREFIX);
            next.content.push_str(content);
            next.tool_invocations
                .iter_mut()
                .filter(|invocation| invocation.is_pending())
                .for_each(ToolInvocation::fail);
        }
    }

    next
}

/// Apply a sequence of events in order.
pub fn reduce_all<'a, I>(message: &AssistantMessage, events: I) -> AssistantMessage
where
    I: IntoIterator<Item = &'a StreamEvent>,
{
    events
        .into_iter()
        .fold(message.clone(), |current, event| reduce(&current, event))
}
