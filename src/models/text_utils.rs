//! Text processing utilities for display previews.

/// Truncate to at most `max_chars` characters, appending `...` when cut.
///
/// Counts characters, not bytes, so multi-byte text never splits mid-codepoint.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}
