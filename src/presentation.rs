//! Display metadata for tool invocations.
//!
//! The catalog maps tool names to a label, an icon and a color. It is
//! injected into the renderer, so unknown tools are expected and fall back
//! to a generic entry named after the tool itself.

use std::collections::HashMap;

use crossterm::style::Color;
use serde_json::{Map, Value};

use crate::models::{truncate_chars, ToolStatus};

/// Longest string argument shown verbatim, in characters.
pub const ARG_PREVIEW_CHARS: usize = 50;

const FALLBACK_ICON: &str = "🔧";
const FALLBACK_COLOR: Color = Color::Grey;

/// How one tool is presented
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDisplay {
    pub label: String,
    pub icon: String,
    pub color: Color,
}

impl ToolDisplay {
    pub fn new(label: impl Into<String>, icon: impl Into<String>, color: Color) -> Self {
        Self {
            label: label.into(),
            icon: icon.into(),
            color,
        }
    }
}

/// Tool name to display metadata lookup
#[derive(Debug, Clone, Default)]
pub struct ToolCatalog {
    entries: HashMap<String, ToolDisplay>,
}

impl ToolCatalog {
    /// An empty catalog; every tool uses the fallback.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The tools the security assistant ships with.
    pub fn builtin() -> Self {
        Self::empty()
            .with_tool(
                "search_policies",
                ToolDisplay::new("Search Security Policies", "📚", Color::Blue),
            )
            .with_tool(
                "get_latest_scan",
                ToolDisplay::new("Get Latest Scan", "🔍", Color::Yellow),
            )
            .with_tool(
                "create_ticket",
                ToolDisplay::new("Create Ticket", "🎫", Color::Green),
            )
    }

    pub fn with_tool(mut self, name: impl Into<String>, display: ToolDisplay) -> Self {
        self.entries.insert(name.into(), display);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Display metadata for `name`, or the generic fallback.
    pub fn display_for(&self, name: &str) -> ToolDisplay {
        self.entries
            .get(name)
            .cloned()
            .unwrap_or_else(|| ToolDisplay::new(name, FALLBACK_ICON, FALLBACK_COLOR))
    }
}

/// One `key: value` entry per argument.
///
/// Strings longer than [`ARG_PREVIEW_CHARS`] are cut and suffixed with
/// `...`; every other value, short strings included, is shown as JSON.
pub fn summarize_args(args: &Map<String, Value>) -> Vec<String> {
    args.iter()
        .map(|(key, value)| format!("{}: {}", key, summarize_value(value)))
        .collect()
}

fn summarize_value(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > ARG_PREVIEW_CHARS => {
            truncate_chars(s, ARG_PREVIEW_CHARS)
        }
        other => other.to_string(),
    }
}

/// Status marker. Pending uses a spinner frame chosen by `tick`.
pub fn status_glyph(status: ToolStatus, tick: usize) -> &'static str {
    const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];
    match status {
        ToolStatus::Pending => SPINNER[tick % SPINNER.len()],
        ToolStatus::Success => "✓",
        ToolStatus::Error => "✗",
    }
}

pub fn status_color(status: ToolStatus) -> Color {
    match status {
        ToolStatus::Pending => Color::DarkGrey,
        ToolStatus::Success => Color::Green,
        ToolStatus::Error => Color::Red,
    }
}

/// The whole result as two-space indented JSON.
pub fn result_preview(result: &Value) -> String {
    serde_json::to_string_pretty(result).unwrap_or_else(|_| result.to_string())
}
