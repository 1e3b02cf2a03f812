//! Line-based terminal rendering of a streamed reply.
//!
//! Output is append-only: each snapshot prints only what is new since the
//! previous one. New text is written as it arrives, tool invocations get a
//! line when first seen and another when their status changes.
//!
//! ```text
//! you › what failed in the last scan?
//!   🔍 Get Latest Scan ◐
//!     repository: "payments-api"
//!   🔍 Get Latest Scan ✓
//! The latest scan of payments-api found 2 critical findings...
//! ```

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};

use crate::models::{
    AssistantMessage, ConversationTurn, ToolDefinition, ToolInvocation, ToolStatus,
};
use crate::presentation::{
    result_preview, status_color, status_glyph, summarize_args, ToolCatalog,
};
use crate::session::ExchangeObserver;

/// Incremental printer for one conversation.
pub struct TranscriptPrinter<W: Write> {
    out: W,
    catalog: ToolCatalog,
    show_results: bool,
    color: bool,
    echo_turns: bool,
    /// Reply text already written
    shown: String,
    /// Last printed status of each invocation, by position
    shown_status: Vec<ToolStatus>,
    at_line_start: bool,
    tick: usize,
}

impl<W: Write> TranscriptPrinter<W> {
    pub fn new(out: W, catalog: ToolCatalog) -> Self {
        Self {
            out,
            catalog,
            show_results: false,
            color: false,
            echo_turns: true,
            shown: String::new(),
            shown_status: Vec::new(),
            at_line_start: true,
            tick: 0,
        }
    }

    /// Print tool result previews under resolved invocations.
    pub fn with_results(mut self, show: bool) -> Self {
        self.show_results = show;
        self
    }

    /// Emit ANSI colors.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Repeat the user's text before each reply. Off when the user typed
    /// it at a prompt on the same terminal.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo_turns = echo;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Echo the user's turn and reset per-reply state.
    pub fn begin(&mut self, turn: &ConversationTurn) -> io::Result<()> {
        self.shown.clear();
        self.shown_status.clear();
        self.tick = 0;
        self.ensure_line_start()?;
        if self.echo_turns {
            self.styled("you › ", Color::Cyan, true)?;
            writeln!(self.out, "{}", turn.text)?;
        }
        self.out.flush()
    }

    /// Input prompt, left open for the user's line.
    pub fn prompt(&mut self) -> io::Result<()> {
        self.ensure_line_start()?;
        self.styled("you › ", Color::Cyan, true)?;
        self.out.flush()
    }

    /// A dimmed one-line notice such as `(interrupted)`.
    pub fn notice(&mut self, text: &str) -> io::Result<()> {
        self.ensure_line_start()?;
        self.styled(text, Color::DarkGrey, false)?;
        writeln!(self.out)?;
        self.out.flush()
    }

    /// Print whatever changed in `snapshot`.
    pub fn update(&mut self, snapshot: &AssistantMessage) -> io::Result<()> {
        self.tick += 1;

        for (index, invocation) in snapshot.tool_invocations.iter().enumerate() {
            match self.shown_status.get(index).copied() {
                None => {
                    self.print_invocation(invocation, true)?;
                    self.shown_status.push(invocation.status);
                }
                Some(previous) if previous != invocation.status => {
                    self.print_invocation(invocation, false)?;
                    self.shown_status[index] = invocation.status;
                }
                Some(_) => {}
            }
        }

        if let Some(suffix) = snapshot.content.strip_prefix(self.shown.as_str()) {
            if !suffix.is_empty() {
                write!(self.out, "{}", suffix)?;
                self.at_line_start = suffix.ends_with('\n');
            }
        } else {
            // Text was replaced rather than extended.
            self.ensure_line_start()?;
            self.styled(&snapshot.content, Color::Red, false)?;
            self.at_line_start = snapshot.content.ends_with('\n');
        }
        self.shown.clone_from(&snapshot.content);

        self.out.flush()
    }

    /// Close the reply with a blank line.
    pub fn finish(&mut self) -> io::Result<()> {
        self.ensure_line_start()?;
        writeln!(self.out)?;
        self.out.flush()
    }

    fn print_invocation(&mut self, invocation: &ToolInvocation, first: bool) -> io::Result<()> {
        let display = self.catalog.display_for(&invocation.tool);

        self.ensure_line_start()?;
        write!(self.out, "  {} ", display.icon)?;
        self.styled(&display.label, display.color, true)?;
        write!(self.out, " ")?;
        self.styled(
            status_glyph(invocation.status, self.tick),
            status_color(invocation.status),
            false,
        )?;
        writeln!(self.out)?;

        if first {
            for line in summarize_args(&invocation.args) {
                writeln!(self.out, "    {}", line)?;
            }
        }

        if self.show_results && invocation.status == ToolStatus::Success {
            if let Some(result) = &invocation.result {
                for line in result_preview(result).lines() {
                    writeln!(self.out, "    │ {}", line)?;
                }
            }
        }

        self.at_line_start = true;
        Ok(())
    }

    fn ensure_line_start(&mut self) -> io::Result<()> {
        if !self.at_line_start {
            writeln!(self.out)?;
            self.at_line_start = true;
        }
        Ok(())
    }

    fn styled(&mut self, text: &str, color: Color, bold: bool) -> io::Result<()> {
        if !self.color {
            return write!(self.out, "{}", text);
        }
        if bold {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        queue!(
            self.out,
            SetForegroundColor(color),
            Print(text),
            ResetColor,
            SetAttribute(Attribute::Reset)
        )
    }
}

/// Print the backend's tool list with catalog labels.
///
/// ```text
///   📚 Search Security Policies (search_policies)
///      Search the security policy knowledge base
/// ```
pub fn write_tool_list<W: Write>(
    out: &mut W,
    catalog: &ToolCatalog,
    tools: &[ToolDefinition],
) -> io::Result<()> {
    if tools.is_empty() {
        return writeln!(out, "No tools available.");
    }
    for tool in tools {
        let display = catalog.display_for(&tool.name);
        if display.label == tool.name {
            writeln!(out, "  {} {}", display.icon, tool.name)?;
        } else {
            writeln!(out, "  {} {} ({})", display.icon, display.label, tool.name)?;
        }
        if !tool.description.is_empty() {
            writeln!(out, "     {}", tool.description.trim())?;
        }
    }
    Ok(())
}

impl<W: Write> ExchangeObserver for TranscriptPrinter<W> {
    fn on_turn(&mut self, turn: &ConversationTurn) -> io::Result<()> {
        self.begin(turn)
    }

    fn on_snapshot(&mut self, snapshot: &AssistantMessage) -> io::Result<()> {
        self.update(snapshot)
    }

    fn on_complete(&mut self, _message: &AssistantMessage) -> io::Result<()> {
        self.finish()
    }
}
