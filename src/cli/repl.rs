//! The interactive chat loop.
//!
//! Each non-blank input line is one turn. Ctrl-C while a reply is streaming
//! abandons that reply; Ctrl-C at the prompt, `/quit` or end of input leaves.

use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::render::TranscriptPrinter;
use crate::session::{Session, SessionError};
use crate::traits::HttpClient;

/// What one input line asks for
#[derive(Debug, Clone, PartialEq)]
pub enum ReplInput {
    Message(String),
    Blank,
    Help,
    Quit,
}

impl ReplInput {
    pub fn classify(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed {
            "" => ReplInput::Blank,
            "/quit" | "/exit" => ReplInput::Quit,
            "/help" => ReplInput::Help,
            _ => match starter_prompt(trimmed) {
                Some(prompt) => ReplInput::Message(prompt.to_string()),
                None => ReplInput::Message(trimmed.to_string()),
            },
        }
    }
}

const REPL_HELP: &str = "Type a question and press Enter. /quit leaves, Ctrl-C stops a reply.";

/// Example questions, one per assistant tool. `/1` to `/3` send them.
pub const STARTER_PROMPTS: [(&str, &str); 3] = [
    ("📚", "What does our password policy say?"),
    ("🔍", "Show me the latest scan for web-app-1"),
    ("🎫", "Create a ticket for the SQL injection in web-app-1"),
];

fn starter_prompt(shortcut: &str) -> Option<&'static str> {
    let index: usize = shortcut.strip_prefix('/')?.parse().ok()?;
    STARTER_PROMPTS
        .get(index.checked_sub(1)?)
        .map(|(_, prompt)| *prompt)
}

/// Usage line followed by the numbered starter prompts.
pub fn help_lines() -> Vec<String> {
    let mut lines = vec![REPL_HELP.to_string(), "Try:".to_string()];
    for (number, (icon, prompt)) in STARTER_PROMPTS.iter().enumerate() {
        lines.push(format!("  /{} {} {}", number + 1, icon, prompt));
    }
    lines
}

/// Run the loop until the user leaves or input ends.
///
/// With `interactive` set a prompt is shown and turns are not echoed;
/// otherwise (piped input) each turn is echoed before its reply.
pub async fn run_repl<C, R, W>(
    session: &mut Session<C>,
    input: R,
    printer: &mut TranscriptPrinter<W>,
    interactive: bool,
) -> io::Result<()>
where
    C: HttpClient + 'static,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        if interactive {
            printer.prompt()?;
        }

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            if interactive {
                printer.notice("")?;
            }
            break;
        };

        let text = match ReplInput::classify(&line) {
            ReplInput::Message(text) => text,
            ReplInput::Blank => continue,
            ReplInput::Help => {
                for line in help_lines() {
                    printer.notice(&line)?;
                }
                continue;
            }
            ReplInput::Quit => break,
        };

        let outcome = tokio::select! {
            result = session.submit(&text, &mut *printer) => Some(result),
            _ = tokio::signal::ctrl_c() => None,
        };

        match outcome {
            Some(Ok(_)) | Some(Err(SessionError::EmptyInput)) => {}
            Some(Err(SessionError::Io(err))) => return Err(err),
            None => {
                tracing::info!("Reply interrupted by user");
                printer.notice("(interrupted)")?;
            }
        }
    }

    Ok(())
}
