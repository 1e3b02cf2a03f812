//! CLI module for secchat.
//!
//! - Argument parsing
//! - Version display
//! - The interactive chat loop
//! - One-shot `--health` and `--tools` commands
//!
//! # Usage
//!
//! ```ignore
//! use secchat::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args())?;
//! let exit_code = run_cli_command(command).await?;
//! ```

pub mod args;
pub mod repl;
pub mod version;

pub use args::{parse_args, ArgsError, CliCommand, CliOptions, USAGE};
pub use repl::{help_lines, run_repl, ReplInput, STARTER_PROMPTS};
pub use version::{version_line, VERSION};

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use color_eyre::Result;
use tokio::io::BufReader;

use crate::client::ChatClient;
use crate::config::ClientConfig;
use crate::health_check::run_health_check;
use crate::orchestrator::ChatOrchestrator;
use crate::presentation::ToolCatalog;
use crate::render::{write_tool_list, TranscriptPrinter};
use crate::session::Session;

/// Environment configuration with command-line overrides applied.
pub fn load_config(options: &CliOptions) -> Result<ClientConfig> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = &options.url {
        config = config.with_base_url(url)?;
    }
    if options.show_results {
        config = config.with_show_tool_results(true);
    }
    Ok(config)
}

/// Run a parsed CLI command.
pub async fn run_cli_command(command: CliCommand) -> Result<ExitCode> {
    match command {
        CliCommand::Version => {
            println!("{}", version_line());
            Ok(ExitCode::SUCCESS)
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            Ok(ExitCode::SUCCESS)
        }
        CliCommand::Health(options) => handle_health_command(&load_config(&options)?).await,
        CliCommand::Tools(options) => handle_tools_command(&load_config(&options)?).await,
        CliCommand::Chat(options) => handle_chat_command(&load_config(&options)?).await,
    }
}

async fn handle_health_command(config: &ClientConfig) -> Result<ExitCode> {
    let client = ChatClient::from_config(config)?;
    let report = run_health_check(&client).await;

    if report.healthy {
        let elapsed = report
            .response_time_ms
            .map(|ms| format!(" ({} ms)", ms))
            .unwrap_or_default();
        println!("✓ {} is healthy{}", client.base_url(), elapsed);
        Ok(ExitCode::SUCCESS)
    } else {
        let reason = report.error_message.unwrap_or_default();
        println!("✗ {} is unreachable: {}", client.base_url(), reason);
        Ok(ExitCode::FAILURE)
    }
}

async fn handle_tools_command(config: &ClientConfig) -> Result<ExitCode> {
    let client = ChatClient::from_config(config)?;
    let tools = client.list_tools().await?;
    write_tool_list(&mut io::stdout().lock(), &ToolCatalog::builtin(), &tools)?;
    Ok(ExitCode::SUCCESS)
}

async fn handle_chat_command(config: &ClientConfig) -> Result<ExitCode> {
    let client = ChatClient::from_config(config)?;
    let mut session = Session::new(ChatOrchestrator::new(client));

    let interactive = io::stdin().is_terminal();
    let stdout = io::stdout();
    let color = stdout.is_terminal();
    let mut printer = TranscriptPrinter::new(stdout, ToolCatalog::builtin())
        .with_results(config.show_tool_results)
        .with_color(color)
        .with_echo(!interactive);

    if interactive {
        printer.notice(&format!(
            "{} connected to {}. Type /help for help.",
            version_line(),
            config.base_url
        ))?;
        for line in help_lines().iter().skip(1) {
            printer.notice(line)?;
        }
    }
    tracing::info!(
        conversation_id = %session.conversation_id(),
        base_url = %config.base_url,
        "Session started"
    );

    run_repl(
        &mut session,
        BufReader::new(tokio::io::stdin()),
        &mut printer,
        interactive,
    )
    .await?;

    Ok(ExitCode::SUCCESS)
}
