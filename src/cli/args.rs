//! Command-line argument parsing for the secchat CLI.

use thiserror::Error;

/// Options shared by every command that talks to the backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOptions {
    /// `--url`: overrides the configured base URL
    pub url: Option<String>,
    /// `--results`: print tool result previews
    pub show_results: bool,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Interactive chat (default)
    Chat(CliOptions),
    /// Probe the backend and exit
    Health(CliOptions),
    /// List the backend's tools and exit
    Tools(CliOptions),
    /// Show version information
    Version,
    /// Show usage
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    #[error("Missing value for {0}")]
    MissingValue(String),
    #[error("Unknown argument: {0}")]
    UnknownArgument(String),
}

pub const USAGE: &str = "\
Usage: secchat [OPTIONS]

Chat with the DevSecOps assistant from the terminal.

Options:
      --url <URL>   Backend base URL (env SECCHAT_API_URL, default http://localhost:8000)
      --results     Show tool result previews (env SECCHAT_SHOW_RESULTS)
      --health      Check that the backend is reachable and exit
      --tools       List the tools the assistant can call and exit
  -V, --version     Print version
  -h, --help        Print this help

In the chat prompt, type /quit or press Ctrl-D to leave.";

/// Parse command-line arguments, including the program name.
///
/// # Examples
///
/// ```
/// use secchat::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["secchat".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut options = CliOptions::default();
    let mut health = false;
    let mut tools = false;

    // Skip the program name
    let mut args = args.skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--health" => health = true,
            "--tools" => tools = true,
            "--results" => options.show_results = true,
            "--url" => {
                let value = args
                    .next()
                    .ok_or_else(|| ArgsError::MissingValue("--url".to_string()))?;
                options.url = Some(value);
            }
            other => match other.strip_prefix("--url=") {
                Some(value) => options.url = Some(value.to_string()),
                None => return Err(ArgsError::UnknownArgument(other.to_string())),
            },
        }
    }

    Ok(if health {
        CliCommand::Health(options)
    } else if tools {
        CliCommand::Tools(options)
    } else {
        CliCommand::Chat(options)
    })
}
