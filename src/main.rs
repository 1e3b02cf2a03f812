use std::process::ExitCode;

use color_eyre::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use secchat::cli::{parse_args, run_cli_command, USAGE};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    // Logs go to stderr so the transcript on stdout stays clean.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "secchat=warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let command = match parse_args(std::env::args()) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("error: {}\n\n{}", err, USAGE);
            return Ok(ExitCode::from(2));
        }
    };

    run_cli_command(command).await
}
