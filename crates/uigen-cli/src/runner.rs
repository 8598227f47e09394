//! Command execution and runtime logic.
//!
//! Contains the command dispatcher and logging initialization.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use uigen_core::RuntimeConfig;
use uigen_core::cli::{ExitCode, OutputFormat};

use crate::cli::Commands;
use crate::commands;

/// Initializes logging infrastructure.
///
/// Logs go to stderr so that stdout carries only command output.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}

/// Executes the specified CLI command.
///
/// Routes commands to their respective handlers and returns an exit code.
///
/// # Errors
///
/// Returns an error if input files cannot be read or parsed, or output
/// cannot be written.
pub async fn execute_command(
    command: Commands,
    output_format: OutputFormat,
    config: &RuntimeConfig,
) -> Result<ExitCode> {
    match command {
        Commands::Apply {
            script,
            snapshot,
            output,
            project,
        } => {
            let options = commands::apply::ApplyOptions {
                script,
                snapshot,
                output,
                project,
            };
            commands::apply::run(options, config, output_format).await
        }
        Commands::Tree { snapshot } => commands::tree::run(&snapshot, config, output_format),
        Commands::Completions { shell } => {
            use crate::cli::Cli;
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            Ok(commands::completions::run(shell, &mut cmd))
        }
    }
}
