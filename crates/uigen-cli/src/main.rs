//! UIGen CLI.
//!
//! Replays AI tool calls against an in-memory project tree and inspects
//! project snapshots.
//!
//! # Architecture
//!
//! The CLI is organized around subcommands:
//! - `apply` - Replay a script of tool calls and write the resulting snapshot
//! - `tree` - Print a snapshot as a tree with its entry point
//! - `completions` - Generate shell completions
//!
//! # Examples
//!
//! ```bash
//! # Replay calls against an empty project
//! uigen apply calls.json --output project.json
//!
//! # Inspect the result
//! uigen tree project.json
//! ```

use clap::Parser;
use colored::Colorize;
use uigen_cli::cli::Cli;
use uigen_cli::{commands, runner};
use uigen_core::cli::{ExitCode, OutputFormat};

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    if let Err(e) = runner::init_logging(cli.verbose) {
        eprintln!("{} {e:#}", "warning:".yellow().bold());
    }

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::INVALID_INPUT
        }
    };

    exit_code.into()
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let output_format = cli
        .format
        .parse::<OutputFormat>()
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    let config = commands::common::load_config(cli.config.as_deref())?;

    runner::execute_command(cli.command, output_format, &config).await
}
