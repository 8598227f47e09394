//! CLI argument definitions.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// UIGen - replay AI tool calls against an in-memory project tree.
///
/// Tool calls are applied in order through the same serialized session the
/// runtime uses, so a script behaves exactly as a live agent session would.
#[derive(Parser, Debug)]
#[command(name = "uigen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (json, text, pretty)
    #[arg(long = "format", global = true, default_value = "pretty")]
    pub format: String,

    /// Runtime configuration file (TOML)
    ///
    /// Defaults to `<config dir>/uigen/config.toml` when that file exists.
    #[arg(long, global = true, env = "UIGEN_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a script of tool calls.
    ///
    /// The script is a JSON array of requests of the form
    /// `{"toolName": "editor", "command": "create", "args": {...}}`.
    /// Every call is applied in order; failed calls leave the tree untouched
    /// and do not stop the script.
    ///
    /// Exits with 0 when every call succeeded and 1 when any failed.
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Start from an empty project
    /// uigen apply calls.json --output project.json
    ///
    /// # Continue from a saved snapshot
    /// uigen apply more-calls.json --snapshot project.json --output project.json
    /// ```
    Apply {
        /// Script file (JSON array of tool-call requests)
        script: PathBuf,

        /// Snapshot to start from (JSON object of path to content)
        #[arg(short, long)]
        snapshot: Option<PathBuf>,

        /// Where to write the resulting snapshot
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Project identifier used in logs and reports
        #[arg(short, long, default_value = "default")]
        project: String,
    },

    /// Print the tree of a snapshot and its entry point.
    Tree {
        /// Snapshot file (JSON object of path to content)
        snapshot: PathBuf,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell for completion generation
        #[arg(value_enum)]
        shell: Shell,
    },
}
