//! Shell completion generation command.
//!
//! Generates shell completion scripts for bash, zsh, fish, and `PowerShell`.

use clap::Command;
use clap_complete::{Shell, generate};
use std::io;
use tracing::info;
use uigen_core::cli::ExitCode;

/// Writes the completion script for `shell` to stdout.
///
/// # Examples
///
/// ```no_run
/// use clap::Command;
/// use clap_complete::Shell;
/// use uigen_cli::commands::completions;
///
/// let mut cmd = Command::new("uigen");
/// completions::generate_completions(Shell::Bash, &mut cmd);
/// ```
pub fn generate_completions(shell: Shell, cmd: &mut Command) {
    info!("Generating {} completions", shell);
    generate(shell, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

/// Runs the completions command.
#[must_use]
pub fn run(shell: Shell, cmd: &mut Command) -> ExitCode {
    generate_completions(shell, cmd);
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_completions_bash() {
        let mut cmd = Command::new("test-cli");
        generate_completions(Shell::Bash, &mut cmd);
    }

    #[test]
    fn test_generate_completions_fish() {
        let mut cmd = Command::new("test-cli");
        generate_completions(Shell::Fish, &mut cmd);
    }

    #[test]
    fn test_run_returns_success() {
        let mut cmd = Command::new("test-cli");
        assert_eq!(run(Shell::Zsh, &mut cmd), ExitCode::SUCCESS);
    }
}
