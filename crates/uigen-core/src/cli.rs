//! Output format and exit status of the `uigen` binary.
//!
//! A replay exits `0` when every tool call succeeded, `1` when at least one
//! call ended `Failed`, and `2` when the script, snapshot, or config could
//! not be used at all.
//!
//! # Examples
//!
//! ```
//! use uigen_core::cli::{ExitCode, OutputFormat};
//!
//! let format: OutputFormat = "json".parse().unwrap();
//! assert_eq!(format, OutputFormat::Json);
//!
//! assert_eq!(ExitCode::for_failures(0), ExitCode::SUCCESS);
//! assert_eq!(ExitCode::for_failures(3).as_i32(), 1);
//! ```

use std::fmt;
use std::str::FromStr;

/// How reports are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// Indented JSON
    Json,
    /// One JSON line per report, for piping
    Text,
    /// Check marks, colors, and a summary line
    #[default]
    Pretty,
}

impl OutputFormat {
    /// Name accepted by `--format`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
            Self::Pretty => "pretty",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            "pretty" => Ok(Self::Pretty),
            _ => Err(crate::Error::InvalidArgument(format!(
                "unknown output format '{s}', use json, text or pretty"
            ))),
        }
    }
}

/// Process exit status of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExitCode(u8);

impl ExitCode {
    /// Every tool call succeeded.
    pub const SUCCESS: Self = Self(0);

    /// At least one tool call ended `Failed`.
    pub const TOOL_FAILURE: Self = Self(1);

    /// The inputs could not be read or parsed.
    pub const INVALID_INPUT: Self = Self(2);

    /// Status of a replay with `failed` failed calls.
    #[must_use]
    pub const fn for_failures(failed: usize) -> Self {
        if failed == 0 {
            Self::SUCCESS
        } else {
            Self::TOOL_FAILURE
        }
    }

    /// Numeric status.
    #[must_use]
    pub fn as_i32(&self) -> i32 {
        i32::from(self.0)
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code.0)
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
