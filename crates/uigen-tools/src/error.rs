//! Tool-level errors and their wire representation.
//!
//! [`ToolError`] wraps file tree failures and adds the command-level kinds
//! (match failures, bad arguments, unknown commands, cancellation).
//! [`ErrorPayload`] is the serializable form attached to failed invocations.
//!
//! # Examples
//!
//! ```
//! use uigen_tools::{ErrorKind, ToolError};
//!
//! let error = ToolError::AmbiguousMatch {
//!     path: "/a.txt".to_string(),
//!     count: 2,
//! };
//! assert_eq!(error.kind(), ErrorKind::AmbiguousMatch);
//!
//! let payload = error.to_payload();
//! assert_eq!(payload.count, Some(2));
//! assert_eq!(payload.path.as_deref(), Some("/a.txt"));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uigen_files::FilesError;

/// Errors produced while parsing or executing a tool call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// File tree operation failed
    #[error(transparent)]
    Files(#[from] FilesError),

    /// `old_str` does not occur in the file
    #[error("No match for the search text in {path}")]
    NoMatch {
        /// File that was searched
        path: String,
    },

    /// `old_str` occurs more than once
    #[error("Search text occurs {count} times in {path}; it must match exactly once")]
    AmbiguousMatch {
        /// File that was searched
        path: String,
        /// Number of occurrences, overlapping ones included
        count: usize,
    },

    /// `insert_line` is negative or past the end of the file
    #[error("Line {line} is out of range for {path} ({line_count} lines)")]
    LineOutOfRange {
        /// Target file
        path: String,
        /// Requested line
        line: i128,
        /// Lines currently in the file
        line_count: usize,
    },

    /// A required argument is absent or empty
    #[error("Missing required argument '{field}' for command '{command}'")]
    MissingArgument {
        /// Command being parsed
        command: String,
        /// Name of the missing argument
        field: String,
    },

    /// An argument has the wrong JSON type
    #[error("Argument '{field}' must be {expected}")]
    InvalidArgument {
        /// Name of the offending argument
        field: String,
        /// Expected type, e.g. "a string"
        expected: String,
    },

    /// Command name is not part of the tool's vocabulary
    #[error("Unknown command '{command}' for tool '{tool}'")]
    UnknownCommand {
        /// Tool the command was sent to
        tool: String,
        /// The unrecognized command, or an empty string if none was given
        command: String,
    },

    /// Tool name is not a known tool family
    #[error("Unknown tool '{name}'")]
    UnknownTool {
        /// The unrecognized tool name
        name: String,
    },

    /// Invocation was cancelled before it completed
    #[error("Invocation was cancelled")]
    Cancelled,
}

impl ToolError {
    /// Returns the error's kind in the closed taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Files(files) => match files {
                FilesError::InvalidPath { .. } => ErrorKind::InvalidPath,
                FilesError::PathNotFound { .. } => ErrorKind::PathNotFound,
                FilesError::PathAlreadyExists { .. } => ErrorKind::PathAlreadyExists,
                FilesError::NotAFile { .. } => ErrorKind::NotAFile,
                FilesError::NotADirectory { .. } => ErrorKind::NotADirectory,
                FilesError::CyclicMove { .. } => ErrorKind::CyclicMove,
                FilesError::InvalidOperation { .. } => ErrorKind::InvalidOperation,
            },
            Self::NoMatch { .. } => ErrorKind::NoMatch,
            Self::AmbiguousMatch { .. } => ErrorKind::AmbiguousMatch,
            Self::LineOutOfRange { .. } => ErrorKind::LineOutOfRange,
            Self::MissingArgument { .. } => ErrorKind::MissingArgument,
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::UnknownCommand { .. } | Self::UnknownTool { .. } => ErrorKind::UnknownCommand,
            Self::Cancelled => ErrorKind::Cancelled,
        }
    }

    /// Returns `true` if the error came from the file tree.
    #[must_use]
    pub const fn is_files_error(&self) -> bool {
        matches!(self, Self::Files(_))
    }

    /// Returns `true` for `NoMatch` and `AmbiguousMatch`.
    #[must_use]
    pub const fn is_match_error(&self) -> bool {
        matches!(self, Self::NoMatch { .. } | Self::AmbiguousMatch { .. })
    }

    /// Returns `true` for argument errors that a retry with corrected
    /// arguments could fix.
    #[must_use]
    pub const fn is_argument_error(&self) -> bool {
        matches!(
            self,
            Self::MissingArgument { .. }
                | Self::InvalidArgument { .. }
                | Self::LineOutOfRange { .. }
        )
    }

    /// Returns `true` if the invocation was cancelled.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Builds the serializable payload for this error.
    #[must_use]
    pub fn to_payload(&self) -> ErrorPayload {
        let mut payload = ErrorPayload {
            kind: self.kind(),
            message: self.to_string(),
            path: None,
            command: None,
            field: None,
            count: None,
        };
        match self {
            Self::Files(files) => payload.path = Some(files.path().to_string()),
            Self::NoMatch { path } | Self::LineOutOfRange { path, .. } => {
                payload.path = Some(path.clone());
            }
            Self::AmbiguousMatch { path, count } => {
                payload.path = Some(path.clone());
                payload.count = Some(*count);
            }
            Self::MissingArgument { command, field } => {
                payload.command = Some(command.clone());
                payload.field = Some(field.clone());
            }
            Self::InvalidArgument { field, .. } => payload.field = Some(field.clone()),
            Self::UnknownCommand { command, .. } => payload.command = Some(command.clone()),
            Self::UnknownTool { name } => payload.command = Some(name.clone()),
            Self::Cancelled => {}
        }
        payload
    }
}

/// Type alias for tool results.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Closed taxonomy of tool failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Path could not be normalized
    InvalidPath,
    /// No node at the path
    PathNotFound,
    /// Path is occupied
    PathAlreadyExists,
    /// Directory where a file was required
    NotAFile,
    /// File where a directory was required
    NotADirectory,
    /// Move into own subtree
    CyclicMove,
    /// Operation not permitted on the path
    InvalidOperation,
    /// Search text not found
    NoMatch,
    /// Search text found more than once
    AmbiguousMatch,
    /// Insert line outside the file
    LineOutOfRange,
    /// Required argument absent
    MissingArgument,
    /// Argument of the wrong type
    InvalidArgument,
    /// Command or tool not recognized
    UnknownCommand,
    /// Invocation cancelled
    Cancelled,
}

impl ErrorKind {
    /// Returns the kind's name as it appears on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidPath => "InvalidPath",
            Self::PathNotFound => "PathNotFound",
            Self::PathAlreadyExists => "PathAlreadyExists",
            Self::NotAFile => "NotAFile",
            Self::NotADirectory => "NotADirectory",
            Self::CyclicMove => "CyclicMove",
            Self::InvalidOperation => "InvalidOperation",
            Self::NoMatch => "NoMatch",
            Self::AmbiguousMatch => "AmbiguousMatch",
            Self::LineOutOfRange => "LineOutOfRange",
            Self::MissingArgument => "MissingArgument",
            Self::InvalidArgument => "InvalidArgument",
            Self::UnknownCommand => "UnknownCommand",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serializable description of a failed tool call.
///
/// Optional fields are present only when they apply to the kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Failure kind
    pub kind: ErrorKind,
    /// Human-readable message
    pub message: String,
    /// Path the failure refers to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Command involved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Argument involved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Occurrence count for `AmbiguousMatch`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl From<&ToolError> for ErrorPayload {
    fn from(error: &ToolError) -> Self {
        error.to_payload()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_error_kind_and_path() {
        let error = ToolError::from(FilesError::CyclicMove {
            from: "/a".to_string(),
            to: "/a/b".to_string(),
        });
        assert!(error.is_files_error());
        assert_eq!(error.kind(), ErrorKind::CyclicMove);
        assert_eq!(error.to_payload().path.as_deref(), Some("/a/b"));
    }

    #[test]
    fn test_missing_argument_payload() {
        let error = ToolError::MissingArgument {
            command: "str_replace".to_string(),
            field: "old_str".to_string(),
        };
        assert!(error.is_argument_error());

        let payload = error.to_payload();
        assert_eq!(payload.kind, ErrorKind::MissingArgument);
        assert_eq!(payload.field.as_deref(), Some("old_str"));
        assert_eq!(payload.command.as_deref(), Some("str_replace"));
        assert!(payload.path.is_none());
    }

    #[test]
    fn test_unknown_tool_maps_to_unknown_command() {
        let error = ToolError::UnknownTool {
            name: "browser".to_string(),
        };
        assert_eq!(error.kind(), ErrorKind::UnknownCommand);
    }

    #[test]
    fn test_payload_serialization_skips_absent_fields() {
        let payload = ToolError::Cancelled.to_payload();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "Cancelled", "message": "Invocation was cancelled"})
        );
    }

    #[test]
    fn test_kind_display_matches_serde() {
        let json = serde_json::to_string(&ErrorKind::LineOutOfRange).unwrap();
        assert_eq!(json, format!("\"{}\"", ErrorKind::LineOutOfRange));
    }
}
