//! Successful tool results.

use serde::{Deserialize, Serialize};
use std::fmt;
use uigen_files::FilePath;

/// Result of a successful tool call.
///
/// Serialized with a `type` tag, e.g.
/// `{"type": "replaced", "path": "/a.txt"}`.
///
/// # Examples
///
/// ```
/// use uigen_files::FilePath;
/// use uigen_tools::ToolOutput;
///
/// let output = ToolOutput::Created {
///     path: FilePath::new("/App.jsx").unwrap(),
/// };
/// assert_eq!(output.to_string(), "Created /App.jsx");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolOutput {
    /// Full content of a viewed file
    FileContent {
        /// Viewed file
        path: FilePath,
        /// Its content
        content: String,
    },
    /// Child names of a viewed directory
    DirectoryListing {
        /// Viewed directory
        path: FilePath,
        /// Child names in insertion order
        entries: Vec<String>,
    },
    /// A new file was created
    Created {
        /// New file
        path: FilePath,
    },
    /// `create` replaced an existing file's content
    Overwritten {
        /// Overwritten file
        path: FilePath,
    },
    /// `str_replace` succeeded
    Replaced {
        /// Edited file
        path: FilePath,
    },
    /// `insert` succeeded
    Inserted {
        /// Edited file
        path: FilePath,
        /// Line after which the text was inserted
        line: usize,
    },
    /// A node was moved
    Renamed {
        /// Previous path
        from: FilePath,
        /// New path
        to: FilePath,
    },
    /// A node and its subtree were removed
    Deleted {
        /// Removed path
        path: FilePath,
        /// Number of nodes removed
        removed: usize,
    },
    /// An empty directory was created
    DirectoryCreated {
        /// New directory
        path: FilePath,
    },
}

impl ToolOutput {
    /// Path the output refers to; the destination for renames.
    #[must_use]
    pub const fn path(&self) -> &FilePath {
        match self {
            Self::FileContent { path, .. }
            | Self::DirectoryListing { path, .. }
            | Self::Created { path }
            | Self::Overwritten { path }
            | Self::Replaced { path }
            | Self::Inserted { path, .. }
            | Self::Deleted { path, .. }
            | Self::DirectoryCreated { path } => path,
            Self::Renamed { to, .. } => to,
        }
    }

    /// Returns `true` if the call changed the tree.
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        !matches!(
            self,
            Self::FileContent { .. } | Self::DirectoryListing { .. }
        )
    }
}

impl fmt::Display for ToolOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileContent { content, .. } => f.write_str(content),
            Self::DirectoryListing { path, entries } => {
                if entries.is_empty() {
                    write!(f, "{path} is empty")
                } else {
                    f.write_str(&entries.join("\n"))
                }
            }
            Self::Created { path } => write!(f, "Created {path}"),
            Self::Overwritten { path } => write!(f, "Overwrote {path}"),
            Self::Replaced { path } => write!(f, "Replaced text in {path}"),
            Self::Inserted { path, line } => write!(f, "Inserted text after line {line} of {path}"),
            Self::Renamed { from, to } => write!(f, "Renamed {from} to {to}"),
            Self::Deleted { path, removed } => {
                if *removed == 1 {
                    write!(f, "Deleted {path}")
                } else {
                    write!(f, "Deleted {path} ({removed} entries)")
                }
            }
            Self::DirectoryCreated { path } => write!(f, "Created directory {path}"),
        }
    }
}
