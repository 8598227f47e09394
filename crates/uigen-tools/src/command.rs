//! Typed tool commands.
//!
//! A [`ToolCallRequest`] carries a loose JSON argument bag; parsing turns it
//! into a closed union where every variant holds exactly the fields its
//! command needs, with paths already normalized.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use uigen_tools::{EditorCommand, ToolCallRequest, ToolCommand};
//!
//! let request = ToolCallRequest::editor(
//!     "create",
//!     json!({"path": "/components/../App.jsx", "file_text": "export default 1"}),
//! );
//!
//! match ToolCommand::parse(&request).unwrap() {
//!     ToolCommand::Editor(EditorCommand::Create { path, content }) => {
//!         assert_eq!(path.as_str(), "/App.jsx");
//!         assert_eq!(content, "export default 1");
//!     }
//!     other => panic!("unexpected command: {other:?}"),
//! }
//! ```

use crate::error::{Result, ToolError};
use crate::request::ToolCallRequest;
use serde_json::{Map, Value};
use uigen_core::ToolFamily;
use uigen_files::FilePath;

/// A parsed tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCommand {
    /// Editor tool command
    Editor(EditorCommand),
    /// Path-manager tool command
    PathManager(PathCommand),
}

/// Commands of the editor tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCommand {
    /// Show a file's content or a directory's listing
    View {
        /// Target path
        path: FilePath,
    },
    /// Create a file, or overwrite an existing one
    Create {
        /// Target path
        path: FilePath,
        /// Initial content
        content: String,
    },
    /// Replace the unique occurrence of `old_str`
    StrReplace {
        /// Target file
        path: FilePath,
        /// Text to find; never empty
        old_str: String,
        /// Replacement text
        new_str: String,
    },
    /// Insert text after a line
    Insert {
        /// Target file
        path: FilePath,
        /// Number of lines to keep above the inserted text
        insert_line: i128,
        /// Text to insert
        new_str: String,
    },
}

/// Commands of the path-manager tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathCommand {
    /// Move a node and its subtree
    Rename {
        /// Current path
        path: FilePath,
        /// Destination path
        new_path: FilePath,
    },
    /// Remove a node and its subtree
    Delete {
        /// Target path
        path: FilePath,
    },
    /// Create an empty directory
    Mkdir {
        /// Target path
        path: FilePath,
    },
}

impl ToolCommand {
    /// Parses a request into a typed command.
    ///
    /// # Errors
    ///
    /// - `UnknownTool` for an unrecognized tool name
    /// - `MissingArgument` naming `command` when the request has none
    /// - `UnknownCommand` for an unrecognized command
    /// - `MissingArgument` / `InvalidArgument` for bad arguments
    /// - `Files(InvalidPath)` for paths that cannot be normalized
    pub fn parse(request: &ToolCallRequest) -> Result<Self> {
        let family = request.family()?;
        let command = request
            .command_name()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ToolError::MissingArgument {
                command: family.as_str().to_string(),
                field: "command".to_string(),
            })?;
        let args = Args {
            command,
            map: &request.args,
        };

        match family {
            ToolFamily::Editor => EditorCommand::parse(&args).map(Self::Editor),
            ToolFamily::PathManager => PathCommand::parse(&args).map(Self::PathManager),
        }
        .map_err(|e| match e {
            ToolError::UnknownCommand { command, .. } => ToolError::UnknownCommand {
                tool: family.as_str().to_string(),
                command,
            },
            other => other,
        })
    }

    /// Tool family of the command.
    #[must_use]
    pub const fn family(&self) -> ToolFamily {
        match self {
            Self::Editor(_) => ToolFamily::Editor,
            Self::PathManager(_) => ToolFamily::PathManager,
        }
    }

    /// Command name as sent on the wire.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Editor(EditorCommand::View { .. }) => "view",
            Self::Editor(EditorCommand::Create { .. }) => "create",
            Self::Editor(EditorCommand::StrReplace { .. }) => "str_replace",
            Self::Editor(EditorCommand::Insert { .. }) => "insert",
            Self::PathManager(PathCommand::Rename { .. }) => "rename",
            Self::PathManager(PathCommand::Delete { .. }) => "delete",
            Self::PathManager(PathCommand::Mkdir { .. }) => "mkdir",
        }
    }

    /// Returns `true` if executing the command cannot change the tree.
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        matches!(self, Self::Editor(EditorCommand::View { .. }))
    }
}

impl EditorCommand {
    fn parse(args: &Args<'_>) -> Result<Self> {
        match args.command {
            "view" => Ok(Self::View {
                path: args.path("path")?,
            }),
            "create" => {
                let path = args.path("path")?;
                let content = match args.optional_str("content")? {
                    Some(content) => content,
                    None => args.optional_str("file_text")?.unwrap_or_default(),
                };
                Ok(Self::Create {
                    path,
                    content: content.to_string(),
                })
            }
            "str_replace" => {
                let path = args.path("path")?;
                let old_str = args.required_str("old_str")?;
                if old_str.is_empty() {
                    return Err(args.missing("old_str"));
                }
                Ok(Self::StrReplace {
                    path,
                    old_str: old_str.to_string(),
                    new_str: args.optional_str("new_str")?.unwrap_or_default().to_string(),
                })
            }
            "insert" => Ok(Self::Insert {
                path: args.path("path")?,
                insert_line: args.required_int("insert_line")?,
                new_str: args.required_str("new_str")?.to_string(),
            }),
            other => Err(unknown(other)),
        }
    }
}

impl PathCommand {
    fn parse(args: &Args<'_>) -> Result<Self> {
        match args.command {
            "rename" => Ok(Self::Rename {
                path: args.path("path")?,
                new_path: args.path("new_path")?,
            }),
            "delete" => Ok(Self::Delete {
                path: args.path("path")?,
            }),
            "mkdir" => Ok(Self::Mkdir {
                path: args.path("path")?,
            }),
            other => Err(unknown(other)),
        }
    }
}

fn unknown(command: &str) -> ToolError {
    ToolError::UnknownCommand {
        tool: String::new(),
        command: command.to_string(),
    }
}

/// Typed accessors over a request's argument bag.
struct Args<'a> {
    command: &'a str,
    map: &'a Map<String, Value>,
}

impl<'a> Args<'a> {
    fn missing(&self, field: &str) -> ToolError {
        ToolError::MissingArgument {
            command: self.command.to_string(),
            field: field.to_string(),
        }
    }

    fn optional_str(&self, field: &str) -> Result<Option<&'a str>> {
        match self.map.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(value)) => Ok(Some(value)),
            Some(_) => Err(ToolError::InvalidArgument {
                field: field.to_string(),
                expected: "a string".to_string(),
            }),
        }
    }

    fn required_str(&self, field: &str) -> Result<&'a str> {
        self.optional_str(field)?
            .ok_or_else(|| self.missing(field))
    }

    /// Any JSON integer is accepted; range checks belong to the command.
    fn required_int(&self, field: &str) -> Result<i128> {
        match self.map.get(field) {
            None | Some(Value::Null) => Err(self.missing(field)),
            Some(Value::Number(number)) => number
                .as_i64()
                .map(i128::from)
                .or_else(|| number.as_u64().map(i128::from))
                .ok_or_else(|| ToolError::InvalidArgument {
                    field: field.to_string(),
                    expected: "an integer".to_string(),
                }),
            Some(_) => Err(ToolError::InvalidArgument {
                field: field.to_string(),
                expected: "an integer".to_string(),
            }),
        }
    }

    fn path(&self, field: &str) -> Result<FilePath> {
        let raw = self.required_str(field)?;
        if raw.is_empty() {
            return Err(self.missing(field));
        }
        Ok(FilePath::new(raw)?)
    }
}
