//! Dispatches tool calls to the editor and path-manager tools.

use crate::command::ToolCommand;
use crate::error::{Result, ToolError};
use crate::output::ToolOutput;
use crate::request::ToolCallRequest;
use crate::{editor, path_manager};
use tracing::{debug, warn};
use uigen_core::RuntimeConfig;
use uigen_files::FileTree;

/// Executes tool calls against a file tree.
///
/// The interpreter holds only policy; the tree is passed to every call, so
/// one interpreter can serve any number of projects.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use uigen_files::{FilePath, FileTree};
/// use uigen_tools::{ToolCallRequest, ToolInterpreter, ToolOutput};
///
/// let interpreter = ToolInterpreter::default();
/// let mut tree = FileTree::new();
///
/// interpreter
///     .execute(
///         &mut tree,
///         &ToolCallRequest::editor("create", json!({"path": "/a.txt", "content": "hello world"})),
///     )
///     .unwrap();
/// interpreter
///     .execute(
///         &mut tree,
///         &ToolCallRequest::editor(
///             "str_replace",
///             json!({"path": "/a.txt", "old_str": "world", "new_str": "there"}),
///         ),
///     )
///     .unwrap();
///
/// let path = FilePath::new("/a.txt").unwrap();
/// assert_eq!(tree.read_file(&path).unwrap(), "hello there");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolInterpreter {
    create_overwrites: bool,
}

impl ToolInterpreter {
    /// Creates an interpreter with the policies from `config`.
    #[must_use]
    pub const fn new(config: &RuntimeConfig) -> Self {
        Self {
            create_overwrites: config.create_overwrites,
        }
    }

    /// Whether editor `create` overwrites existing files.
    #[must_use]
    pub const fn create_overwrites(&self) -> bool {
        self.create_overwrites
    }

    /// Parses and executes a request.
    ///
    /// # Errors
    ///
    /// Returns the parse error or the execution error; in both cases the
    /// tree is unchanged.
    pub fn execute(&self, tree: &mut FileTree, request: &ToolCallRequest) -> Result<ToolOutput> {
        let command = ToolCommand::parse(request).inspect_err(|e| {
            if matches!(e, ToolError::UnknownCommand { .. } | ToolError::UnknownTool { .. }) {
                warn!(tool = %request.tool_name, error = %e, "rejected tool call");
            }
        })?;
        self.run(tree, &command)
    }

    /// Executes an already-parsed command.
    ///
    /// # Errors
    ///
    /// Returns the command's failure; the tree is unchanged.
    pub fn run(&self, tree: &mut FileTree, command: &ToolCommand) -> Result<ToolOutput> {
        let output = match command {
            ToolCommand::Editor(editor) => editor::execute(tree, editor, self.create_overwrites),
            ToolCommand::PathManager(path) => path_manager::execute(tree, path),
        }?;
        debug!(
            tool = command.family().as_str(),
            command = command.name(),
            path = %output.path(),
            "tool call applied"
        );
        Ok(output)
    }
}

impl Default for ToolInterpreter {
    fn default() -> Self {
        Self::new(&RuntimeConfig::default())
    }
}
