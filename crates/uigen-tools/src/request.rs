//! Tool-call requests as delivered by the agent transport.

use crate::error::{Result, ToolError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uigen_core::ToolFamily;

/// A single tool call.
///
/// The command may be given at the top level or, as the agent transport
/// sends it, inside `args.command`.
///
/// # Examples
///
/// ```
/// use uigen_tools::ToolCallRequest;
///
/// let request: ToolCallRequest = serde_json::from_str(
///     r#"{"toolName": "str_replace_editor", "args": {"command": "view", "path": "/App.jsx"}}"#,
/// )
/// .unwrap();
///
/// assert_eq!(request.command_name(), Some("view"));
/// assert_eq!(request.family().unwrap().as_str(), "editor");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallRequest {
    /// Tool name: `editor`, `path_manager`, or one of their aliases
    #[serde(alias = "tool_name")]
    pub tool_name: String,

    /// Command name, when not carried inside `args`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// Argument bag
    #[serde(default)]
    pub args: Map<String, Value>,
}

impl ToolCallRequest {
    /// Creates a request with a top-level command.
    #[must_use]
    pub fn new(family: ToolFamily, command: impl Into<String>, args: Map<String, Value>) -> Self {
        Self {
            tool_name: family.as_str().to_string(),
            command: Some(command.into()),
            args,
        }
    }

    /// Builds an editor request from a JSON object of arguments.
    ///
    /// Non-object `args` are treated as empty.
    #[must_use]
    pub fn editor(command: &str, args: Value) -> Self {
        Self::new(ToolFamily::Editor, command, into_map(args))
    }

    /// Builds a path-manager request from a JSON object of arguments.
    #[must_use]
    pub fn path_manager(command: &str, args: Value) -> Self {
        Self::new(ToolFamily::PathManager, command, into_map(args))
    }

    /// Effective command name: top-level first, then `args.command`.
    #[must_use]
    pub fn command_name(&self) -> Option<&str> {
        self.command
            .as_deref()
            .or_else(|| self.args.get("command").and_then(Value::as_str))
    }

    /// Resolves the tool family.
    ///
    /// # Errors
    ///
    /// Returns `ToolError::UnknownTool` if the name is not recognized.
    pub fn family(&self) -> Result<ToolFamily> {
        self.tool_name
            .parse()
            .map_err(|_| ToolError::UnknownTool {
                name: self.tool_name.clone(),
            })
    }

    /// Merges streamed arguments into the bag, later keys winning.
    pub fn merge_args(&mut self, args: Map<String, Value>) {
        self.args.extend(args);
    }
}

fn into_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
