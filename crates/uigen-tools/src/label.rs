//! Human-readable invocation labels, e.g. "Editing App.jsx".

use crate::request::ToolCallRequest;
use serde_json::{Map, Value};
use uigen_core::ToolFamily;

/// Describes a tool call for display while it runs.
///
/// Only the last segment of each path argument is shown. Unknown tools are
/// described by their name.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use uigen_tools::label::describe;
///
/// let args = json!({"path": "/components/Button.tsx"});
/// assert_eq!(
///     describe("str_replace_editor", Some("create"), args.as_object().unwrap()),
///     "Creating Button.tsx"
/// );
///
/// let args = json!({"path": "/old-name.tsx", "new_path": "/new-name.tsx"});
/// assert_eq!(
///     describe("file_manager", Some("rename"), args.as_object().unwrap()),
///     "Renaming old-name.tsx to new-name.tsx"
/// );
/// ```
#[must_use]
pub fn describe(tool_name: &str, command: Option<&str>, args: &Map<String, Value>) -> String {
    let file = file_name(args, "path");
    match tool_name.parse::<ToolFamily>() {
        Ok(ToolFamily::Editor) => match command {
            Some("create") => format!("Creating {file}"),
            Some("str_replace") => format!("Editing {file}"),
            Some("insert") => format!("Inserting into {file}"),
            Some("view") => format!("Viewing {file}"),
            _ => format!("Modifying {file}"),
        },
        Ok(ToolFamily::PathManager) => match command {
            Some("rename") => format!("Renaming {file} to {}", file_name(args, "new_path")),
            Some("delete") => format!("Deleting {file}"),
            Some("mkdir") => format!("Creating directory {file}"),
            _ => format!("Managing {file}"),
        },
        Err(_) => tool_name.to_string(),
    }
}

impl ToolCallRequest {
    /// Human-readable label for this request; see [`describe`].
    #[must_use]
    pub fn label(&self) -> String {
        describe(&self.tool_name, self.command_name(), &self.args)
    }
}

/// Last non-empty segment of a string argument; the raw value if it has none.
fn file_name<'a>(args: &'a Map<String, Value>, field: &str) -> &'a str {
    let raw = args.get(field).and_then(Value::as_str).unwrap_or_default();
    raw.rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn label(tool: &str, args: Value) -> String {
        let request: ToolCallRequest =
            serde_json::from_value(json!({"toolName": tool, "args": args})).unwrap();
        request.label()
    }

    #[test]
    fn test_editor_labels() {
        assert_eq!(
            label("str_replace_editor", json!({"command": "str_replace", "path": "/App.tsx"})),
            "Editing App.tsx"
        );
        assert_eq!(
            label("str_replace_editor", json!({"command": "insert", "path": "/public/index.html"})),
            "Inserting into index.html"
        );
        assert_eq!(
            label("editor", json!({"command": "view", "path": "/README.md"})),
            "Viewing README.md"
        );
    }

    #[test]
    fn test_path_manager_labels() {
        assert_eq!(
            label("file_manager", json!({"command": "delete", "path": "/components/OldComponent.tsx"})),
            "Deleting OldComponent.tsx"
        );
        assert_eq!(
            label("path_manager", json!({"command": "mkdir", "path": "/components/ui"})),
            "Creating directory ui"
        );
    }

    #[test]
    fn test_fallback_labels() {
        assert_eq!(
            label("str_replace_editor", json!({"command": "undo_edit", "path": "/TextInput.tsx"})),
            "Modifying TextInput.tsx"
        );
        assert_eq!(
            label("str_replace_editor", json!({"path": "/test.txt"})),
            "Modifying test.txt"
        );
        assert_eq!(
            label("file_manager", json!({"command": "copy", "path": "/x.ts"})),
            "Managing x.ts"
        );
        assert_eq!(label("unknown_tool", json!({})), "unknown_tool");
    }

    #[test]
    fn test_path_without_slash() {
        assert_eq!(
            label("str_replace_editor", json!({"command": "create", "path": "simple.txt"})),
            "Creating simple.txt"
        );
    }

    #[test]
    fn test_top_level_command_used() {
        let request = ToolCallRequest::editor("view", json!({"path": "/a/b.js"}));
        assert_eq!(request.label(), "Viewing b.js");
    }
}
