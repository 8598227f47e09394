//! Output formatters for CLI commands.
//!
//! JSON, text, and pretty renderings of any serializable report.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use uigen_core::cli::OutputFormat;

/// Format data according to the specified output format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Examples
///
/// ```
/// use serde::Serialize;
/// use uigen_cli::formatters::format_output;
/// use uigen_core::cli::OutputFormat;
///
/// #[derive(Serialize)]
/// struct Summary {
///     succeeded: usize,
///     failed: usize,
/// }
///
/// let output = format_output(&Summary { succeeded: 2, failed: 0 }, OutputFormat::Json)?;
/// assert!(output.contains("\"succeeded\": 2"));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(data),
        OutputFormat::Text => text::format(data),
        OutputFormat::Pretty => pretty::format(data),
    }
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Format data as JSON with 2-space indentation.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }

    /// Format data as single-line JSON.
    pub fn format_compact<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string(data)?)
    }
}

/// Plain text output formatting.
pub mod text {
    use super::{Result, Serialize, json};

    /// Format data as single-line JSON, for piping to other tools.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        json::format_compact(data)
    }
}

/// Colorized output formatting.
pub mod pretty {
    use super::{Colorize, Result, Serialize};
    use serde_json::Value;

    /// Format data as colorized, indented JSON-like output.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        Ok(format_value(&value, 0))
    }

    fn format_value(value: &Value, indent: usize) -> String {
        let indent_str = "  ".repeat(indent);
        let next_indent_str = "  ".repeat(indent + 1);

        match value {
            Value::Null => "null".dimmed().to_string(),
            Value::Bool(b) => b.to_string().yellow().to_string(),
            Value::Number(n) => n.to_string().cyan().to_string(),
            Value::String(s) => format!("\"{}\"", s.green()),
            Value::Array(arr) if arr.is_empty() => "[]".to_string(),
            Value::Array(arr) => {
                let items: Vec<_> = arr
                    .iter()
                    .map(|item| format!("{next_indent_str}{}", format_value(item, indent + 1)))
                    .collect();
                format!("[\n{}\n{indent_str}]", items.join(",\n"))
            }
            Value::Object(obj) if obj.is_empty() => "{}".to_string(),
            Value::Object(obj) => {
                let fields: Vec<_> = obj
                    .iter()
                    .map(|(key, val)| {
                        format!(
                            "{next_indent_str}\"{}\": {}",
                            key.blue().bold(),
                            format_value(val, indent + 1)
                        )
                    })
                    .collect();
                format!("{{\n{}\n{indent_str}}}", fields.join(",\n"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestData {
        path: String,
        files: usize,
        ok: bool,
        entries: Vec<String>,
    }

    fn data() -> TestData {
        TestData {
            path: "/App.jsx".to_string(),
            files: 3,
            ok: true,
            entries: vec!["a.js".to_string(), "b.js".to_string()],
        }
    }

    #[test]
    fn test_json_format() {
        let output = json::format(&data()).unwrap();
        assert!(output.contains("\"path\": \"/App.jsx\""));
        assert!(output.contains("\"files\": 3"));
        assert!(output.contains('\n'));
    }

    #[test]
    fn test_text_format_is_single_line() {
        let output = format_output(&data(), OutputFormat::Text).unwrap();
        assert!(!output.contains('\n'));
        assert!(output.contains("\"path\":\"/App.jsx\""));
    }

    #[test]
    fn test_pretty_format() {
        colored::control::set_override(false);
        let output = format_output(&data(), OutputFormat::Pretty).unwrap();
        assert!(output.contains("\"path\": \"/App.jsx\""));
        assert!(output.contains("\"ok\": true"));
        assert!(output.contains("  \"entries\": [\n    \"a.js\",\n    \"b.js\"\n  ]"));
    }

    #[test]
    fn test_pretty_format_empty_collections() {
        colored::control::set_override(false);
        let output = pretty::format(&serde_json::json!({"a": [], "b": {}})).unwrap();
        assert!(output.contains("\"a\": []"));
        assert!(output.contains("\"b\": {}"));
    }
}
