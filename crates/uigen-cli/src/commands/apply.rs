//! Apply command implementation.
//!
//! Replays a script of tool calls through a project session and reports the
//! outcome of every call.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use uigen_core::cli::{ExitCode, OutputFormat};
use uigen_core::{ProjectId, RuntimeConfig};
use uigen_files::{FilePath, FileSnapshot};
use uigen_runtime::{InvocationState, ProjectRegistry, ToolCallResult, ToolInvocation, TrackerStats};
use uigen_tools::{ToolCallRequest, ToolOutput};

use super::common;

/// Inputs of the apply command.
#[derive(Debug, Clone)]
pub struct ApplyOptions {
    /// Script file
    pub script: PathBuf,
    /// Snapshot to start from; empty project when absent
    pub snapshot: Option<PathBuf>,
    /// Where to write the resulting snapshot
    pub output: Option<PathBuf>,
    /// Project identifier
    pub project: String,
}

/// Outcome of one replayed call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallReport {
    /// Human-readable label, e.g. "Creating App.jsx"
    pub label: String,
    /// Transport result of the call
    #[serde(flatten)]
    pub result: ToolCallResult,
}

impl From<&ToolInvocation> for CallReport {
    fn from(invocation: &ToolInvocation) -> Self {
        Self {
            label: invocation.label().to_string(),
            result: invocation.to_result(),
        }
    }
}

/// Outcome of a whole script.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyReport {
    /// Project the script ran against
    pub project: ProjectId,
    /// One entry per call, in script order
    pub calls: Vec<CallReport>,
    /// Counts by final state
    pub stats: TrackerStats,
    /// Files in the resulting tree
    pub files: usize,
    /// Entry point of the resulting tree, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_point: Option<FilePath>,
}

impl ApplyReport {
    /// `TOOL_FAILURE` if any call failed, `SUCCESS` otherwise.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        ExitCode::for_failures(self.stats.failed)
    }
}

/// Replays `requests` against a project seeded from `initial`.
///
/// Returns the report and the final snapshot. Failed calls are recorded in
/// the report and do not stop the replay.
///
/// # Errors
///
/// Returns an error if `initial` does not form a valid tree or the session
/// stops unexpectedly.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use uigen_cli::commands::apply::apply;
/// use uigen_core::{ProjectId, RuntimeConfig};
/// use uigen_files::FileSnapshot;
/// use uigen_tools::ToolCallRequest;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> anyhow::Result<()> {
/// let requests = vec![ToolCallRequest::editor(
///     "create",
///     json!({"path": "/App.jsx", "content": "export default 1"}),
/// )];
///
/// let (report, snapshot) = apply(
///     requests,
///     &FileSnapshot::new(),
///     ProjectId::new("demo"),
///     &RuntimeConfig::default(),
/// )
/// .await?;
///
/// assert_eq!(report.stats.succeeded, 1);
/// assert_eq!(snapshot.get("/App.jsx"), Some("export default 1"));
/// # Ok(())
/// # }
/// ```
pub async fn apply(
    requests: Vec<ToolCallRequest>,
    initial: &FileSnapshot,
    project: ProjectId,
    config: &RuntimeConfig,
) -> Result<(ApplyReport, FileSnapshot)> {
    let registry = ProjectRegistry::new(config.clone());
    let session = registry
        .open(project.clone(), initial)
        .await
        .context("initial snapshot does not form a valid tree")?;

    let mut calls = Vec::with_capacity(requests.len());
    for request in requests {
        let record = session.execute(request).await?;
        calls.push(CallReport::from(&record));
    }

    let snapshot = session.snapshot().await?;
    let stats = session.stats().await;
    registry.close(&project).await?;

    let report = ApplyReport {
        project,
        calls,
        stats,
        files: snapshot.len(),
        entry_point: snapshot.entry_point(&config.entry_point).cloned(),
    };
    Ok((report, snapshot))
}

/// Runs the apply command.
///
/// Prints the report, writes the resulting snapshot when requested, and
/// returns `TOOL_FAILURE` if any call failed.
///
/// # Errors
///
/// Returns an error if an input file is missing or malformed, or the
/// output snapshot cannot be written.
pub async fn run(
    options: ApplyOptions,
    config: &RuntimeConfig,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let requests = common::read_script(&options.script)?;
    let initial = match &options.snapshot {
        Some(path) => common::read_snapshot(path)?,
        None => FileSnapshot::new(),
    };
    info!(
        calls = requests.len(),
        files = initial.len(),
        project = %options.project,
        "replaying script"
    );

    let (report, snapshot) =
        apply(requests, &initial, ProjectId::new(options.project), config).await?;

    if let Some(path) = &options.output {
        common::write_snapshot(path, &snapshot)?;
        info!(path = %path.display(), files = snapshot.len(), "snapshot written");
    }

    let formatted = match output_format {
        OutputFormat::Pretty => render_pretty(&report),
        format => crate::formatters::format_output(&report, format)
            .context("failed to format apply report")?,
    };
    println!("{formatted}");

    Ok(report.exit_code())
}

/// One line per call, payloads of read commands indented below, then a summary.
fn render_pretty(report: &ApplyReport) -> String {
    let mut out = String::new();
    for call in &report.calls {
        let result = &call.result;
        match (result.state, &result.result_payload, &result.error) {
            (InvocationState::Succeeded, Some(payload), _) => {
                out.push_str(&format!("{} {}\n", "✓".green(), call.label));
                if matches!(
                    payload,
                    ToolOutput::FileContent { .. } | ToolOutput::DirectoryListing { .. }
                ) {
                    for line in payload.to_string().lines() {
                        out.push_str(&format!("    {}\n", line.dimmed()));
                    }
                }
            }
            (_, _, Some(error)) => {
                out.push_str(&format!(
                    "{} {} {}\n",
                    "✗".red(),
                    call.label,
                    format!("({}: {})", error.kind, error.message).red()
                ));
            }
            (state, _, _) => {
                out.push_str(&format!("{} {} [{state}]\n", "?".yellow(), call.label));
            }
        }
    }

    out.push_str(&format!(
        "\n{} succeeded, {} failed, {} files",
        report.stats.succeeded.to_string().green().bold(),
        report.stats.failed.to_string().red().bold(),
        report.files
    ));
    if let Some(entry) = &report.entry_point {
        out.push_str(&format!(", entry point {}", entry.as_str().cyan()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uigen_tools::ErrorKind;

    fn config() -> RuntimeConfig {
        RuntimeConfig::default()
    }

    #[tokio::test]
    async fn test_apply_mixed_script() {
        let requests = vec![
            ToolCallRequest::path_manager("mkdir", json!({"path": "/components"})),
            ToolCallRequest::editor(
                "create",
                json!({"path": "/components/Button.jsx", "content": "<button/>"}),
            ),
            ToolCallRequest::editor(
                "str_replace",
                json!({"path": "/components/Button.jsx", "old_str": "missing", "new_str": "x"}),
            ),
            ToolCallRequest::editor(
                "create",
                json!({"path": "/App.jsx", "content": "import Button from './components/Button'"}),
            ),
        ];

        let (report, snapshot) = apply(requests, &FileSnapshot::new(), ProjectId::new("t"), &config())
            .await
            .unwrap();

        assert_eq!(report.calls.len(), 4);
        assert_eq!(report.stats.succeeded, 3);
        assert_eq!(report.stats.failed, 1);
        assert_eq!(report.exit_code(), ExitCode::TOOL_FAILURE);
        assert_eq!(
            report.calls[2].result.error.as_ref().unwrap().kind,
            ErrorKind::NoMatch
        );
        assert_eq!(report.calls[1].label, "Creating Button.jsx");
        assert_eq!(report.entry_point.as_ref().unwrap().as_str(), "/App.jsx");
        assert_eq!(snapshot.len(), 2);
    }

    #[tokio::test]
    async fn test_apply_continues_from_snapshot() {
        let initial = FileSnapshot::from_json(r#"{"/App.jsx": "let a = 1;"}"#).unwrap();
        let requests = vec![ToolCallRequest::editor(
            "str_replace",
            json!({"path": "/App.jsx", "old_str": "1", "new_str": "2"}),
        )];

        let (report, snapshot) = apply(requests, &initial, ProjectId::new("t"), &config())
            .await
            .unwrap();

        assert_eq!(report.exit_code(), ExitCode::SUCCESS);
        assert_eq!(snapshot.get("/App.jsx"), Some("let a = 2;"));
    }

    #[tokio::test]
    async fn test_apply_rejects_conflicting_snapshot() {
        let initial = FileSnapshot::from_json(r#"{"/a": "x", "/a/b": "y"}"#).unwrap();
        let err = apply(Vec::new(), &initial, ProjectId::new("t"), &config())
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("initial snapshot"));
    }

    #[tokio::test]
    async fn test_report_json_shape() {
        let requests = vec![ToolCallRequest::editor("view", json!({"path": "/"}))];
        let (report, _) = apply(requests, &FileSnapshot::new(), ProjectId::new("t"), &config())
            .await
            .unwrap();

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["project"], "t");
        assert_eq!(value["calls"][0]["label"], "Viewing /");
        assert_eq!(value["calls"][0]["state"], "succeeded");
        assert!(value["calls"][0].get("invocationId").is_some());
        assert!(value.get("entryPoint").is_none());
    }

    #[tokio::test]
    async fn test_render_pretty_lists_every_call() {
        colored::control::set_override(false);
        let requests = vec![
            ToolCallRequest::editor("create", json!({"path": "/a.txt", "content": "hi"})),
            ToolCallRequest::editor("view", json!({"path": "/a.txt"})),
            ToolCallRequest::path_manager("delete", json!({"path": "/missing"})),
        ];
        let (report, _) = apply(requests, &FileSnapshot::new(), ProjectId::new("t"), &config())
            .await
            .unwrap();

        let rendered = render_pretty(&report);
        assert!(rendered.contains("✓ Creating a.txt"));
        assert!(rendered.contains("    hi"));
        assert!(rendered.contains("✗ Deleting missing (PathNotFound"));
        assert!(rendered.contains("2 succeeded, 1 failed, 1 files"));
    }
}
