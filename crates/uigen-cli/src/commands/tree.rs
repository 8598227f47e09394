//! Tree command implementation.
//!
//! Prints a snapshot as an indented tree, directories before files within
//! each directory, followed by the entry point.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use uigen_core::RuntimeConfig;
use uigen_core::cli::{ExitCode, OutputFormat};
use uigen_files::{FilePath, FileTree, Node, NodeKind};

use super::common;

/// Kind of a listed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Text file
    File,
    /// Directory
    Directory,
}

/// One node of the printed tree.
#[derive(Debug, Clone, Serialize)]
pub struct TreeEntry {
    /// Absolute path
    pub path: FilePath,
    /// File or directory
    pub kind: EntryKind,
    /// Nesting level; children of the root are at 0
    pub depth: usize,
    /// Content length in bytes, files only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
}

/// Listing of a whole tree.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeReport {
    /// Every node except the root, in display order
    pub entries: Vec<TreeEntry>,
    /// Number of files
    pub files: usize,
    /// Number of directories, the root excluded
    pub directories: usize,
    /// Entry point, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_point: Option<FilePath>,
}

/// Lists `tree` in display order.
///
/// # Examples
///
/// ```
/// use uigen_cli::commands::tree::build_report;
/// use uigen_core::RuntimeConfig;
/// use uigen_files::{FileSnapshot, FileTree};
///
/// let snapshot = FileSnapshot::from_json(r#"{"/App.jsx": "", "/lib/util.js": ""}"#).unwrap();
/// let tree = FileTree::from_snapshot(&snapshot).unwrap();
///
/// let report = build_report(&tree, &RuntimeConfig::default());
/// let paths: Vec<_> = report.entries.iter().map(|e| e.path.as_str()).collect();
/// assert_eq!(paths, ["/lib", "/lib/util.js", "/App.jsx"]);
/// assert_eq!(report.entry_point.unwrap().as_str(), "/App.jsx");
/// ```
#[must_use]
pub fn build_report(tree: &FileTree, config: &RuntimeConfig) -> TreeReport {
    let mut entries = Vec::with_capacity(tree.node_count());
    if let Some(root) = tree.node(tree.root_id()) {
        collect(tree, root, 0, &mut entries);
    }
    let files = entries
        .iter()
        .filter(|entry| entry.kind == EntryKind::File)
        .count();
    let directories = entries.len() - files;

    TreeReport {
        entries,
        files,
        directories,
        entry_point: tree
            .to_snapshot()
            .entry_point(&config.entry_point)
            .cloned(),
    }
}

fn collect(tree: &FileTree, node: &Node, depth: usize, out: &mut Vec<TreeEntry>) {
    let NodeKind::Directory { children } = node.kind() else {
        return;
    };
    let (directories, files): (Vec<&Node>, Vec<&Node>) = children
        .values()
        .filter_map(|id| tree.node(*id))
        .partition(|child| child.is_dir());

    for child in directories.into_iter().chain(files) {
        out.push(TreeEntry {
            path: child.path().clone(),
            kind: if child.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            },
            depth,
            size: child.content().map(str::len),
        });
        collect(tree, child, depth + 1, out);
    }
}

/// Runs the tree command.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read or does not form a
/// valid tree.
pub fn run(snapshot: &Path, config: &RuntimeConfig, output_format: OutputFormat) -> Result<ExitCode> {
    let snapshot = common::read_snapshot(snapshot)?;
    let tree = FileTree::from_snapshot(&snapshot).context("snapshot does not form a valid tree")?;
    let report = build_report(&tree, config);

    let formatted = match output_format {
        OutputFormat::Pretty => render_pretty(&report),
        format => crate::formatters::format_output(&report, format)
            .context("failed to format tree")?,
    };
    println!("{formatted}");
    Ok(ExitCode::SUCCESS)
}

fn render_pretty(report: &TreeReport) -> String {
    let mut out = String::from("/\n");
    for entry in &report.entries {
        let indent = "  ".repeat(entry.depth + 1);
        let name = entry.path.file_name().unwrap_or_default();
        match entry.kind {
            EntryKind::Directory => {
                out.push_str(&format!("{indent}{}\n", format!("{name}/").blue().bold()));
            }
            EntryKind::File => {
                let size = entry.size.unwrap_or_default();
                out.push_str(&format!("{indent}{name} {}\n", format!("({size} B)").dimmed()));
            }
        }
    }

    out.push_str(&format!(
        "\n{} files, {} directories, ",
        report.files, report.directories
    ));
    match &report.entry_point {
        Some(entry) => out.push_str(&format!("entry point {}", entry.as_str().cyan())),
        None => out.push_str(&"no entry point".yellow().to_string()),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use uigen_files::FileSnapshot;

    fn tree(json: &str) -> FileTree {
        FileTree::from_snapshot(&FileSnapshot::from_json(json).unwrap()).unwrap()
    }

    #[test]
    fn test_directories_before_files_in_insertion_order() {
        let tree = tree(
            r#"{
                "/App.jsx": "app",
                "/zeta/z.js": "z",
                "/index.css": "",
                "/alpha/a.js": "aa"
            }"#,
        );
        let report = build_report(&tree, &RuntimeConfig::default());
        let paths: Vec<_> = report.entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            [
                "/zeta",
                "/zeta/z.js",
                "/alpha",
                "/alpha/a.js",
                "/App.jsx",
                "/index.css"
            ]
        );
        assert_eq!(report.files, 4);
        assert_eq!(report.directories, 2);
        assert_eq!(report.entries[3].depth, 1);
        assert_eq!(report.entries[3].size, Some(2));
    }

    #[test]
    fn test_empty_tree_has_no_entry_point() {
        let report = build_report(&FileTree::new(), &RuntimeConfig::default());
        assert!(report.entries.is_empty());
        assert!(report.entry_point.is_none());
    }

    #[test]
    fn test_render_pretty() {
        colored::control::set_override(false);
        let report = build_report(&tree(r#"{"/src/App.tsx": "x"}"#), &RuntimeConfig::default());
        let rendered = render_pretty(&report);
        assert!(rendered.contains("  src/\n"));
        assert!(rendered.contains("    App.tsx (1 B)"));
        assert!(rendered.contains("no entry point"));
    }
}
