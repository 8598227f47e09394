//! Input and output helpers shared across CLI commands.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use uigen_core::RuntimeConfig;
use uigen_files::FileSnapshot;
use uigen_tools::ToolCallRequest;

/// Default location of the runtime configuration file.
///
/// Returns `None` if the platform has no configuration directory.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("uigen").join("config.toml"))
}

/// Loads the runtime configuration.
///
/// An explicit path must exist. Without one, the default location is used
/// when present, otherwise built-in defaults apply.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid config.
///
/// # Examples
///
/// ```
/// use uigen_cli::commands::common::load_config;
///
/// let dir = tempfile::tempdir()?;
/// let path = dir.path().join("uigen.toml");
/// std::fs::write(&path, "queue_capacity = 8")?;
///
/// let config = load_config(Some(&path))?;
/// assert_eq!(config.queue_capacity, 8);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn load_config(path: Option<&Path>) -> Result<RuntimeConfig> {
    if let Some(path) = path {
        return RuntimeConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()));
    }

    match default_config_path() {
        Some(path) if path.is_file() => {
            debug!(path = %path.display(), "using default config file");
            RuntimeConfig::from_file(&path)
                .with_context(|| format!("failed to load config from {}", path.display()))
        }
        _ => Ok(RuntimeConfig::default()),
    }
}

/// Reads a snapshot file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON object of
/// absolute paths to strings.
pub fn read_snapshot(path: &Path) -> Result<FileSnapshot> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    FileSnapshot::from_json(&source)
        .with_context(|| format!("invalid snapshot {}", path.display()))
}

/// Writes a snapshot file as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_snapshot(path: &Path, snapshot: &FileSnapshot) -> Result<()> {
    let json = snapshot.to_json().context("failed to serialize snapshot")?;
    fs::write(path, json).with_context(|| format!("failed to write snapshot {}", path.display()))
}

/// Reads a script of tool-call requests.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON array of
/// requests.
pub fn read_script(path: &Path) -> Result<Vec<ToolCallRequest>> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    serde_json::from_str(&source).with_context(|| format!("invalid script {}", path.display()))
}
