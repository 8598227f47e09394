//! Runtime configuration for the tool runtime.
//!
//! Configuration is plain data with serde defaults, so a TOML document only
//! needs to name the settings it changes.
//!
//! # Examples
//!
//! ```
//! use uigen_core::RuntimeConfig;
//!
//! // Use default configuration
//! let config = RuntimeConfig::default();
//! assert_eq!(config.queue_capacity, 64);
//! assert!(config.create_overwrites);
//!
//! // Override from TOML
//! let custom = RuntimeConfig::from_toml_str("queue_capacity = 8").unwrap();
//! assert_eq!(custom.queue_capacity, 8);
//! assert_eq!(custom.entry_point.stem, "App");
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Runtime configuration for project sessions and the tool interpreter.
///
/// # Examples
///
/// ```
/// use uigen_core::RuntimeConfig;
///
/// let config = RuntimeConfig {
///     queue_capacity: 16,
///     create_overwrites: false,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Capacity of each project's invocation queue.
    ///
    /// Submissions wait when the queue is full.
    /// Default: 64
    pub queue_capacity: usize,

    /// Whether the editor `create` command overwrites an existing file.
    ///
    /// When `false`, `create` on an occupied path fails with
    /// `PathAlreadyExists` like the underlying tree primitive.
    /// Default: true
    pub create_overwrites: bool,

    /// How the preview entry point is located in a snapshot.
    pub entry_point: EntryPointConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 64,
            create_overwrites: true,
            entry_point: EntryPointConfig::default(),
        }
    }
}

impl RuntimeConfig {
    /// Parses and validates configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` if the document is not valid TOML, has
    /// fields of the wrong type, or fails [`RuntimeConfig::validate`].
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source).map_err(|e| Error::ConfigError {
            message: format!("failed to parse configuration: {e}"),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read, otherwise the errors
    /// of [`RuntimeConfig::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` if:
    /// - Queue capacity is zero
    /// - Entry point stem is empty
    /// - Entry point extension list is empty or contains an empty entry
    ///
    /// # Examples
    ///
    /// ```
    /// use uigen_core::RuntimeConfig;
    ///
    /// let mut invalid = RuntimeConfig::default();
    /// invalid.queue_capacity = 0;
    /// assert!(invalid.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.queue_capacity == 0 {
            return Err(Error::ConfigError {
                message: "queue_capacity must be greater than zero".to_string(),
            });
        }
        self.entry_point.validate()
    }
}

/// Locates the project's preview entry point, `/<stem>.<ext>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryPointConfig {
    /// File stem of the entry point. Default: `App`
    pub stem: String,

    /// Extensions in order of preference. Default: `jsx`, `tsx`, `js`, `ts`
    pub extensions: Vec<String>,
}

impl Default for EntryPointConfig {
    fn default() -> Self {
        Self {
            stem: "App".to_string(),
            extensions: ["jsx", "tsx", "js", "ts"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl EntryPointConfig {
    fn validate(&self) -> Result<()> {
        if self.stem.is_empty() || self.stem.contains('/') {
            return Err(Error::ConfigError {
                message: format!("entry_point.stem is invalid: '{}'", self.stem),
            });
        }
        if self.extensions.is_empty() {
            return Err(Error::ConfigError {
                message: "entry_point.extensions must not be empty".to_string(),
            });
        }
        if self.extensions.iter().any(|ext| ext.is_empty() || ext.contains('/')) {
            return Err(Error::ConfigError {
                message: "entry_point.extensions contains an invalid extension".to_string(),
            });
        }
        Ok(())
    }

    /// Candidate file names in order of preference, e.g. `App.jsx`.
    ///
    /// # Examples
    ///
    /// ```
    /// use uigen_core::EntryPointConfig;
    ///
    /// let names = EntryPointConfig::default().candidate_names();
    /// assert_eq!(names[0], "App.jsx");
    /// assert_eq!(names.len(), 4);
    /// ```
    #[must_use]
    pub fn candidate_names(&self) -> Vec<String> {
        self.extensions
            .iter()
            .map(|ext| format!("{}.{ext}", self.stem))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = RuntimeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.queue_capacity, 64);
        assert!(config.create_overwrites);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = RuntimeConfig::from_toml_str(
            r#"
create_overwrites = false

[entry_point]
extensions = ["tsx"]
"#,
        )
        .unwrap();

        assert!(!config.create_overwrites);
        assert_eq!(config.queue_capacity, 64);
        assert_eq!(config.entry_point.stem, "App");
        assert_eq!(config.entry_point.candidate_names(), vec!["App.tsx"]);
    }

    #[test]
    fn test_zero_queue_capacity_rejected() {
        let err = RuntimeConfig::from_toml_str("queue_capacity = 0").unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_wrong_type_rejected() {
        let err = RuntimeConfig::from_toml_str("queue_capacity = \"many\"").unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_empty_extensions_rejected() {
        let err = RuntimeConfig::from_toml_str("[entry_point]\nextensions = []").unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "queue_capacity = 4").unwrap();

        let config = RuntimeConfig::from_file(file.path()).unwrap();
        assert_eq!(config.queue_capacity, 4);
    }

    #[test]
    fn test_from_missing_file() {
        let err = RuntimeConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(err.is_io_error());
    }
}
