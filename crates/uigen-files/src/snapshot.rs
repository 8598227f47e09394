//! Flat path-to-content snapshots of a file tree.
//!
//! A snapshot is a JSON object whose keys are normalized file paths and
//! whose values are file contents. Directories are implicit: restoring a
//! snapshot creates every ancestor directory a file needs. Empty
//! directories are not captured.
//!
//! # Examples
//!
//! ```
//! use uigen_files::{FileSnapshot, FileTree};
//!
//! let snapshot = FileSnapshot::from_json(
//!     r#"{"/App.jsx": "export default function App() {}", "/components/Card.jsx": ""}"#,
//! )
//! .unwrap();
//!
//! let tree = FileTree::from_snapshot(&snapshot).unwrap();
//! assert!(tree.is_dir(&"/components".parse().unwrap()));
//! assert_eq!(tree.to_snapshot(), snapshot);
//! ```

use crate::tree::FileTree;
use crate::types::{FilePath, Result};
use indexmap::IndexMap;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use tracing::debug;
use uigen_core::EntryPointConfig;

/// Files of a project keyed by path, in tree order.
///
/// Deserialization normalizes keys and rejects two keys that name the same
/// path, such as `"/a"` and `"/a/"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FileSnapshot {
    files: IndexMap<FilePath, String>,
}

impl<'de> Deserialize<'de> for FileSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(SnapshotVisitor)
    }
}

struct SnapshotVisitor;

impl<'de> Visitor<'de> for SnapshotVisitor {
    type Value = FileSnapshot;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping file paths to contents")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
        let mut files = IndexMap::with_capacity(map.size_hint().unwrap_or_default());
        while let Some((path, content)) = map.next_entry::<FilePath, String>()? {
            if files.contains_key(&path) {
                return Err(de::Error::custom(format!("duplicate snapshot path '{path}'")));
            }
            files.insert(path, content);
        }
        Ok(FileSnapshot { files })
    }
}

impl FileSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a file.
    pub fn insert(&mut self, path: FilePath, content: impl Into<String>) {
        self.files.insert(path, content.into());
    }

    /// Content of the file at `path`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    /// Number of files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if the snapshot holds no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterates files in snapshot order.
    pub fn iter(&self) -> impl Iterator<Item = (&FilePath, &str)> {
        self.files.iter().map(|(path, content)| (path, content.as_str()))
    }

    /// Locates the preview entry point.
    ///
    /// Candidates from `config` are tried in order of preference at the
    /// root. Failing that, the first root file named `<stem>.<anything>` is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use uigen_core::EntryPointConfig;
    /// use uigen_files::FileSnapshot;
    ///
    /// let snapshot = FileSnapshot::from_json(r#"{"/App.tsx": "", "/App.jsx": ""}"#).unwrap();
    /// let entry = snapshot.entry_point(&EntryPointConfig::default()).unwrap();
    /// assert_eq!(entry.as_str(), "/App.jsx");
    /// ```
    #[must_use]
    pub fn entry_point(&self, config: &EntryPointConfig) -> Option<&FilePath> {
        let preferred = config.candidate_names().into_iter().find_map(|name| {
            self.files
                .get_key_value(format!("/{name}").as_str())
                .map(|(path, _)| path)
        });
        preferred.or_else(|| {
            let prefix = format!("{}.", config.stem);
            self.files.keys().find(|path| {
                path.depth() == 1
                    && path
                        .file_name()
                        .is_some_and(|name| name.starts_with(&prefix))
            })
        })
    }

    /// Parses a snapshot from a JSON object.
    ///
    /// Keys are normalized while parsing.
    ///
    /// # Errors
    ///
    /// Returns `Error::SerializationError` if the JSON is malformed, is not
    /// an object of strings, contains an invalid path, or names one path
    /// twice.
    pub fn from_json(source: &str) -> uigen_core::Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Serializes the snapshot as a pretty-printed JSON object.
    ///
    /// # Errors
    ///
    /// Returns `Error::SerializationError` if serialization fails.
    pub fn to_json(&self) -> uigen_core::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl FromIterator<(FilePath, String)> for FileSnapshot {
    fn from_iter<I: IntoIterator<Item = (FilePath, String)>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

impl FileTree {
    /// Captures every file as a flat snapshot in depth-first insertion order.
    #[must_use]
    pub fn to_snapshot(&self) -> FileSnapshot {
        self.files()
            .map(|(path, content)| (path.clone(), content.to_string()))
            .collect()
    }

    /// Rebuilds a tree from a snapshot, creating implicit directories.
    ///
    /// # Errors
    ///
    /// Returns `FilesError::NotADirectory` if one snapshot path is used both
    /// as a file and as a directory of another file.
    pub fn from_snapshot(snapshot: &FileSnapshot) -> Result<Self> {
        let mut tree = Self::new();
        for (path, content) in snapshot.iter() {
            if let Some(parent) = path.parent() {
                tree.create_dir_all(&parent)?;
            }
            tree.create_file(path, content)?;
        }
        debug!(files = snapshot.len(), "restored tree from snapshot");
        Ok(tree)
    }
}
