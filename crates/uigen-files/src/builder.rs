//! Builder pattern for constructing file trees.
//!
//! Provides a fluent API for seeding a project tree, typically in tests or
//! when loading fixtures. Unlike the tree primitives, the builder creates
//! missing ancestor directories and replaces existing files.
//!
//! # Examples
//!
//! ```
//! use uigen_files::FilesBuilder;
//!
//! let tree = FilesBuilder::new()
//!     .add_file("/App.jsx", "export default function App() {}")
//!     .add_file("/components/Button.jsx", "export function Button() {}")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(tree.file_count(), 2);
//! ```

use crate::snapshot::FileSnapshot;
use crate::tree::FileTree;
use crate::types::{FilePath, FilesError, Result};

/// Builder for constructing a [`FileTree`].
///
/// Errors from individual additions are collected and the first one is
/// returned by [`FilesBuilder::build`].
#[derive(Debug, Default)]
pub struct FilesBuilder {
    tree: FileTree,
    errors: Vec<FilesError>,
}

impl FilesBuilder {
    /// Creates a builder for an empty tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use uigen_files::FilesBuilder;
    ///
    /// let tree = FilesBuilder::new().build().unwrap();
    /// assert_eq!(tree.file_count(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder seeded with every file of a snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &FileSnapshot) -> Self {
        Self::new().add_files(
            snapshot
                .iter()
                .map(|(path, content)| (path.as_str(), content)),
        )
    }

    /// Adds a file, creating missing ancestors and replacing any existing
    /// file at `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use uigen_files::{FilePath, FilesBuilder};
    ///
    /// let tree = FilesBuilder::new()
    ///     .add_file("/a/b/c.txt", "first")
    ///     .add_file("/a/b/c.txt", "second")
    ///     .build()
    ///     .unwrap();
    ///
    /// let path = FilePath::new("/a/b/c.txt").unwrap();
    /// assert_eq!(tree.read_file(&path).unwrap(), "second");
    /// ```
    #[must_use]
    pub fn add_file(mut self, path: impl AsRef<str>, content: impl Into<String>) -> Self {
        if let Err(e) = self.try_add_file(path.as_ref(), content.into()) {
            self.errors.push(e);
        }
        self
    }

    /// Adds multiple files at once.
    #[must_use]
    pub fn add_files<P, C>(mut self, files: impl IntoIterator<Item = (P, C)>) -> Self
    where
        P: AsRef<str>,
        C: Into<String>,
    {
        for (path, content) in files {
            self = self.add_file(path, content);
        }
        self
    }

    /// Adds a directory and any missing ancestors.
    #[must_use]
    pub fn add_directory(mut self, path: impl AsRef<str>) -> Self {
        let result = FilePath::new(path).and_then(|path| self.tree.create_dir_all(&path));
        if let Err(e) = result {
            self.errors.push(e);
        }
        self
    }

    /// Consumes the builder and returns the constructed tree.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered while adding entries.
    ///
    /// ```
    /// use uigen_files::FilesBuilder;
    ///
    /// let result = FilesBuilder::new()
    ///     .add_file("relative/path.txt", "content")
    ///     .build();
    ///
    /// assert!(result.is_err());
    /// ```
    pub fn build(self) -> Result<FileTree> {
        if let Some(error) = self.errors.into_iter().next() {
            return Err(error);
        }
        Ok(self.tree)
    }

    /// Number of files added so far.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.tree.file_count()
    }

    fn try_add_file(&mut self, raw: &str, content: String) -> Result<()> {
        let path = FilePath::new(raw)?;
        if self.tree.is_file(&path) {
            return self.tree.write_file(&path, content);
        }
        if let Some(parent) = path.parent() {
            self.tree.create_dir_all(&parent)?;
        }
        self.tree.create_file(&path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_creates_ancestors() {
        let tree = FilesBuilder::new()
            .add_file("/src/components/ui/Card.jsx", "card")
            .build()
            .unwrap();

        for dir in ["/src", "/src/components", "/src/components/ui"] {
            assert!(tree.is_dir(&FilePath::new(dir).unwrap()));
        }
    }

    #[test]
    fn test_builder_collects_first_error() {
        let err = FilesBuilder::new()
            .add_file("/ok.txt", "")
            .add_file("bad", "")
            .add_file("/also/../../bad", "")
            .build()
            .unwrap_err();

        assert!(err.is_invalid_path());
        assert_eq!(err.path(), "bad");
    }

    #[test]
    fn test_builder_file_under_file_fails() {
        let err = FilesBuilder::new()
            .add_file("/a", "file")
            .add_file("/a/b.txt", "")
            .build()
            .unwrap_err();
        assert!(err.is_not_directory());
    }

    #[test]
    fn test_builder_directory_and_count() {
        let builder = FilesBuilder::new()
            .add_directory("/empty/nested")
            .add_files([("/one.txt", "1"), ("/two.txt", "2")]);
        assert_eq!(builder.file_count(), 2);

        let tree = builder.build().unwrap();
        assert!(tree.is_dir(&FilePath::new("/empty/nested").unwrap()));
    }

    #[test]
    fn test_builder_from_snapshot() {
        let mut snapshot = FileSnapshot::new();
        snapshot.insert(FilePath::new("/App.jsx").unwrap(), "app");
        snapshot.insert(FilePath::new("/lib/util.js").unwrap(), "util");

        let tree = FilesBuilder::from_snapshot(&snapshot).build().unwrap();
        assert_eq!(tree.to_snapshot(), snapshot);
    }
}
