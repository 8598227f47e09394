//! Core types for the project file tree.
//!
//! This module defines the normalized path type and the error taxonomy of
//! tree operations.
//!
//! # Examples
//!
//! ```
//! use uigen_files::FilePath;
//!
//! let path = FilePath::new("/components/./ui/../Button.jsx").unwrap();
//! assert_eq!(path.as_str(), "/components/Button.jsx");
//! assert_eq!(path.file_name(), Some("Button.jsx"));
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during file tree operations.
///
/// Every variant carries the offending path so a calling agent can retry
/// with corrected arguments.
///
/// # Examples
///
/// ```
/// use uigen_files::FilesError;
///
/// let error = FilesError::PathNotFound {
///     path: "/missing.txt".to_string(),
/// };
///
/// assert!(error.is_not_found());
/// assert_eq!(error.path(), "/missing.txt");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilesError {
    /// Path string could not be normalized
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath {
        /// The raw path as supplied
        path: String,
        /// Why it was rejected
        reason: String,
    },

    /// No node exists at the path
    #[error("Path not found: {path}")]
    PathNotFound {
        /// The path that was not found
        path: String,
    },

    /// A node already occupies the path
    #[error("Path already exists: {path}")]
    PathAlreadyExists {
        /// The occupied path
        path: String,
    },

    /// Path exists but is a directory where a file was required
    #[error("Not a file: {path}")]
    NotAFile {
        /// The directory path
        path: String,
    },

    /// Path exists but is a file where a directory was required
    #[error("Not a directory: {path}")]
    NotADirectory {
        /// The file path
        path: String,
    },

    /// Rename target lies inside the subtree being moved
    #[error("Cannot move {from} into its own descendant {to}")]
    CyclicMove {
        /// Source of the move
        from: String,
        /// Target inside the source subtree
        to: String,
    },

    /// Operation is not permitted on this path (e.g. deleting the root)
    #[error("Invalid operation on {path}: {reason}")]
    InvalidOperation {
        /// The path the operation targeted
        path: String,
        /// Why the operation is not permitted
        reason: String,
    },
}

impl FilesError {
    /// Returns `true` if this is a path not found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::PathNotFound { .. })
    }

    /// Returns `true` if this is a path already exists error.
    #[must_use]
    pub const fn is_already_exists(&self) -> bool {
        matches!(self, Self::PathAlreadyExists { .. })
    }

    /// Returns `true` if this is a not-a-file error.
    #[must_use]
    pub const fn is_not_file(&self) -> bool {
        matches!(self, Self::NotAFile { .. })
    }

    /// Returns `true` if this is a not-a-directory error.
    ///
    /// # Examples
    ///
    /// ```
    /// use uigen_files::FilesError;
    ///
    /// let error = FilesError::NotADirectory {
    ///     path: "/file.txt".to_string(),
    /// };
    ///
    /// assert!(error.is_not_directory());
    /// ```
    #[must_use]
    pub const fn is_not_directory(&self) -> bool {
        matches!(self, Self::NotADirectory { .. })
    }

    /// Returns `true` if this is an invalid path error.
    #[must_use]
    pub const fn is_invalid_path(&self) -> bool {
        matches!(self, Self::InvalidPath { .. })
    }

    /// Returns `true` if this is a cyclic move error.
    #[must_use]
    pub const fn is_cyclic_move(&self) -> bool {
        matches!(self, Self::CyclicMove { .. })
    }

    /// Returns `true` if this is an invalid operation error.
    #[must_use]
    pub const fn is_invalid_operation(&self) -> bool {
        matches!(self, Self::InvalidOperation { .. })
    }

    /// Returns the path the error refers to.
    ///
    /// For `CyclicMove` this is the rename target.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::InvalidPath { path, .. }
            | Self::PathNotFound { path }
            | Self::PathAlreadyExists { path }
            | Self::NotAFile { path }
            | Self::NotADirectory { path }
            | Self::InvalidOperation { path, .. } => path,
            Self::CyclicMove { to, .. } => to,
        }
    }
}

/// Type alias for file tree operation results.
pub type Result<T> = std::result::Result<T, FilesError>;

/// A normalized, absolute project path.
///
/// Normal form: starts with `/`, segments separated by single slashes, no
/// `.` or `..` segments, no trailing slash except the root itself. Two paths
/// are equal iff their normal forms are byte-equal.
///
/// # Examples
///
/// ```
/// use uigen_files::FilePath;
///
/// assert_eq!(FilePath::new("/src/").unwrap().as_str(), "/src");
/// assert_eq!(FilePath::new("/a/b/../c").unwrap().as_str(), "/a/c");
///
/// // Invalid paths are rejected
/// assert!(FilePath::new("").is_err());
/// assert!(FilePath::new("relative/path").is_err());
/// assert!(FilePath::new("/../escape").is_err());
/// assert!(FilePath::new("/double//slash").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FilePath(String);

impl FilePath {
    /// Normalizes and validates a raw path string.
    ///
    /// `.` segments are dropped and `..` segments remove the preceding
    /// segment. A single trailing slash is accepted and stripped.
    ///
    /// # Errors
    ///
    /// Returns `FilesError::InvalidPath` if the path:
    /// - is empty
    /// - does not start with `/`
    /// - contains an empty segment (`//`)
    /// - contains a `..` that would escape the root
    /// - contains a NUL character
    pub fn new(raw: impl AsRef<str>) -> Result<Self> {
        let raw = raw.as_ref();
        let invalid = |reason: &str| FilesError::InvalidPath {
            path: raw.to_string(),
            reason: reason.to_string(),
        };

        if raw.is_empty() {
            return Err(invalid("path is empty"));
        }
        let Some(body) = raw.strip_prefix('/') else {
            return Err(invalid("path must be absolute"));
        };
        if raw.contains('\0') {
            return Err(invalid("path contains a NUL character"));
        }

        let body = match body.strip_suffix('/') {
            Some("") => return Err(invalid("path contains an empty segment")),
            Some(trimmed) => trimmed,
            None => body,
        };

        let mut segments: Vec<&str> = Vec::new();
        if !body.is_empty() {
            for segment in body.split('/') {
                match segment {
                    "" => return Err(invalid("path contains an empty segment")),
                    "." => {}
                    ".." => {
                        if segments.pop().is_none() {
                            return Err(invalid("path escapes the root"));
                        }
                    }
                    name => segments.push(name),
                }
            }
        }

        Ok(Self(format!("/{}", segments.join("/"))))
    }

    /// The root path `/`.
    #[must_use]
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Returns the parent path, or `None` for the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use uigen_files::FilePath;
    ///
    /// let path = FilePath::new("/components/Button.jsx").unwrap();
    /// assert_eq!(path.parent().unwrap().as_str(), "/components");
    /// assert_eq!(FilePath::new("/App.jsx").unwrap().parent().unwrap().as_str(), "/");
    /// assert!(FilePath::root().parent().is_none());
    /// ```
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        self.0.rfind('/').map(|pos| {
            if pos == 0 {
                Self::root()
            } else {
                Self(self.0[..pos].to_string())
            }
        })
    }

    /// Returns the last segment, or `None` for the root.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        if self.is_root() {
            return None;
        }
        self.0.rsplit('/').next()
    }

    /// Appends a single child name.
    ///
    /// # Errors
    ///
    /// Returns `FilesError::InvalidPath` if `name` is empty, `.`, `..`, or
    /// contains a slash or NUL.
    pub fn join(&self, name: &str) -> Result<Self> {
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\0']) {
            return Err(FilesError::InvalidPath {
                path: name.to_string(),
                reason: "not a valid path segment".to_string(),
            });
        }
        if self.is_root() {
            Ok(Self(format!("/{name}")))
        } else {
            Ok(Self(format!("{}/{name}", self.0)))
        }
    }

    /// Returns `true` if `other` lies strictly inside the subtree rooted here.
    ///
    /// # Examples
    ///
    /// ```
    /// use uigen_files::FilePath;
    ///
    /// let a = FilePath::new("/a").unwrap();
    /// assert!(a.is_ancestor_of(&FilePath::new("/a/b/c").unwrap()));
    /// assert!(!a.is_ancestor_of(&FilePath::new("/ab").unwrap()));
    /// assert!(!a.is_ancestor_of(&a));
    /// ```
    #[must_use]
    pub fn is_ancestor_of(&self, other: &Self) -> bool {
        if self.is_root() {
            return !other.is_root();
        }
        other
            .0
            .strip_prefix(self.0.as_str())
            .is_some_and(|rest| rest.starts_with('/'))
    }

    /// Re-roots this path from `from` onto `to`.
    ///
    /// Returns `None` unless this path equals `from` or lies inside it.
    #[must_use]
    pub fn rebase(&self, from: &Self, to: &Self) -> Option<Self> {
        if self == from {
            return Some(to.clone());
        }
        if !from.is_ancestor_of(self) {
            return None;
        }
        let suffix = if from.is_root() {
            &self.0[1..]
        } else {
            &self.0[from.0.len() + 1..]
        };
        if to.is_root() {
            Some(Self(format!("/{suffix}")))
        } else {
            Some(Self(format!("{}/{suffix}", to.0)))
        }
    }

    /// Number of segments; the root has depth zero.
    #[must_use]
    pub fn depth(&self) -> usize {
        if self.is_root() {
            0
        } else {
            self.0.matches('/').count()
        }
    }
}

impl fmt::Display for FilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FilePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for FilePath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl FromStr for FilePath {
    type Err = FilesError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<&str> for FilePath {
    type Error = FilesError;

    fn try_from(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for FilePath {
    type Error = FilesError;

    fn try_from(s: String) -> Result<Self> {
        Self::new(s)
    }
}

impl Serialize for FilePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for FilePath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}
