//! Strong domain types for the UIGen tool runtime.
//!
//! Identifiers are newtypes so that a project id can never be passed where an
//! invocation id is expected, and tool families are a closed enum rather than
//! free-form strings.
//!
//! # Examples
//!
//! ```
//! use uigen_core::{InvocationId, ProjectId, ToolFamily};
//!
//! let project = ProjectId::new("landing-page");
//! let invocation = InvocationId::new();
//! let tool: ToolFamily = "str_replace_editor".parse().unwrap();
//!
//! assert_eq!(project.as_str(), "landing-page");
//! assert_ne!(invocation, InvocationId::new());
//! assert_eq!(tool, ToolFamily::Editor);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Project identifier (newtype over String).
///
/// Each project owns one independent file tree.
///
/// # Examples
///
/// ```
/// use uigen_core::ProjectId;
///
/// let id = ProjectId::new("demo");
/// assert_eq!(id.as_str(), "demo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectId(String);

impl ProjectId {
    /// Creates a new project identifier.
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the project ID as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `ProjectId` and returns the inner `String`.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProjectId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Opaque identifier of one tool invocation.
///
/// Backed by a random UUID v4.
///
/// # Examples
///
/// ```
/// use uigen_core::InvocationId;
///
/// let a = InvocationId::new();
/// let b = InvocationId::new();
/// assert_ne!(a, b);
/// assert_eq!(a.to_string().len(), 36);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvocationId(Uuid);

impl InvocationId {
    /// Generates a fresh random invocation identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID, e.g. one assigned by the orchestration layer.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for InvocationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InvocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The two tool families an agent can call.
///
/// The wire names `editor` and `path_manager` are canonical; the names used
/// by the chat transport (`str_replace_editor`, `file_manager`) are accepted
/// as aliases.
///
/// # Examples
///
/// ```
/// use uigen_core::ToolFamily;
///
/// let family: ToolFamily = serde_json::from_str("\"file_manager\"").unwrap();
/// assert_eq!(family, ToolFamily::PathManager);
/// assert_eq!(family.as_str(), "path_manager");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolFamily {
    /// Text/file editor tool: `view`, `create`, `str_replace`, `insert`
    #[serde(alias = "str_replace_editor")]
    Editor,
    /// Path manager tool: `rename`, `delete`, `mkdir`
    #[serde(alias = "file_manager")]
    PathManager,
}

impl ToolFamily {
    /// Returns the canonical wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Editor => "editor",
            Self::PathManager => "path_manager",
        }
    }
}

impl fmt::Display for ToolFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolFamily {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "editor" | "str_replace_editor" => Ok(Self::Editor),
            "path_manager" | "file_manager" => Ok(Self::PathManager),
            _ => Err(crate::Error::InvalidArgument(format!(
                "unknown tool: '{s}' (expected: editor or path_manager)"
            ))),
        }
    }
}
