//! Path resolution against a file tree.
//!
//! Resolution is pure: it reads the tree's path index and never creates or
//! modifies nodes.
//!
//! # Examples
//!
//! ```
//! use uigen_files::{FileTree, resolver};
//!
//! let mut tree = FileTree::new();
//! let path = resolver::normalize("/App.jsx").unwrap();
//! tree.create_file(&path, "export default function App() {}").unwrap();
//!
//! let node = resolver::resolve(&tree, &path).unwrap();
//! assert!(node.is_file());
//!
//! let (parent, name) = resolver::resolve_parent(&tree, &path).unwrap();
//! assert!(parent.path().is_root());
//! assert_eq!(name, "App.jsx");
//! ```

use crate::tree::{FileTree, Node};
use crate::types::{FilePath, FilesError, Result};

/// Normalizes a raw path string.
///
/// # Errors
///
/// Returns `FilesError::InvalidPath`; see [`FilePath::new`].
pub fn normalize(raw: &str) -> Result<FilePath> {
    FilePath::new(raw)
}

/// Resolves a path to the node occupying it.
///
/// # Errors
///
/// Returns `FilesError::PathNotFound` if no node occupies `path`.
pub fn resolve<'a>(tree: &'a FileTree, path: &FilePath) -> Result<&'a Node> {
    tree.lookup(path)
        .and_then(|id| tree.node(id))
        .ok_or_else(|| FilesError::PathNotFound {
            path: path.to_string(),
        })
}

/// Resolves the directory that would contain `path`, plus the child name.
///
/// The child itself need not exist.
///
/// # Errors
///
/// - `FilesError::InvalidOperation` for the root, which has no parent
/// - `FilesError::PathNotFound` naming the parent path if it does not exist
/// - `FilesError::NotADirectory` naming the parent path if it is a file
pub fn resolve_parent<'a, 'p>(
    tree: &'a FileTree,
    path: &'p FilePath,
) -> Result<(&'a Node, &'p str)> {
    let (Some(parent_path), Some(name)) = (path.parent(), path.file_name()) else {
        return Err(FilesError::InvalidOperation {
            path: path.to_string(),
            reason: "the root directory has no parent".to_string(),
        });
    };

    let parent = resolve(tree, &parent_path)?;
    if !parent.is_dir() {
        return Err(FilesError::NotADirectory {
            path: parent_path.to_string(),
        });
    }
    Ok((parent, name))
}
