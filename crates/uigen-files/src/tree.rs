//! The in-memory project file tree.
//!
//! Nodes live in an arena keyed by stable [`NodeId`]s. Directories hold an
//! insertion-ordered map of child name to id, and a separate index maps every
//! normalized path to its node, so renames and deletes re-index a subtree
//! instead of rewriting string keys across the whole tree.
//!
//! Every mutating operation validates completely before it changes anything:
//! it either applies in full or returns an error with the tree untouched.
//!
//! # Examples
//!
//! ```
//! use uigen_files::{FilePath, FileTree};
//!
//! let mut tree = FileTree::new();
//! let dir = FilePath::new("/components").unwrap();
//! let file = FilePath::new("/components/Button.jsx").unwrap();
//!
//! tree.create_directory(&dir).unwrap();
//! tree.create_file(&file, "export function Button() {}").unwrap();
//!
//! assert_eq!(tree.read_file(&file).unwrap(), "export function Button() {}");
//! assert_eq!(tree.list_directory(&dir).unwrap(), vec!["Button.jsx"]);
//! ```

use crate::resolver::{resolve, resolve_parent};
use crate::types::{FilePath, FilesError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Stable identifier of a node within one tree.
///
/// Ids are never reused, and a node keeps its id across renames and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    /// Returns the raw id value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

/// Tree-wide modification counter.
///
/// Incremented by every successful mutation; files record the revision of
/// their last write as their last-modified marker.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Revision(u64);

impl Revision {
    /// Returns the raw counter value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Payload of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A text file
    File {
        /// UTF-8 content
        content: String,
        /// Revision of the last write
        modified: Revision,
    },
    /// A directory
    Directory {
        /// Child name to id, in insertion order
        children: IndexMap<String, NodeId>,
    },
}

/// A file or directory in the tree.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    parent: Option<NodeId>,
    path: FilePath,
    kind: NodeKind,
}

impl Node {
    /// Stable id of this node.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Id of the containing directory; `None` for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Normalized path of this node.
    #[must_use]
    pub const fn path(&self) -> &FilePath {
        &self.path
    }

    /// Last path segment, or `/` for the root.
    #[must_use]
    pub fn name(&self) -> &str {
        self.path.file_name().unwrap_or("/")
    }

    /// File or directory payload.
    #[must_use]
    pub const fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Returns `true` for files.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self.kind, NodeKind::File { .. })
    }

    /// Returns `true` for directories.
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { .. })
    }

    /// File content, or `None` for directories.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::File { content, .. } => Some(content),
            NodeKind::Directory { .. } => None,
        }
    }

    /// Last-modified marker, or `None` for directories.
    #[must_use]
    pub const fn modified(&self) -> Option<Revision> {
        match &self.kind {
            NodeKind::File { modified, .. } => Some(*modified),
            NodeKind::Directory { .. } => None,
        }
    }

    /// Child names in insertion order; empty for files.
    #[must_use]
    pub fn child_names(&self) -> Vec<&str> {
        match &self.kind {
            NodeKind::Directory { children } => children.keys().map(String::as_str).collect(),
            NodeKind::File { .. } => Vec::new(),
        }
    }
}

enum NewNode {
    File(String),
    Directory,
}

/// A rooted tree of directories and text files for one project.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`. It has no interior mutability; callers
/// that share it must serialize writers themselves.
#[derive(Debug, Clone)]
pub struct FileTree {
    nodes: HashMap<NodeId, Node>,
    index: HashMap<FilePath, NodeId>,
    root: NodeId,
    next_id: u64,
    revision: Revision,
}

impl FileTree {
    /// Creates a tree containing only the root directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use uigen_files::FileTree;
    ///
    /// let tree = FileTree::new();
    /// assert_eq!(tree.node_count(), 1);
    /// assert_eq!(tree.file_count(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        let root = NodeId(0);
        let mut nodes = HashMap::new();
        nodes.insert(
            root,
            Node {
                id: root,
                parent: None,
                path: FilePath::root(),
                kind: NodeKind::Directory {
                    children: IndexMap::new(),
                },
            },
        );
        let mut index = HashMap::new();
        index.insert(FilePath::root(), root);

        Self {
            nodes,
            index,
            root,
            next_id: 1,
            revision: Revision::default(),
        }
    }

    /// Id of the root directory.
    #[must_use]
    pub const fn root_id(&self) -> NodeId {
        self.root
    }

    /// Looks up a node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Looks up a node by path.
    #[must_use]
    pub fn get(&self, path: &FilePath) -> Option<&Node> {
        self.lookup(path).and_then(|id| self.node(id))
    }

    pub(crate) fn lookup(&self, path: &FilePath) -> Option<NodeId> {
        self.index.get(path).copied()
    }

    /// Creates a file. Every ancestor directory must already exist.
    ///
    /// # Errors
    ///
    /// - `PathAlreadyExists` if a node occupies `path`
    /// - `PathNotFound` if the parent directory does not exist
    /// - `NotADirectory` if the parent path is a file
    pub fn create_file(&mut self, path: &FilePath, content: impl Into<String>) -> Result<&Node> {
        let id = self.insert_node(path, NewNode::File(content.into()))?;
        debug!(path = %path, "created file");
        Ok(&self.nodes[&id])
    }

    /// Creates an empty directory. Every ancestor must already exist.
    ///
    /// # Errors
    ///
    /// Same as [`FileTree::create_file`].
    pub fn create_directory(&mut self, path: &FilePath) -> Result<&Node> {
        let id = self.insert_node(path, NewNode::Directory)?;
        debug!(path = %path, "created directory");
        Ok(&self.nodes[&id])
    }

    /// Creates `path` and any missing ancestors as directories.
    ///
    /// Existing directories along the way are left as they are.
    ///
    /// # Errors
    ///
    /// Returns `NotADirectory` if `path` or one of its ancestors is a file.
    pub fn create_dir_all(&mut self, path: &FilePath) -> Result<()> {
        let mut missing = Vec::new();
        let mut current = Some(path.clone());
        while let Some(candidate) = current {
            if let Some(node) = self.get(&candidate) {
                if !node.is_dir() {
                    return Err(FilesError::NotADirectory {
                        path: candidate.to_string(),
                    });
                }
                break;
            }
            current = candidate.parent();
            missing.push(candidate);
        }

        for dir in missing.into_iter().rev() {
            self.insert_node(&dir, NewNode::Directory)?;
        }
        Ok(())
    }

    /// Reads a file's content.
    ///
    /// # Errors
    ///
    /// - `PathNotFound` if nothing occupies `path`
    /// - `NotAFile` if `path` is a directory
    pub fn read_file(&self, path: &FilePath) -> Result<&str> {
        let node = resolve(self, path)?;
        node.content().ok_or_else(|| FilesError::NotAFile {
            path: path.to_string(),
        })
    }

    /// Replaces a file's content in place. The node keeps its id.
    ///
    /// # Errors
    ///
    /// - `PathNotFound` if the file does not exist
    /// - `NotAFile` if `path` is a directory
    pub fn write_file(&mut self, path: &FilePath, content: impl Into<String>) -> Result<()> {
        let node = resolve(self, path)?;
        if !node.is_file() {
            return Err(FilesError::NotAFile {
                path: path.to_string(),
            });
        }
        let id = node.id();

        let revision = self.bump();
        if let Some(Node {
            kind: NodeKind::File {
                content: current,
                modified,
            },
            ..
        }) = self.nodes.get_mut(&id)
        {
            *current = content.into();
            *modified = revision;
        }
        debug!(path = %path, revision = revision.as_u64(), "wrote file");
        Ok(())
    }

    /// Lists a directory's child names in insertion order.
    ///
    /// # Errors
    ///
    /// - `PathNotFound` if nothing occupies `path`
    /// - `NotADirectory` if `path` is a file
    pub fn list_directory(&self, path: &FilePath) -> Result<Vec<&str>> {
        let node = resolve(self, path)?;
        if !node.is_dir() {
            return Err(FilesError::NotADirectory {
                path: path.to_string(),
            });
        }
        Ok(node.child_names())
    }

    /// Removes a node and, for directories, its entire subtree.
    ///
    /// Returns the number of nodes removed.
    ///
    /// # Errors
    ///
    /// - `InvalidOperation` for the root
    /// - `PathNotFound` if nothing occupies `path`
    pub fn delete_node(&mut self, path: &FilePath) -> Result<usize> {
        if path.is_root() {
            return Err(FilesError::InvalidOperation {
                path: path.to_string(),
                reason: "the root directory cannot be deleted".to_string(),
            });
        }
        let node = resolve(self, path)?;
        let id = node.id();
        let parent = node.parent();

        let doomed = self.subtree_ids(id);
        if let (Some(parent), Some(name)) = (parent, path.file_name())
            && let Some(children) = self.children_mut(parent)
        {
            children.shift_remove(name);
        }
        for id in &doomed {
            if let Some(node) = self.nodes.remove(id) {
                self.index.remove(&node.path);
            }
        }
        self.bump();

        debug!(path = %path, removed = doomed.len(), "deleted node");
        Ok(doomed.len())
    }

    /// Moves a node, and its subtree, to a new path.
    ///
    /// Content, relative structure, and child order are preserved. A node
    /// renamed within the same directory keeps its listing position;
    /// otherwise it is appended to the new parent's listing.
    ///
    /// # Errors
    ///
    /// - `PathNotFound` if `from` does not exist
    /// - `InvalidOperation` if `from` is the root
    /// - `CyclicMove` if `to` lies inside the subtree rooted at `from`
    /// - `PathAlreadyExists` if `to` is occupied (including `to == from`)
    /// - `PathNotFound`/`NotADirectory` if the parent of `to` is missing or a file
    pub fn rename_node(&mut self, from: &FilePath, to: &FilePath) -> Result<()> {
        let source = resolve(self, from)?;
        let id = source.id();
        let old_parent = source.parent();

        if from.is_root() {
            return Err(FilesError::InvalidOperation {
                path: from.to_string(),
                reason: "the root directory cannot be renamed".to_string(),
            });
        }
        if from.is_ancestor_of(to) {
            return Err(FilesError::CyclicMove {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        if self.index.contains_key(to) {
            return Err(FilesError::PathAlreadyExists {
                path: to.to_string(),
            });
        }
        let (new_parent, new_name) = resolve_parent(self, to)?;
        let new_parent = new_parent.id();
        let new_name = new_name.to_string();

        let mut position = None;
        if let (Some(old_parent), Some(old_name)) = (old_parent, from.file_name())
            && let Some(children) = self.children_mut(old_parent)
        {
            position = children
                .shift_remove_full(old_name)
                .map(|(index, _, _)| index)
                .filter(|_| old_parent == new_parent);
        }
        if let Some(children) = self.children_mut(new_parent) {
            match position {
                Some(index) => {
                    children.shift_insert(index, new_name, id);
                }
                None => {
                    children.insert(new_name, id);
                }
            }
        }

        let moved = self.subtree_ids(id);
        let mut reindexed = Vec::with_capacity(moved.len());
        for node_id in &moved {
            if let Some(node) = self.nodes.get_mut(node_id)
                && let Some(rebased) = node.path.rebase(from, to)
            {
                self.index.remove(&node.path);
                node.path = rebased.clone();
                reindexed.push((rebased, *node_id));
            }
        }
        self.index.extend(reindexed);
        if let Some(node) = self.nodes.get_mut(&id) {
            node.parent = Some(new_parent);
        }
        self.bump();

        debug!(from = %from, to = %to, moved = moved.len(), "renamed node");
        Ok(())
    }

    /// Returns `true` if a node occupies `path`.
    #[must_use]
    pub fn exists(&self, path: &FilePath) -> bool {
        self.index.contains_key(path)
    }

    /// Returns `true` if `path` is a file.
    #[must_use]
    pub fn is_file(&self, path: &FilePath) -> bool {
        self.get(path).is_some_and(Node::is_file)
    }

    /// Returns `true` if `path` is a directory.
    #[must_use]
    pub fn is_dir(&self, path: &FilePath) -> bool {
        self.get(path).is_some_and(Node::is_dir)
    }

    /// Number of files (directories excluded).
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.nodes.values().filter(|node| node.is_file()).count()
    }

    /// Number of nodes, including the root directory.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Current tree revision.
    #[must_use]
    pub const fn revision(&self) -> Revision {
        self.revision
    }

    /// All nodes in depth-first pre-order, children in insertion order.
    #[must_use]
    pub fn walk(&self) -> Vec<&Node> {
        self.subtree_ids(self.root)
            .into_iter()
            .filter_map(|id| self.nodes.get(&id))
            .collect()
    }

    /// All files as `(path, content)` in depth-first insertion order.
    pub fn files(&self) -> impl Iterator<Item = (&FilePath, &str)> {
        self.walk()
            .into_iter()
            .filter_map(|node| node.content().map(|content| (node.path(), content)))
    }

    fn insert_node(&mut self, path: &FilePath, new: NewNode) -> Result<NodeId> {
        if self.index.contains_key(path) {
            return Err(FilesError::PathAlreadyExists {
                path: path.to_string(),
            });
        }
        let (parent, name) = resolve_parent(self, path)?;
        let parent = parent.id();
        let name = name.to_string();

        let id = NodeId(self.next_id);
        self.next_id += 1;
        let revision = self.bump();
        let kind = match new {
            NewNode::File(content) => NodeKind::File {
                content,
                modified: revision,
            },
            NewNode::Directory => NodeKind::Directory {
                children: IndexMap::new(),
            },
        };

        self.nodes.insert(
            id,
            Node {
                id,
                parent: Some(parent),
                path: path.clone(),
                kind,
            },
        );
        self.index.insert(path.clone(), id);
        if let Some(children) = self.children_mut(parent) {
            children.insert(name, id);
        }
        Ok(id)
    }

    fn children_mut(&mut self, id: NodeId) -> Option<&mut IndexMap<String, NodeId>> {
        match self.nodes.get_mut(&id) {
            Some(Node {
                kind: NodeKind::Directory { children },
                ..
            }) => Some(children),
            _ => None,
        }
    }

    /// Ids of `id` and all its descendants in pre-order.
    fn subtree_ids(&self, id: NodeId) -> Vec<NodeId> {
        let mut ids = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            ids.push(current);
            if let Some(Node {
                kind: NodeKind::Directory { children },
                ..
            }) = self.nodes.get(&current)
            {
                stack.extend(children.values().rev().copied());
            }
        }
        ids
    }

    fn bump(&mut self) -> Revision {
        self.revision = self.revision.next();
        self.revision
    }
}

impl Default for FileTree {
    fn default() -> Self {
        Self::new()
    }
}
