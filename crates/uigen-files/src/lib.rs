//! In-memory project file tree for agent tool calls.
//!
//! Holds a project's directories and text files entirely in memory. Paths are
//! normalized once at the boundary ([`FilePath`]) and every tree operation
//! either applies completely or leaves the tree unchanged.
//!
//! # Features
//!
//! - **Arena tree**: stable node ids, ordered directory listings
//! - **Strong types**: normalized paths and a closed error taxonomy
//! - **Snapshots**: flat path-to-content maps for previews and persistence
//! - **Builder pattern**: fluent API for seeding trees
//!
//! # Examples
//!
//! ```
//! use uigen_files::{FilePath, FileTree};
//!
//! let mut tree = FileTree::new();
//! let app = FilePath::new("/App.jsx").unwrap();
//! tree.create_file(&app, "export default function App() {}").unwrap();
//!
//! let renamed = FilePath::new("/Main.jsx").unwrap();
//! tree.rename_node(&app, &renamed).unwrap();
//!
//! assert!(!tree.exists(&app));
//! assert_eq!(tree.to_snapshot().len(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod builder;
pub mod resolver;
pub mod snapshot;
pub mod tree;
pub mod types;

pub use builder::FilesBuilder;
pub use snapshot::FileSnapshot;
pub use tree::{FileTree, Node, NodeId, NodeKind, Revision};
pub use types::{FilePath, FilesError, Result};
