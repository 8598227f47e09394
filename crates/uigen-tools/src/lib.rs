//! Tool interpreters for agent edits to the in-memory file tree.
//!
//! Two tool families are supported:
//!
//! - **editor**: `view`, `create`, `str_replace`, `insert`
//! - **path manager**: `rename`, `delete`, `mkdir`
//!
//! Requests arrive as loose JSON ([`ToolCallRequest`]), are parsed into a
//! closed command union ([`ToolCommand`]), and are executed by a
//! [`ToolInterpreter`] against a [`uigen_files::FileTree`]. Failures are
//! typed ([`ToolError`]) and map onto a closed taxonomy ([`ErrorKind`]) with
//! a serializable [`ErrorPayload`].
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use uigen_files::FileTree;
//! use uigen_tools::{ErrorKind, ToolCallRequest, ToolInterpreter};
//!
//! let interpreter = ToolInterpreter::default();
//! let mut tree = FileTree::new();
//!
//! let create = ToolCallRequest::editor("create", json!({"path": "/a.txt", "content": "cat cat"}));
//! interpreter.execute(&mut tree, &create).unwrap();
//!
//! let replace = ToolCallRequest::editor(
//!     "str_replace",
//!     json!({"path": "/a.txt", "old_str": "cat", "new_str": "dog"}),
//! );
//! let err = interpreter.execute(&mut tree, &replace).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::AmbiguousMatch);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod editor;
mod error;
mod interpreter;
mod output;
mod path_manager;
mod request;

pub mod command;
pub mod label;

pub use command::{EditorCommand, PathCommand, ToolCommand};
pub use error::{ErrorKind, ErrorPayload, Result, ToolError};
pub use interpreter::ToolInterpreter;
pub use output::ToolOutput;
pub use request::ToolCallRequest;
