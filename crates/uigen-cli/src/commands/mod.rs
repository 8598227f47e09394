//! Command implementations for the UIGen CLI.
//!
//! Each command module reads its inputs, runs the operation, and formats
//! output according to the requested format.

pub mod apply;
pub mod common;
pub mod completions;
pub mod tree;
