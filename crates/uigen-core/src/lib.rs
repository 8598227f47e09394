//! Core types, configuration, and errors for the UIGen tool runtime.
//!
//! This crate provides the foundational types shared by every crate in the
//! workspace: the in-memory file tree, the tool interpreter, the invocation
//! runtime, and the command-line front end.
//!
//! # Architecture
//!
//! The core consists of:
//! - Strong domain types (`ProjectId`, `InvocationId`, `ToolFamily`)
//! - The workspace-level error type for configuration and serialization
//! - Runtime configuration (`RuntimeConfig`, `EntryPointConfig`)
//! - CLI support types (`cli::OutputFormat`, `cli::ExitCode`)

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod error;
mod types;

pub mod cli;

pub use config::{EntryPointConfig, RuntimeConfig};
pub use error::{Error, Result};
pub use types::{InvocationId, ProjectId, ToolFamily};
