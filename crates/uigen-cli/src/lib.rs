//! UIGen CLI library.
//!
//! Exposes the argument definitions, commands and formatters so they can be
//! tested without spawning the binary.

#![allow(clippy::format_push_string)]
#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod commands;
pub mod formatters;
pub mod runner;
