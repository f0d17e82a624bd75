//! Command-line interface for book-minder.
//!
//! This module provides CLI commands for adding books by ISBN, editing the
//! catalog by hand, and inspecting configuration.

mod commands;

pub use commands::{BookFields, Cli, Commands, run_command};
