//! CLI module for Bookshelf
//!
//! Provides command-line interface for:
//! - init: Create the database file and table
//! - serve: Boot the store and run the HTTP server

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
