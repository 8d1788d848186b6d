//! CLI command implementations
//!
//! Boot order for `serve`: configuration, logging, store, HTTP server.
//! The store is opened here and handed to the server; nothing else opens
//! the database.

use std::path::Path;

use crate::config::Config;
use crate::http_server::HttpServer;
use crate::logging;
use crate::store::BookStore;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(config.as_deref()),
        Command::Serve { config, port } => serve(config.as_deref(), port),
    }
}

/// Create the database file and the books table
pub fn init(config_path: Option<&Path>) -> CliResult<()> {
    let config = Config::resolve(config_path)?;
    logging::init(config.log_format);

    let store = BookStore::open(&config.database_path, config.busy_timeout())?;
    store.close()?;

    tracing::info!(path = %config.database_path.display(), "database initialized");
    Ok(())
}

/// Start the HTTP server
///
/// `port`, when given, wins over both the config file and `PORT`.
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    let mut config = Config::resolve(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }
    logging::init(config.log_format);

    let store = BookStore::open(&config.database_path, config.busy_timeout())?;
    tracing::info!(path = %config.database_path.display(), "database opened");

    let server = HttpServer::new(config.http, store);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}
