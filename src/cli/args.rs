//! CLI argument definitions using clap
//!
//! Commands:
//! - bookshelf serve [--config <path>] [--port <port>]
//! - bookshelf init [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Bookshelf - a small CRUD service for books
#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the database file and table, then exit
    Init {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on, overriding config and environment
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["bookshelf", "serve", "--port", "8080"]).unwrap();
        match cli.command {
            Command::Serve { config, port } => {
                assert!(config.is_none());
                assert_eq!(port, Some(8080));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_init_with_config() {
        let cli = Cli::try_parse_from(["bookshelf", "init", "--config", "books.json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Init { config: Some(path) } if path == PathBuf::from("books.json")
        ));
    }
}
