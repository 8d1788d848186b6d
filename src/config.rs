//! Service configuration
//!
//! Read from an optional JSON file, then overridden by environment:
//! - `PORT`: HTTP port
//! - `DATABASE_PATH`: SQLite database file
//!
//! Every field has a default, so an empty object (or no file) is valid.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http_server::HttpServerConfig;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value '{value}' for {var}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("{0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per event
    Json,
    /// JSON when stdout is not a terminal, text otherwise
    #[default]
    Auto,
}

/// Full service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Host, port and CORS settings, at the top level of the file
    #[serde(flatten)]
    pub http: HttpServerConfig,

    /// SQLite database file (default: "./books.db")
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// How long a statement waits on a locked database (default: 5000)
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("./books.db")
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpServerConfig::default(),
            database_path: default_database_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file. Does not apply the environment.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the effective configuration: file (if any), then process
    /// environment, then validation.
    pub fn resolve(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_env(|var| std::env::var(var).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides using `lookup` to read variables.
    pub fn apply_env<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("PORT") {
            self.http.port = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidEnv { var: "PORT", value })?;
        }
        if let Some(value) = lookup("DATABASE_PATH") {
            self.database_path = PathBuf::from(value);
        }
        Ok(())
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.http.port == 0 {
            return Err(ConfigError::Invalid("port must be > 0".to_string()));
        }
        if self.database_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "database_path must not be empty".to_string(),
            ));
        }
        if self.busy_timeout_ms == 0 {
            return Err(ConfigError::Invalid("busy_timeout_ms must be > 0".to_string()));
        }
        Ok(())
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let file = write_config("{}");
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.http.port, 3000);
        assert_eq!(config.busy_timeout(), Duration::from_secs(5));
        assert_eq!(config.log_format, LogFormat::Auto);
    }

    #[test]
    fn test_flat_file_layout() {
        let file = write_config(
            r#"{"port": 8081, "database_path": "/tmp/b.db", "log_format": "json"}"#,
        );
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.http.port, 8081);
        assert_eq!(config.database_path, PathBuf::from("/tmp/b.db"));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = Config::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let file = write_config(r#"{"port": 0}"#);
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Invalid(_))
        ));

        let file = write_config(r#"{"busy_timeout_ms": 0}"#);
        assert!(Config::load(file.path()).is_err());

        let file = write_config("not json");
        assert!(matches!(Config::load(file.path()), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env(|var| match var {
                "PORT" => Some("9090".to_string()),
                "DATABASE_PATH" => Some("/data/books.db".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.http.port, 9090);
        assert_eq!(config.database_path, PathBuf::from("/data/books.db"));
    }

    #[test]
    fn test_bad_port_env() {
        let mut config = Config::default();
        let err = config
            .apply_env(|var| (var == "PORT").then(|| "eighty".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { var: "PORT", .. }));
    }
}
