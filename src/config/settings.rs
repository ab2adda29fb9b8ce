//! Process settings
//!
//! Settings that belong to the running process rather than to the user's
//! persisted configuration: where the store lives, transport timeouts, logging.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::store::JsonFileStore;

/// Main process settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Configuration store path, `None` when no config directory is known
    pub store_path: Option<PathBuf>,
    /// HTTP transport configuration
    pub http: HttpConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout: u64,
    /// Streaming request timeout in seconds
    pub stream_timeout: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            stream_timeout: 300,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

impl Settings {
    /// Create a new settings instance from the environment
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let store_path = match std::env::var("AISUMMARY_STORE") {
            Ok(path) if !path.is_empty() => Some(PathBuf::from(path)),
            _ => JsonFileStore::default_path(),
        };

        let settings = Self {
            store_path,
            http: HttpConfig {
                timeout: get_env_or_default("REQUEST_TIMEOUT", "30")
                    .parse()
                    .context("Invalid timeout value")?,
                stream_timeout: get_env_or_default("STREAM_TIMEOUT", "300")
                    .parse()
                    .context("Invalid stream timeout value")?,
            },
            logging: LoggingConfig {
                level: get_env_or_default("RUST_LOG", "info"),
                format: get_env_or_default("LOG_FORMAT", "text"),
            },
        };

        settings.validate()?;

        Ok(settings)
    }

    /// Store path to use, preferring an explicit override
    pub fn resolve_store_path(&self, override_path: Option<PathBuf>) -> Result<PathBuf> {
        override_path
            .or_else(|| self.store_path.clone())
            .context("Cannot determine config directory, set AISUMMARY_STORE or pass --store")
    }

    /// Validate settings
    pub fn validate(&self) -> Result<()> {
        if self.http.timeout == 0 || self.http.stream_timeout == 0 {
            anyhow::bail!("Timeout values cannot be 0");
        }

        // RUST_LOG may carry directives such as "aisummary=debug"; only bare levels are checked
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !self.logging.level.contains('=') && !valid_levels.contains(&self.logging.level.as_str()) {
            anyhow::bail!("Invalid log level: {}", self.logging.level);
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }
}

/// Get environment variable or default value
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
