//! Configuration types for the Groupie core library

use crate::{GroupieError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// Log levels accepted in configuration
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Log output formats accepted in configuration
pub const LOG_FORMATS: [&str; 3] = ["pretty", "compact", "json"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupieConfig {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: String,
    /// Upstream API settings
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerSettings,
    /// Search behaviour
    #[serde(default)]
    pub search: SearchConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for GroupieConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            upstream: UpstreamConfig::default(),
            server: ServerSettings::default(),
            search: SearchConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Upstream API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL the `/api/...` paths are appended to
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory served under `/static`
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    #[serde(default)]
    pub cors_enabled: bool,
    /// Maximum request body size in bytes
    #[serde(default = "default_max_request_size")]
    pub max_request_size: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            cors_enabled: false,
            max_request_size: default_max_request_size(),
        }
    }
}

/// Search configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Hard cap on results returned by one search
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Cap on results contributed by a single field
    #[serde(default = "default_max_results")]
    pub max_per_field: usize,
    /// Fetch relations and locations from upstream on every search instead
    /// of scanning what enrichment has cached
    #[serde(default = "default_true")]
    pub live_locations: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            max_per_field: default_max_results(),
            live_locations: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Output format (pretty, compact, json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl GroupieConfig {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        // Try YAML first, then JSON
        match serde_yaml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(_) => {
                let config = serde_json::from_str(&content)?;
                Ok(config)
            }
        }
    }

    /// Save configuration to a file
    pub fn to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let scheme = self.upstream.base_url.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(GroupieError::config(
                "Upstream base URL must use http or https scheme",
            ));
        }

        if self.upstream.timeout_seconds == 0 {
            return Err(GroupieError::config("Upstream timeout cannot be 0"));
        }

        if self.server.port == 0 {
            return Err(GroupieError::config("Port cannot be 0"));
        }

        if self.search.max_results == 0 || self.search.max_per_field == 0 {
            return Err(GroupieError::config(
                "Search result limits must be greater than 0",
            ));
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(GroupieError::config(format!(
                "Invalid log level: {}. Valid levels: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }

        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(GroupieError::config(format!(
                "Invalid log format: {}. Valid formats: {}",
                self.logging.format,
                LOG_FORMATS.join(", ")
            )));
        }

        Ok(())
    }
}

// Default value functions
fn default_true() -> bool {
    true
}
fn default_version() -> String {
    "1.0".to_string()
}
fn default_base_url() -> Url {
    Url::parse("https://groupietrackers.herokuapp.com").expect("default upstream URL is valid")
}
fn default_timeout() -> u64 {
    30
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8081
}
fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}
fn default_max_request_size() -> usize {
    1024 * 1024 // 1MB
}
fn default_max_results() -> usize {
    10
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "pretty".to_string()
}
