//! Logging infrastructure for Groupie
//!
//! Centralized `tracing` subscriber setup shared by the binary and tests.

use groupie_core::{GroupieError, LoggingConfig, Result};
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Output format of the fmt layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = GroupieError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(GroupieError::validation(format!(
                "Unknown log format: {}",
                other
            ))),
        }
    }
}

/// Logger configuration
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    pub format: LogFormat,
    /// Whether to include file/line information
    pub with_file_info: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            with_file_info: false,
        }
    }
}

impl LoggerConfig {
    /// Build a logger configuration from the `logging` config section
    pub fn from_settings(settings: &LoggingConfig) -> Result<Self> {
        Ok(Self {
            level: settings.level.clone(),
            format: settings.format.parse()?,
            with_file_info: false,
        })
    }
}

/// Initialize the global logger with the given configuration
pub fn init_logger(config: LoggerConfig) -> Result<()> {
    let level = LogLevel::parse(&config.level)?;

    let env_filter = EnvFilter::from_default_env()
        .add_directive(level.into())
        .add_directive(static_directive("hyper=warn"))
        .add_directive(static_directive("reqwest=warn"))
        .add_directive(static_directive("h2=warn"));

    let fmt_layer = match config.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_file(config.with_file_info)
            .with_line_number(config.with_file_info)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(true)
            .with_file(config.with_file_info)
            .with_line_number(config.with_file_info)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_target(true)
            .with_file(config.with_file_info)
            .with_line_number(config.with_file_info)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| GroupieError::validation(format!("Failed to initialize logger: {}", e)))?;

    tracing::info!("Logger initialized with level: {}", config.level);
    Ok(())
}

fn static_directive(directive: &'static str) -> tracing_subscriber::filter::Directive {
    directive
        .parse()
        .unwrap_or_else(|_| Level::WARN.into())
}

/// Create a logger configuration from environment variables
pub fn logger_config_from_env() -> LoggerConfig {
    LoggerConfig {
        level: std::env::var("GROUPIE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        format: std::env::var("GROUPIE_LOG_FORMAT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(LogFormat::Pretty),
        with_file_info: std::env::var("GROUPIE_LOG_FILE_INFO")
            .map(|v| v.parse().unwrap_or(false))
            .unwrap_or(false),
    }
}

/// Log level utilities
pub struct LogLevel;

impl LogLevel {
    /// Parse log level from string
    pub fn parse(level: &str) -> Result<Level> {
        Level::from_str(level)
            .map_err(|e| GroupieError::validation(format!("Invalid log level '{}': {}", level, e)))
    }
}
