//! Groupie Infrastructure Library
//!
//! Infrastructure components for Groupie Tracker: the reqwest client for
//! the upstream artist API and the tracing subscriber setup.

pub mod logger;
pub mod upstream;

pub use logger::{init_logger, logger_config_from_env, LogFormat, LoggerConfig};
pub use upstream::UpstreamClient;

/// Infrastructure version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
