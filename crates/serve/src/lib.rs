//! Groupie Serve Library
//!
//! Web server interface for Groupie Tracker: the axum routes, handlers,
//! handlebars pages and error responses.

use groupie_core::ServerSettings;
use std::path::PathBuf;

pub mod api;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod pages;
pub mod server;

pub use api::create_routes;
pub use error::{AppError, JsonError};
pub use handlers::AppState;
pub use pages::PageRenderer;
pub use server::{create_app, GroupieServer, ServerBuilder};

/// Server version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    pub cors_enabled: bool,
    pub max_request_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from(&ServerSettings::default())
    }
}

impl From<&ServerSettings> for ServerConfig {
    fn from(settings: &ServerSettings) -> Self {
        Self {
            host: settings.host.clone(),
            port: settings.port,
            static_dir: settings.static_dir.clone(),
            cors_enabled: settings.cors_enabled,
            max_request_size: settings.max_request_size,
        }
    }
}

impl ServerConfig {
    /// Address the listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
