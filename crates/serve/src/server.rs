//! HTTP server for Groupie Tracker

use crate::api::create_routes;
use crate::handlers::AppState;
use crate::middleware::{error_handling_middleware, request_id_middleware, timing_middleware};
use crate::ServerConfig;
use axum::{
    http::{header::CONTENT_TYPE, Method},
    middleware, Router,
};
use groupie_core::{ArtistSource, GroupieError, Result, SearchEngine};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

/// Groupie HTTP server
pub struct GroupieServer {
    config: ServerConfig,
    app: Router,
}

impl GroupieServer {
    /// Create a new server instance
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        let app = create_app(&config, state);
        Self { config, app }
    }

    /// Start the server
    pub async fn start(self) -> Result<()> {
        let addr = self.config.bind_address();
        let socket_addr: SocketAddr = addr
            .parse()
            .map_err(|e| GroupieError::validation(format!("Invalid address {}: {}", addr, e)))?;

        tracing::info!("Starting Groupie Tracker on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(socket_addr)
            .await
            .map_err(|e| GroupieError::network(format!("Failed to bind to {}: {}", addr, e)))?;

        axum::serve(listener, self.app)
            .await
            .map_err(|e| GroupieError::network(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Get the server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The fully layered router
    pub fn router(&self) -> Router {
        self.app.clone()
    }
}

/// Create the Axum application with middleware
pub fn create_app(config: &ServerConfig, state: AppState) -> Router {
    let mut app = create_routes(state, &config.static_dir);

    app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(request_id_middleware))
            .layer(middleware::from_fn(timing_middleware))
            .layer(middleware::from_fn(error_handling_middleware))
            .layer(RequestBodyLimitLayer::new(config.max_request_size)),
    );

    if config.cors_enabled {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET])
            .allow_headers([CONTENT_TYPE]);

        app = app.layer(cors);
    }

    app
}

/// Server builder for configuration
pub struct ServerBuilder {
    config: ServerConfig,
    engine: SearchEngine,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
            engine: SearchEngine::default(),
        }
    }

    /// Start from an existing server configuration
    pub fn with_config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the host address
    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the directory served under `/static`
    pub fn static_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.config.static_dir = dir.into();
        self
    }

    /// Enable or disable CORS
    pub fn cors(mut self, enabled: bool) -> Self {
        self.config.cors_enabled = enabled;
        self
    }

    /// Set maximum request size
    pub fn max_request_size(mut self, size: usize) -> Self {
        self.config.max_request_size = size;
        self
    }

    /// Set the search engine used by `/search`
    pub fn search_engine(mut self, engine: SearchEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Build the server around an artist source
    pub fn build(self, source: Arc<dyn ArtistSource>) -> GroupieServer {
        GroupieServer::new(self.config, AppState::new(source, self.engine))
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
