//! Groupie Tracker
//!
//! A small server-rendered web application that displays music artists,
//! their concert dates and concert locations, sourced from the Groupie
//! Trackers REST API, with a JSON search endpoint for autocomplete.

use clap::{Parser, Subcommand};
use groupie_core::{GroupieConfig, GroupieError, Result, SearchEngine};
use groupie_infra::{init_logger, logger_config_from_env, LoggerConfig, UpstreamClient};
use groupie_serve::{ServerBuilder, ServerConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use url::Url;

#[derive(Parser)]
#[command(name = "groupie")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Groupie Tracker - browse artists, concert dates and locations")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log output format (pretty, compact, json)
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server (default)
    Serve(ServeArgs),

    /// Validate configuration file
    Validate {
        /// Configuration file to validate
        file: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(clap::Args, Default)]
struct ServeArgs {
    /// Server host address
    #[arg(long)]
    host: Option<String>,

    /// Server port
    #[arg(short, long)]
    port: Option<u16>,

    /// Base URL of the upstream artist API
    #[arg(long)]
    upstream_url: Option<Url>,

    /// Directory served under /static
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

impl ServeArgs {
    /// Apply command-line overrides on top of the loaded configuration
    fn apply(self, config: &mut GroupieConfig) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(url) = self.upstream_url {
            config.upstream.base_url = url;
        }
        if let Some(dir) = self.static_dir {
            config.server.static_dir = dir;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let Cli {
        command,
        verbose,
        config,
        log_format,
    } = Cli::parse();

    match command.unwrap_or_else(|| Commands::Serve(ServeArgs::default())) {
        Commands::Serve(args) => handle_serve(args, config, verbose, log_format).await,
        Commands::Validate { file } => handle_validate(&file),
        Commands::Version => {
            handle_version();
            Ok(())
        }
    }
}

async fn handle_serve(
    args: ServeArgs,
    config_path: Option<PathBuf>,
    verbose: bool,
    log_format: Option<String>,
) -> Result<()> {
    let mut config = match &config_path {
        Some(path) => GroupieConfig::from_file(path)?,
        None => GroupieConfig::default(),
    };
    args.apply(&mut config);
    config.validate()?;

    let mut logger = if config_path.is_some() {
        LoggerConfig::from_settings(&config.logging)?
    } else {
        logger_config_from_env()
    };
    if verbose {
        logger.level = "debug".to_string();
    }
    if let Some(format) = log_format {
        logger.format = format.parse()?;
    }
    init_logger(logger)?;

    info!("Starting Groupie Tracker v{}", env!("CARGO_PKG_VERSION"));
    info!("Using upstream API at {}", config.upstream.base_url);

    let source = Arc::new(UpstreamClient::new(&config.upstream)?);
    let server = ServerBuilder::new()
        .with_config(ServerConfig::from(&config.server))
        .search_engine(SearchEngine::new(config.search.clone()))
        .build(source);

    server.start().await
}

fn handle_validate(config_path: &Path) -> Result<()> {
    if !config_path.exists() {
        return Err(GroupieError::not_found(format!(
            "Configuration file not found: {:?}",
            config_path
        )));
    }

    let config = GroupieConfig::from_file(config_path)?;

    match config.validate() {
        Ok(()) => {
            println!("Configuration is valid");
            println!("  Upstream API: {}", config.upstream.base_url);
            println!(
                "  Server: {}:{} (static files from {:?})",
                config.server.host, config.server.port, config.server.static_dir
            );
            println!(
                "  Search: max {} results, {} per field, live locations {}",
                config.search.max_results,
                config.search.max_per_field,
                config.search.live_locations
            );
            Ok(())
        }
        Err(e) => {
            println!("Configuration is invalid: {}", e);
            Err(e)
        }
    }
}

fn handle_version() {
    println!("{}", groupie_core::version_info());
    println!("  groupie-infra v{}", groupie_infra::VERSION);
    println!("  groupie-serve v{}", groupie_serve::VERSION);
}
