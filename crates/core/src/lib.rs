//! Groupie Core Library
//!
//! Core functionality for Groupie Tracker: the artist data model, the
//! [`ArtistSource`] seam over the upstream API, the process-wide
//! [`ArtistCatalog`] with per-artist enrichment, and the [`SearchEngine`].

pub mod catalog;
pub mod config;
pub mod error;
pub mod search;
pub mod source;
pub mod types;

// Re-export commonly used types
pub use catalog::ArtistCatalog;
pub use config::{GroupieConfig, LoggingConfig, SearchConfig, ServerSettings, UpstreamConfig};
pub use error::{ErrorCategory, GroupieError, Result};
pub use search::{ResultKind, SearchEngine, SearchResponse, SearchResult};
pub use source::ArtistSource;
pub use types::{
    Artist, ArtistId, ArtistRecord, DateRecord, DatesLocations, LocationRecord, RelationRecord,
    MAX_ARTIST_ID, MIN_ARTIST_ID,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version info as a formatted string
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}
