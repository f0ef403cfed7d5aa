//! Free-text search across the artist catalog
//!
//! Matching is literal, case-insensitive substring containment. Results are
//! never ranked: they come out in field precedence order (artist name,
//! location, date, creation year, first album, member) and, within a field,
//! in scan order.
//!
//! # Examples
//!
//! ```rust
//! use groupie_core::search::{ResultKind, SearchResult};
//!
//! let hit = SearchResult::new(ResultKind::Member, 2, "Queen").with_context("Brian May");
//! assert_eq!(hit.kind.to_string(), "member");
//! ```

pub mod engine;
pub mod types;

pub use engine::{ResultAccumulator, SearchEngine};
pub use types::{ResultKind, SearchResponse, SearchResult};
