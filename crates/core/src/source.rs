//! Abstraction over the upstream artist API
//!
//! The catalog and the search engine only ever talk to an [`ArtistSource`].
//! Implementors provide the four whole-endpoint fetches; the per-artist
//! lookups are derived from them by a linear scan for the id. A missing id
//! is not an error: the lookup yields an empty record, which callers cannot
//! tell apart from an artist that has no data.

use crate::{
    types::{
        Artist, ArtistId, DateIndex, DateRecord, LocationIndex, LocationRecord, RelationIndex,
        RelationRecord,
    },
    Result,
};
use async_trait::async_trait;

/// Read access to the upstream artist data
#[async_trait]
pub trait ArtistSource: Send + Sync {
    /// Fetch the full artist list (`/api/artists`)
    async fn fetch_artists(&self) -> Result<Vec<Artist>>;

    /// Fetch every artist's concert dates (`/api/dates`)
    async fn fetch_date_index(&self) -> Result<DateIndex>;

    /// Fetch every artist's concert locations (`/api/locations`)
    async fn fetch_location_index(&self) -> Result<LocationIndex>;

    /// Fetch every artist's location to dates mapping (`/api/relation`)
    async fn fetch_relation_index(&self) -> Result<RelationIndex>;

    /// Concert dates for one artist, with date markers stripped
    async fn fetch_dates(&self, id: ArtistId) -> Result<DateRecord> {
        let index = self.fetch_date_index().await?;
        let record = match index.index.into_iter().find(|r| r.id == id.get()) {
            Some(record) => record,
            None => {
                tracing::debug!("No dates upstream for artist {}", id);
                DateRecord::default()
            }
        };

        Ok(record.strip_markers())
    }

    /// Concert locations for one artist
    async fn fetch_locations(&self, id: ArtistId) -> Result<LocationRecord> {
        let index = self.fetch_location_index().await?;
        Ok(index
            .index
            .into_iter()
            .find(|r| r.id == id.get())
            .unwrap_or_else(|| {
                tracing::debug!("No locations upstream for artist {}", id);
                LocationRecord::default()
            }))
    }

    /// Location to dates mapping for one artist
    async fn fetch_relations(&self, id: ArtistId) -> Result<RelationRecord> {
        let index = self.fetch_relation_index().await?;
        Ok(index
            .index
            .into_iter()
            .find(|r| r.id == id.get())
            .unwrap_or_else(|| {
                tracing::debug!("No relations upstream for artist {}", id);
                RelationRecord::default()
            }))
    }
}
