//! Process-wide artist cache and per-artist enrichment
//!
//! The catalog is filled from the upstream artist list the first time it is
//! needed and never refreshed afterwards. Enrichment pulls one artist's dates,
//! locations and relations and writes them into that artist's cached entry.
//!
//! All access goes through a single `RwLock`: population holds the write lock
//! across the upstream fetch so concurrent first requests fetch once, while
//! enrichment fetches without the lock and only takes it to overwrite the
//! entry.

use crate::{
    source::ArtistSource,
    types::{ArtistId, ArtistRecord},
    GroupieError, Result,
};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Shared cache of artist records
#[derive(Debug, Default)]
pub struct ArtistCatalog {
    records: RwLock<Vec<ArtistRecord>>,
}

impl ArtistCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog that is already populated
    pub fn with_records(records: Vec<ArtistRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Fill the catalog from upstream unless it already holds artists
    ///
    /// A failed fetch leaves the catalog empty, so the next call retries.
    pub async fn ensure_populated(&self, source: &dyn ArtistSource) -> Result<()> {
        if !self.records.read().await.is_empty() {
            return Ok(());
        }

        let mut records = self.records.write().await;
        if !records.is_empty() {
            // Another request populated while we waited for the lock
            return Ok(());
        }

        let artists = source.fetch_artists().await?;
        records.extend(artists.into_iter().map(ArtistRecord::from));
        info!("Artist catalog populated with {} artists", records.len());

        Ok(())
    }

    /// Merge an artist's dates, locations and relations into its cached entry
    ///
    /// Upstream is queried before the entry is touched; any failure leaves the
    /// cache unchanged. Repeated calls overwrite the previous enrichment.
    pub async fn enrich_artist(
        &self,
        source: &dyn ArtistSource,
        id: ArtistId,
    ) -> Result<ArtistRecord> {
        let (dates, locations, relations) = tokio::try_join!(
            source.fetch_dates(id),
            source.fetch_locations(id),
            source.fetch_relations(id),
        )?;

        let mut records = self.records.write().await;
        let index = Self::position(&records, id)
            .ok_or_else(|| GroupieError::not_found(format!("artist {}", id)))?;
        let record = &mut records[index];

        record.date_and_location = relations.dates_locations;
        record.concert_dates = dates.dates;
        record.locations = locations.locations;

        debug!(
            "Enriched artist {} with {} locations",
            id,
            record.date_and_location.len()
        );

        Ok(record.clone())
    }

    /// Clone of every cached record, in upstream order
    pub async fn snapshot(&self) -> Vec<ArtistRecord> {
        self.records.read().await.clone()
    }

    /// Cached record for an id, if present
    pub async fn get(&self, id: ArtistId) -> Option<ArtistRecord> {
        let records = self.records.read().await;
        Self::position(&records, id).map(|index| records[index].clone())
    }

    /// Cached artist name for an id, or an empty string when unknown
    pub async fn name_of(&self, id: u32) -> String {
        name_in(&self.records.read().await, id)
    }

    /// Number of cached artists
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the catalog has not been populated yet
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Index of an artist, trying the contiguous `id - 1` slot first
    fn position(records: &[ArtistRecord], id: ArtistId) -> Option<usize> {
        let slot = id.get() as usize - 1;
        match records.get(slot) {
            Some(record) if record.id == id.get() => Some(slot),
            _ => records.iter().position(|record| record.id == id.get()),
        }
    }
}

/// Artist name for an id within a set of records, or an empty string
pub fn name_in(records: &[ArtistRecord], id: u32) -> String {
    records
        .iter()
        .find(|record| record.id == id)
        .map(|record| record.name.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::fake::{artist, FakeSource};
    use std::sync::Arc;

    fn id(n: u32) -> ArtistId {
        ArtistId::new(n).unwrap()
    }

    fn two_artist_source() -> FakeSource {
        FakeSource::with_artists(vec![artist(1, "The Beatles"), artist(2, "Queen")])
            .dates(1, &["*01-01-1964"])
            .dates(2, &["13-07-1985"])
            .location(1, &["liverpool-uk"])
            .location(2, &["london-uk"])
            .relation(1, &[("liverpool-uk", &["01-01-1964"])])
            .relation(2, &[("london-uk", &["13-07-1985"])])
    }

    #[tokio::test]
    async fn test_populates_once() {
        let source = two_artist_source();
        let catalog = ArtistCatalog::new();

        catalog.ensure_populated(&source).await.unwrap();
        catalog.ensure_populated(&source).await.unwrap();

        assert_eq!(catalog.len().await, 2);
        assert_eq!(source.call_count(), 1);
        assert_eq!(catalog.name_of(2).await, "Queen");
        assert_eq!(catalog.name_of(42).await, "");
    }

    #[tokio::test]
    async fn test_concurrent_population_fetches_once() {
        let source = Arc::new(two_artist_source());
        let catalog = Arc::new(ArtistCatalog::new());

        let mut handles = Vec::new();
        for _ in 0..8 {
            let source = Arc::clone(&source);
            let catalog = Arc::clone(&catalog);
            handles.push(tokio::spawn(async move {
                catalog.ensure_populated(source.as_ref()).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(catalog.len().await, 2);
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_population_retries() {
        let source = two_artist_source();
        let catalog = ArtistCatalog::new();

        source.set_failing(true);
        assert!(catalog.ensure_populated(&source).await.is_err());
        assert!(catalog.is_empty().await);

        source.set_failing(false);
        catalog.ensure_populated(&source).await.unwrap();
        assert_eq!(catalog.len().await, 2);
        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn test_enrichment_is_disjoint() {
        let source = two_artist_source();
        let catalog = ArtistCatalog::new();
        catalog.ensure_populated(&source).await.unwrap();

        let first = catalog.enrich_artist(&source, id(1)).await.unwrap();
        let again = catalog.enrich_artist(&source, id(1)).await.unwrap();
        catalog.enrich_artist(&source, id(2)).await.unwrap();

        assert_eq!(first, again);
        assert_eq!(first.concert_dates, vec!["01-01-1964"]);
        assert_eq!(first.locations, vec!["liverpool-uk"]);

        let beatles = catalog.get(id(1)).await.unwrap();
        let queen = catalog.get(id(2)).await.unwrap();
        assert_eq!(beatles, first);
        assert_eq!(beatles.date_and_location.len(), 1);
        assert!(beatles.date_and_location.contains_key("liverpool-uk"));
        assert_eq!(
            queen.date_and_location.get("london-uk"),
            Some(&vec!["13-07-1985".to_string()])
        );
    }

    #[tokio::test]
    async fn test_enrichment_fails_closed() {
        let source = two_artist_source();
        let catalog = ArtistCatalog::new();
        catalog.ensure_populated(&source).await.unwrap();

        source.set_failing(true);
        assert!(catalog.enrich_artist(&source, id(1)).await.is_err());

        let untouched = catalog.get(id(1)).await.unwrap();
        assert!(untouched.date_and_location.is_empty());
        assert!(untouched.concert_dates.is_empty());
    }

    #[tokio::test]
    async fn test_enriching_unknown_artist_is_not_found() {
        let source = two_artist_source();
        let catalog = ArtistCatalog::new();
        catalog.ensure_populated(&source).await.unwrap();

        let err = catalog.enrich_artist(&source, id(30)).await.unwrap_err();
        assert!(matches!(err, GroupieError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_lookup_falls_back_when_ids_are_not_contiguous() {
        let catalog = ArtistCatalog::with_records(vec![
            ArtistRecord::from(artist(5, "Gorillaz")),
            ArtistRecord::from(artist(1, "Queen")),
        ]);

        assert_eq!(catalog.get(id(1)).await.unwrap().name, "Queen");
        assert_eq!(catalog.get(id(5)).await.unwrap().name, "Gorillaz");
        assert!(catalog.get(id(2)).await.is_none());
    }
}
