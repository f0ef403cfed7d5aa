//! Free-text search over the artist catalog
//!
//! A search is one ordered pass over the fields in [`ResultKind::PRECEDENCE`].
//! Every field scanner feeds the same [`ResultAccumulator`], which drops
//! duplicates, enforces the per-field and global caps, and tells the scanner
//! when to stop. Once the global cap is reached no further field runs, so the
//! live upstream fetch for locations and dates only happens when those
//! fields are actually reached.

use crate::{
    catalog::{name_in, ArtistCatalog},
    config::SearchConfig,
    search::types::{ResultKind, SearchResult},
    source::ArtistSource,
    types::{ArtistRecord, LocationIndex, RelationIndex},
    Result,
};
use tracing::{debug, info};

/// Collects results across field scanners
#[derive(Debug)]
pub struct ResultAccumulator {
    results: Vec<SearchResult>,
    max_results: usize,
    max_per_field: usize,
    field_count: usize,
}

impl ResultAccumulator {
    pub fn new(max_results: usize, max_per_field: usize) -> Self {
        Self {
            results: Vec::new(),
            max_results,
            max_per_field,
            field_count: 0,
        }
    }

    /// Reset the per-field counter before a new field is scanned
    pub fn begin_field(&mut self) {
        self.field_count = 0;
    }

    /// Whether the global cap has been reached
    pub fn is_full(&self) -> bool {
        self.results.len() >= self.max_results
    }

    /// Whether the current field may not contribute any more results
    pub fn field_exhausted(&self) -> bool {
        self.is_full() || self.field_count >= self.max_per_field
    }

    /// Add a candidate unless it duplicates an earlier result.
    ///
    /// Returns `false` once the scanner should stop.
    pub fn offer(&mut self, candidate: SearchResult) -> bool {
        if self.field_exhausted() {
            return false;
        }

        if !self.results.iter().any(|r| r.is_duplicate_of(&candidate)) {
            self.results.push(candidate);
            self.field_count += 1;
        }

        !self.field_exhausted()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn into_results(self) -> Vec<SearchResult> {
        self.results
    }
}

/// Relations and locations fetched from upstream for one search
#[derive(Debug, Default)]
struct LiveIndex {
    relations: RelationIndex,
    locations: LocationIndex,
}

/// Search engine over the cached artists
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    config: SearchConfig,
}

impl SearchEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run a query across every field in precedence order
    ///
    /// An empty or whitespace-only query returns no results without touching
    /// the catalog or upstream.
    pub async fn search(
        &self,
        query: &str,
        catalog: &ArtistCatalog,
        source: &dyn ArtistSource,
    ) -> Result<Vec<SearchResult>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        let artists = catalog.snapshot().await;
        let mut acc = ResultAccumulator::new(self.config.max_results, self.config.max_per_field);
        let mut live: Option<LiveIndex> = None;

        for kind in ResultKind::PRECEDENCE {
            if acc.is_full() {
                debug!("Result cap reached before {} search", kind);
                break;
            }
            acc.begin_field();

            if kind.needs_live_index() && self.config.live_locations && live.is_none() {
                let (relations, locations) = tokio::try_join!(
                    source.fetch_relation_index(),
                    source.fetch_location_index(),
                )?;
                live = Some(LiveIndex {
                    relations,
                    locations,
                });
            }

            match (kind, live.as_ref()) {
                (ResultKind::Artist, _) => scan_names(&needle, &artists, &mut acc),
                (ResultKind::Location, Some(live)) => {
                    scan_live_locations(&needle, &artists, live, &mut acc)
                }
                (ResultKind::Location, None) => scan_cached_locations(&needle, &artists, &mut acc),
                (ResultKind::Date, Some(live)) => scan_live_dates(&needle, &artists, live, &mut acc),
                (ResultKind::Date, None) => scan_cached_dates(&needle, &artists, &mut acc),
                (ResultKind::Creation, _) => scan_creation_years(&needle, &artists, &mut acc),
                (ResultKind::FirstAlbum, _) => scan_first_albums(&needle, &artists, &mut acc),
                (ResultKind::Member, _) => scan_members(&needle, &artists, &mut acc),
            }
        }

        if acc.is_empty() {
            info!("Search '{}' matched nothing", needle);
        } else {
            info!("Search '{}' matched {} results", needle, acc.len());
        }
        Ok(acc.into_results())
    }
}

fn matches(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn scan_names(needle: &str, artists: &[ArtistRecord], acc: &mut ResultAccumulator) {
    for artist in artists {
        if matches(&artist.name, needle)
            && !acc.offer(SearchResult::new(ResultKind::Artist, artist.id, &artist.name))
        {
            return;
        }
    }
}

fn scan_live_locations(
    needle: &str,
    artists: &[ArtistRecord],
    live: &LiveIndex,
    acc: &mut ResultAccumulator,
) {
    let from_relations = live
        .relations
        .index
        .iter()
        .flat_map(|r| r.dates_locations.keys().map(move |loc| (r.id, loc)));
    let from_locations = live
        .locations
        .index
        .iter()
        .flat_map(|l| l.locations.iter().map(move |loc| (l.id, loc)));

    for (id, location) in from_relations.chain(from_locations) {
        if matches(location, needle) {
            let result =
                SearchResult::new(ResultKind::Location, id, name_in(artists, id)).with_context(location);
            if !acc.offer(result) {
                return;
            }
        }
    }
}

fn scan_cached_locations(needle: &str, artists: &[ArtistRecord], acc: &mut ResultAccumulator) {
    for artist in artists {
        let locations = artist
            .date_and_location
            .keys()
            .chain(artist.locations.iter());
        for location in locations {
            if matches(location, needle) {
                let result = SearchResult::new(ResultKind::Location, artist.id, &artist.name)
                    .with_context(location);
                if !acc.offer(result) {
                    return;
                }
            }
        }
    }
}

fn scan_live_dates(
    needle: &str,
    artists: &[ArtistRecord],
    live: &LiveIndex,
    acc: &mut ResultAccumulator,
) {
    for relation in &live.relations.index {
        for date in relation.dates_locations.values().flatten() {
            if matches(date, needle) {
                let name = name_in(artists, relation.id);
                let result =
                    SearchResult::new(ResultKind::Date, relation.id, name).with_context(date);
                if !acc.offer(result) {
                    return;
                }
            }
        }
    }
}

fn scan_cached_dates(needle: &str, artists: &[ArtistRecord], acc: &mut ResultAccumulator) {
    for artist in artists {
        let dates = artist
            .date_and_location
            .values()
            .flatten()
            .chain(artist.concert_dates.iter());
        for date in dates {
            if matches(date, needle) {
                let result =
                    SearchResult::new(ResultKind::Date, artist.id, &artist.name).with_context(date);
                if !acc.offer(result) {
                    return;
                }
            }
        }
    }
}

fn scan_creation_years(needle: &str, artists: &[ArtistRecord], acc: &mut ResultAccumulator) {
    for artist in artists {
        let year = artist.creation_date.to_string();
        if year.contains(needle) {
            let result =
                SearchResult::new(ResultKind::Creation, artist.id, &artist.name).with_context(year);
            if !acc.offer(result) {
                return;
            }
        }
    }
}

fn scan_first_albums(needle: &str, artists: &[ArtistRecord], acc: &mut ResultAccumulator) {
    for artist in artists {
        if matches(&artist.first_album, needle) {
            let result = SearchResult::new(ResultKind::FirstAlbum, artist.id, &artist.name)
                .with_context(&artist.first_album);
            if !acc.offer(result) {
                return;
            }
        }
    }
}

fn scan_members(needle: &str, artists: &[ArtistRecord], acc: &mut ResultAccumulator) {
    for artist in artists {
        for member in &artist.members {
            if matches(member, needle) {
                let result = SearchResult::new(ResultKind::Member, artist.id, &artist.name)
                    .with_context(member);
                if !acc.offer(result) {
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::fake::FakeSource;
    use crate::types::ArtistId;

    fn record(id: u32, name: &str, year: i32, album: &str, members: &[&str]) -> ArtistRecord {
        ArtistRecord {
            id,
            name: name.to_string(),
            creation_date: year,
            first_album: album.to_string(),
            members: members.iter().map(|m| m.to_string()).collect(),
            ..Default::default()
        }
    }

    fn band_catalog() -> ArtistCatalog {
        ArtistCatalog::with_records(vec![
            record(1, "The Beatles", 1960, "22-03-1963", &["John Lennon", "Paul McCartney"]),
            record(2, "Queen", 1970, "14-12-1973", &["Freddie Mercury", "Brian May"]),
            record(3, "Pink Floyd", 1965, "05-08-1967", &["Roger Waters", "David Gilmour"]),
        ])
    }

    fn kinds(results: &[SearchResult]) -> Vec<ResultKind> {
        results.iter().map(|r| r.kind).collect()
    }

    #[tokio::test]
    async fn test_empty_query_makes_no_upstream_calls() {
        let source = FakeSource::default();
        let engine = SearchEngine::default();
        let catalog = band_catalog();

        for query in ["", "   ", "\t\n"] {
            let results = engine.search(query, &catalog, &source).await.unwrap();
            assert!(results.is_empty());
        }
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn test_partial_name_match() {
        let source = FakeSource::default();
        let catalog = ArtistCatalog::with_records(vec![
            record(1, "The Beatles", 1960, "22-03-1963", &["John"]),
            record(2, "Queen", 1970, "14-12-1973", &["Freddie"]),
        ]);

        let results = SearchEngine::default()
            .search("een", &catalog, &source)
            .await
            .unwrap();

        assert_eq!(results, vec![SearchResult::new(ResultKind::Artist, 2, "Queen")]);
    }

    #[tokio::test]
    async fn test_surrounding_whitespace_is_ignored() {
        let source = FakeSource::default();
        let catalog = ArtistCatalog::with_records(vec![
            record(1, "The Beatles", 1960, "22-03-1963", &["John"]),
            record(2, "Queen", 1970, "14-12-1973", &["Freddie"]),
        ]);

        let results = SearchEngine::default()
            .search("  queen ", &catalog, &source)
            .await
            .unwrap();

        assert_eq!(results, vec![SearchResult::new(ResultKind::Artist, 2, "Queen")]);
    }

    #[tokio::test]
    async fn test_case_insensitive_across_fields() {
        let source = FakeSource::default();
        let catalog = band_catalog();

        let results = SearchEngine::default()
            .search("  BRIAN ", &catalog, &source)
            .await
            .unwrap();

        assert_eq!(
            results,
            vec![SearchResult::new(ResultKind::Member, 2, "Queen").with_context("Brian May")]
        );
    }

    #[tokio::test]
    async fn test_precedence_order() {
        let source = FakeSource::default()
            .relation(2, &[("london-uk", &["19-06-1965"])]);
        let catalog = band_catalog();

        // "196" hits dates, creation years and first albums
        let results = SearchEngine::default()
            .search("196", &catalog, &source)
            .await
            .unwrap();

        assert_eq!(
            kinds(&results),
            vec![
                ResultKind::Date,
                ResultKind::Creation,
                ResultKind::Creation,
                ResultKind::FirstAlbum,
                ResultKind::FirstAlbum,
            ]
        );
        assert_eq!(results[0].text, "Queen");
        assert_eq!(results[0].context.as_deref(), Some("19-06-1965"));
        assert_eq!(results[1].id, 1);
        assert_eq!(results[2].id, 3);
    }

    #[tokio::test]
    async fn test_location_dedup_across_sources() {
        let source = FakeSource::default()
            .relation(2, &[("london-uk", &["13-07-1985"]), ("leeds-uk", &["01-01-1982"])])
            .location(2, &["london-uk", "london-canada"]);
        let catalog = band_catalog();

        let results = SearchEngine::default()
            .search("london", &catalog, &source)
            .await
            .unwrap();

        let contexts: Vec<_> = results.iter().filter_map(|r| r.context.as_deref()).collect();
        assert_eq!(contexts, vec!["london-uk", "london-canada"]);
        assert!(results.iter().all(|r| r.kind == ResultKind::Location && r.id == 2));
        assert!(results.iter().all(|r| r.text == "Queen"));
        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn test_location_for_uncached_artist_has_empty_name() {
        let source = FakeSource::default().location(40, &["osaka-japan"]);
        let catalog = band_catalog();

        let results = SearchEngine::default()
            .search("osaka", &catalog, &source)
            .await
            .unwrap();

        assert_eq!(
            results,
            vec![SearchResult::new(ResultKind::Location, 40, "").with_context("osaka-japan")]
        );
    }

    #[tokio::test]
    async fn test_global_cap() {
        let records: Vec<ArtistRecord> = (1..=30)
            .map(|i| record(i, &format!("Band {}", i), 1990, "01-01-1991", &["Band Member"]))
            .collect();
        let catalog = ArtistCatalog::with_records(records);
        let source = FakeSource::default();

        let results = SearchEngine::default()
            .search("band", &catalog, &source)
            .await
            .unwrap();

        assert_eq!(results.len(), 10);
        assert!(results.iter().all(|r| r.kind == ResultKind::Artist));
        let ids: Vec<u32> = results.iter().map(|r| r.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_field_filling_cap_skips_live_fetch() {
        let records: Vec<ArtistRecord> = (1..=12)
            .map(|i| record(i, &format!("Rock {}", i), 1990, "", &[]))
            .collect();
        let catalog = ArtistCatalog::with_records(records);
        let source = FakeSource::default().location(1, &["rockford-usa"]);

        let results = SearchEngine::default()
            .search("rock", &catalog, &source)
            .await
            .unwrap();

        assert_eq!(results.len(), 10);
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn test_per_field_cap_lets_later_fields_run() {
        let records: Vec<ArtistRecord> = (1..=6)
            .map(|i| record(i, &format!("Jazz {}", i), 1950, "", &["Jazz Hands"]))
            .collect();
        let catalog = ArtistCatalog::with_records(records);
        let source = FakeSource::default();
        let engine = SearchEngine::new(SearchConfig {
            max_results: 10,
            max_per_field: 3,
            live_locations: true,
        });

        let results = engine.search("jazz", &catalog, &source).await.unwrap();

        assert_eq!(
            kinds(&results),
            vec![
                ResultKind::Artist,
                ResultKind::Artist,
                ResultKind::Artist,
                ResultKind::Member,
                ResultKind::Member,
                ResultKind::Member,
            ]
        );
    }

    #[tokio::test]
    async fn test_distinct_contexts_are_kept() {
        let catalog = ArtistCatalog::with_records(vec![record(
            7,
            "Duo",
            2001,
            "",
            &["Sam Smith", "Sam Smith Jr"],
        )]);
        let source = FakeSource::default();

        let results = SearchEngine::default()
            .search("sam", &catalog, &source)
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].context.as_deref(), Some("Sam Smith"));
        assert_eq!(results[1].context.as_deref(), Some("Sam Smith Jr"));
    }

    #[tokio::test]
    async fn test_cached_locations_when_live_fetch_disabled() {
        let source = FakeSource::with_artists(vec![crate::source::fake::artist(1, "Queen")])
            .relation(1, &[("london-uk", &["13-07-1985"])])
            .location(1, &["london-uk"])
            .dates(1, &["13-07-1985"]);
        let catalog = ArtistCatalog::new();
        catalog.ensure_populated(&source).await.unwrap();
        catalog
            .enrich_artist(&source, ArtistId::new(1).unwrap())
            .await
            .unwrap();
        let calls_before = source.call_count();

        let engine = SearchEngine::new(SearchConfig {
            live_locations: false,
            ..SearchConfig::default()
        });
        let results = engine.search("london", &catalog, &source).await.unwrap();
        let dates = engine.search("1985", &catalog, &source).await.unwrap();

        assert_eq!(
            results,
            vec![SearchResult::new(ResultKind::Location, 1, "Queen").with_context("london-uk")]
        );
        assert_eq!(
            dates,
            vec![SearchResult::new(ResultKind::Date, 1, "Queen").with_context("13-07-1985")]
        );
        assert_eq!(source.call_count(), calls_before);
    }

    #[tokio::test]
    async fn test_live_fetch_failure_propagates() {
        let source = FakeSource::default();
        source.set_failing(true);

        let result = SearchEngine::default()
            .search("queen", &band_catalog(), &source)
            .await;

        assert!(result.is_err());
    }

    #[test]
    fn test_accumulator_stops_at_caps() {
        let mut acc = ResultAccumulator::new(3, 2);
        acc.begin_field();
        assert!(acc.offer(SearchResult::new(ResultKind::Artist, 1, "A")));
        assert!(acc.offer(SearchResult::new(ResultKind::Artist, 1, "A")));
        assert!(!acc.offer(SearchResult::new(ResultKind::Artist, 2, "B")));
        assert!(!acc.offer(SearchResult::new(ResultKind::Artist, 3, "C")));
        assert_eq!(acc.len(), 2);

        acc.begin_field();
        assert!(!acc.offer(SearchResult::new(ResultKind::Member, 3, "C").with_context("x")));
        assert!(acc.is_full());
        assert_eq!(acc.into_results().len(), 3);
    }
}
