//! HTTP handlers for the Groupie Tracker pages and endpoints

use crate::error::{AppError, JsonError};
use crate::pages::{ListingPage, PageRenderer};
use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Json},
};
use groupie_core::{ArtistCatalog, ArtistId, ArtistSource, SearchEngine, SearchResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<ArtistCatalog>,
    pub source: Arc<dyn ArtistSource>,
    pub engine: Arc<SearchEngine>,
}

impl AppState {
    pub fn new(source: Arc<dyn ArtistSource>, engine: SearchEngine) -> Self {
        Self {
            catalog: Arc::new(ArtistCatalog::new()),
            source,
            engine: Arc::new(engine),
        }
    }
}

/// `?id=` query of the per-artist pages
#[derive(Debug, Default, Deserialize)]
pub struct IdParams {
    pub id: Option<String>,
}

impl IdParams {
    /// Validate the raw `id` parameter
    pub fn artist_id(&self) -> Result<ArtistId, AppError> {
        let raw = self.id.as_deref().ok_or(AppError::BadRequest)?;
        Ok(raw.parse()?)
    }
}

/// `?q=` query of the search endpoint
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Homepage listing every artist
pub async fn home(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    state.catalog.ensure_populated(state.source.as_ref()).await?;

    let artists = state.catalog.snapshot().await;
    Ok(Html(PageRenderer::shared().index(&artists)?))
}

/// Artist page, enriched with the artist's concerts
pub async fn artist(
    State(state): State<AppState>,
    params: Option<Query<IdParams>>,
) -> Result<Html<String>, AppError> {
    let id = params.unwrap_or_default().artist_id()?;

    state.catalog.ensure_populated(state.source.as_ref()).await?;
    let record = state
        .catalog
        .enrich_artist(state.source.as_ref(), id)
        .await?;

    info!("Rendering artist page for {} ({})", record.name, id);
    Ok(Html(PageRenderer::shared().artist(&record)?))
}

/// Concert dates of one artist
pub async fn dates(
    State(state): State<AppState>,
    params: Option<Query<IdParams>>,
) -> Result<Html<String>, AppError> {
    let id = params.unwrap_or_default().artist_id()?;

    let record = state.source.fetch_dates(id).await?;
    let name = state.catalog.name_of(id.get()).await;

    let page = ListingPage {
        id: id.get(),
        name: &name,
        entries: &record.dates,
    };
    Ok(Html(PageRenderer::shared().dates(&page)?))
}

/// Concert locations of one artist
pub async fn locations(
    State(state): State<AppState>,
    params: Option<Query<IdParams>>,
) -> Result<Html<String>, AppError> {
    let id = params.unwrap_or_default().artist_id()?;

    let record = state.source.fetch_locations(id).await?;
    let name = state.catalog.name_of(id.get()).await;

    let page = ListingPage {
        id: id.get(),
        name: &name,
        entries: &record.locations,
    };
    Ok(Html(PageRenderer::shared().locations(&page)?))
}

/// Autocomplete search across every artist field
pub async fn search(
    State(state): State<AppState>,
    params: Option<Query<SearchParams>>,
) -> Result<Json<SearchResponse>, JsonError> {
    let query = params.unwrap_or_default().0.q.unwrap_or_default();
    if query.trim().is_empty() {
        return Ok(Json(SearchResponse::ok(Vec::new())));
    }

    state.catalog.ensure_populated(state.source.as_ref()).await?;
    let results = state
        .engine
        .search(&query, &state.catalog, state.source.as_ref())
        .await?;

    Ok(Json(SearchResponse::ok(results)))
}

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: crate::VERSION.to_string(),
        cached_artists: state.catalog.len().await,
        timestamp: chrono::Utc::now(),
    })
}

/// Fallback for unknown paths
pub async fn not_found() -> AppError {
    AppError::NotFound
}

/// Fallback for unsupported methods on page routes
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Fallback for unsupported methods on `/search`
pub async fn method_not_allowed_json() -> JsonError {
    JsonError(AppError::MethodNotAllowed)
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub cached_artists: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
