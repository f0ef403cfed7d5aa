//! HTTP client for the Groupie Trackers upstream API

use async_trait::async_trait;
use groupie_core::{
    types::{Artist, DateIndex, LocationIndex, RelationIndex},
    ArtistSource, GroupieError, Result, UpstreamConfig,
};
use reqwest::{Client, ClientBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Artist list endpoint
pub const ARTISTS_PATH: &str = "api/artists";
/// Per-artist concert dates endpoint
pub const DATES_PATH: &str = "api/dates";
/// Per-artist concert locations endpoint
pub const LOCATIONS_PATH: &str = "api/locations";
/// Per-artist location to dates endpoint
pub const RELATION_PATH: &str = "api/relation";

/// Client for the upstream artist API
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: Url,
}

impl UpstreamClient {
    /// Create a new upstream client
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Create a client for a base URL with the default timeout
    pub fn from_base_url(base_url: &str) -> Result<Self> {
        let config = UpstreamConfig {
            base_url: Url::parse(base_url)?,
            ..UpstreamConfig::default()
        };
        Self::new(&config)
    }

    /// Get the base URL of the upstream API
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// GET an endpoint and decode its JSON body
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path);
        debug!("Fetching {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GroupieError::network(format!("Failed to fetch {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(GroupieError::upstream(format!(
                "{} returned HTTP {}",
                url,
                response.status()
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| GroupieError::upstream(format!("Failed to decode {}: {}", url, e)))
    }
}

#[async_trait]
impl ArtistSource for UpstreamClient {
    async fn fetch_artists(&self) -> Result<Vec<Artist>> {
        self.get_json(ARTISTS_PATH).await
    }

    async fn fetch_date_index(&self) -> Result<DateIndex> {
        self.get_json(DATES_PATH).await
    }

    async fn fetch_location_index(&self) -> Result<LocationIndex> {
        self.get_json(LOCATIONS_PATH).await
    }

    async fn fetch_relation_index(&self) -> Result<RelationIndex> {
        self.get_json(RELATION_PATH).await
    }
}
