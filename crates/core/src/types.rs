//! Core type definitions for Groupie
//!
//! Two families live here: the wire records decoded from the upstream API
//! (`Artist`, `DateRecord`, `LocationRecord`, `RelationRecord` and their
//! `{"index": [...]}` envelopes) and the cached, display-oriented
//! `ArtistRecord` that the web pages and the search engine work from.

use crate::{GroupieError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowest artist id accepted by the web handlers
pub const MIN_ARTIST_ID: u32 = 1;

/// Highest artist id accepted by the web handlers
pub const MAX_ARTIST_ID: u32 = 52;

/// Concert locations mapped to the dates played there, in upstream order
pub type DatesLocations = IndexMap<String, Vec<String>>;

/// Validated artist identifier in `[MIN_ARTIST_ID, MAX_ARTIST_ID]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArtistId(u32);

impl ArtistId {
    /// Create an id, rejecting values outside the accepted range
    pub fn new(id: u32) -> Result<Self> {
        if (MIN_ARTIST_ID..=MAX_ARTIST_ID).contains(&id) {
            Ok(Self(id))
        } else {
            Err(GroupieError::invalid_artist_id(id.to_string()))
        }
    }

    /// Raw numeric value
    pub fn get(self) -> u32 {
        self.0
    }
}

impl FromStr for ArtistId {
    type Err = GroupieError;

    fn from_str(s: &str) -> Result<Self> {
        let id: u32 = s
            .parse()
            .map_err(|_| GroupieError::invalid_artist_id(s))?;
        Self::new(id).map_err(|_| GroupieError::invalid_artist_id(s))
    }
}

impl fmt::Display for ArtistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Artist summary as returned by `/api/artists`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub creation_date: i32,
    #[serde(default)]
    pub first_album: String,
    /// Link to the artist's `/api/locations` entry
    #[serde(default)]
    pub locations: String,
    /// Link to the artist's `/api/dates` entry
    #[serde(default)]
    pub concert_dates: String,
    /// Link to the artist's `/api/relation` entry
    #[serde(default)]
    pub relations: String,
}

/// Concert dates for one artist (`/api/dates`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateRecord {
    pub id: u32,
    #[serde(default)]
    pub dates: Vec<String>,
}

impl DateRecord {
    /// Drop the single leading `*` upstream uses to flag some dates
    pub fn strip_markers(mut self) -> Self {
        for date in &mut self.dates {
            if let Some(stripped) = date.strip_prefix('*') {
                *date = stripped.to_string();
            }
        }
        self
    }
}

/// Concert locations for one artist (`/api/locations`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: u32,
    #[serde(default)]
    pub locations: Vec<String>,
    /// Link to the matching `/api/dates` entry
    #[serde(default)]
    pub dates: String,
}

/// Location to dates mapping for one artist (`/api/relation`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationRecord {
    pub id: u32,
    #[serde(rename = "datesLocations", default)]
    pub dates_locations: DatesLocations,
}

/// `{"index": [...]}` envelope of `/api/dates`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateIndex {
    #[serde(default)]
    pub index: Vec<DateRecord>,
}

/// `{"index": [...]}` envelope of `/api/locations`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationIndex {
    #[serde(default)]
    pub index: Vec<LocationRecord>,
}

/// `{"index": [...]}` envelope of `/api/relation`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelationIndex {
    #[serde(default)]
    pub index: Vec<RelationRecord>,
}

/// Cached artist entry shown on the pages and scanned by search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistRecord {
    pub id: u32,
    pub name: String,
    pub image: String,
    pub members: Vec<String>,
    pub creation_date: i32,
    pub first_album: String,
    /// Filled in by enrichment from `/api/relation`
    #[serde(default)]
    pub date_and_location: DatesLocations,
    /// Filled in by enrichment from `/api/dates`
    #[serde(default)]
    pub concert_dates: Vec<String>,
    /// Filled in by enrichment from `/api/locations`
    #[serde(default)]
    pub locations: Vec<String>,
}

impl From<Artist> for ArtistRecord {
    fn from(artist: Artist) -> Self {
        Self {
            id: artist.id,
            name: artist.name,
            image: artist.image,
            members: artist.members,
            creation_date: artist.creation_date,
            first_album: artist.first_album,
            ..Default::default()
        }
    }
}
