//! Search result types shared by the engine and the `/search` endpoint

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which field a result matched on
///
/// Declaration order is the precedence order the engine scans fields in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResultKind {
    Artist,
    Location,
    Date,
    Creation,
    FirstAlbum,
    Member,
}

impl ResultKind {
    /// Fields in the order their results are emitted
    pub const PRECEDENCE: [ResultKind; 6] = [
        ResultKind::Artist,
        ResultKind::Location,
        ResultKind::Date,
        ResultKind::Creation,
        ResultKind::FirstAlbum,
        ResultKind::Member,
    ];

    /// Whether scanning this field needs the live relations/locations data
    pub fn needs_live_index(self) -> bool {
        matches!(self, Self::Location | Self::Date)
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Artist => write!(f, "artist"),
            Self::Location => write!(f, "location"),
            Self::Date => write!(f, "date"),
            Self::Creation => write!(f, "creation"),
            Self::FirstAlbum => write!(f, "firstAlbum"),
            Self::Member => write!(f, "member"),
        }
    }
}

/// One search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "type")]
    pub kind: ResultKind,
    /// Artist id the hit belongs to
    pub id: u32,
    /// Artist name
    pub text: String,
    /// The matched value when it is not the artist name itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl SearchResult {
    pub fn new<S: Into<String>>(kind: ResultKind, id: u32, text: S) -> Self {
        Self {
            kind,
            id,
            text: text.into(),
            context: None,
        }
    }

    pub fn with_context<S: Into<String>>(mut self, context: S) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Two results are duplicates when kind, id and context match. Results
    /// without a context compare on their text instead.
    pub fn is_duplicate_of(&self, other: &SearchResult) -> bool {
        self.kind == other.kind && self.id == other.id && self.dedup_value() == other.dedup_value()
    }

    fn dedup_value(&self) -> &str {
        self.context.as_deref().unwrap_or(&self.text)
    }
}

/// Body of the `/search` endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    pub results: Vec<SearchResult>,
}

impl SearchResponse {
    pub fn ok(results: Vec<SearchResult>) -> Self {
        Self {
            success: true,
            results,
        }
    }
}
