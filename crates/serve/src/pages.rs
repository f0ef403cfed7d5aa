//! Server-rendered HTML pages

use groupie_core::{ArtistRecord, Result};
use handlebars::Handlebars;
use serde::Serialize;
use std::sync::OnceLock;

pub const INDEX_PAGE: &str = "index";
pub const ARTIST_PAGE: &str = "artist";
pub const DATES_PAGE: &str = "dates";
pub const LOCATIONS_PAGE: &str = "locations";
pub const ERROR_PAGE: &str = "error";

/// Handlebars registry holding every page template
#[derive(Debug)]
pub struct PageRenderer {
    handlebars: Handlebars<'static>,
}

impl PageRenderer {
    /// Create a renderer with the built-in page templates
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();

        register(&mut handlebars, INDEX_PAGE, include_str!("../templates/index.hbs"));
        register(&mut handlebars, ARTIST_PAGE, include_str!("../templates/artist.hbs"));
        register(&mut handlebars, DATES_PAGE, include_str!("../templates/dates.hbs"));
        register(
            &mut handlebars,
            LOCATIONS_PAGE,
            include_str!("../templates/locations.hbs"),
        );
        register(&mut handlebars, ERROR_PAGE, include_str!("../templates/error.hbs"));

        Self { handlebars }
    }

    /// Process-wide renderer, built on first use
    pub fn shared() -> &'static PageRenderer {
        static RENDERER: OnceLock<PageRenderer> = OnceLock::new();
        RENDERER.get_or_init(PageRenderer::new)
    }

    /// Render a registered page with serializable data
    pub fn render<T: Serialize>(&self, page: &str, data: &T) -> Result<String> {
        Ok(self.handlebars.render(page, data)?)
    }

    pub fn index(&self, artists: &[ArtistRecord]) -> Result<String> {
        self.render(INDEX_PAGE, &IndexPage { artists })
    }

    pub fn artist(&self, artist: &ArtistRecord) -> Result<String> {
        self.render(ARTIST_PAGE, artist)
    }

    pub fn dates(&self, page: &ListingPage<'_>) -> Result<String> {
        self.render(DATES_PAGE, &DatesPage {
            id: page.id,
            name: page.name,
            dates: page.entries,
        })
    }

    pub fn locations(&self, page: &ListingPage<'_>) -> Result<String> {
        self.render(LOCATIONS_PAGE, &LocationsPage {
            id: page.id,
            name: page.name,
            locations: page.entries,
        })
    }

    pub fn error(&self, title: &str, message: &str) -> Result<String> {
        self.render(ERROR_PAGE, &ErrorPage { title, message })
    }
}

impl Default for PageRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn register(handlebars: &mut Handlebars<'static>, name: &str, template: &str) {
    if let Err(e) = handlebars.register_template_string(name, template) {
        tracing::warn!("Failed to register template '{}': {}", name, e);
    }
}

/// Data for the per-artist dates and locations pages
#[derive(Debug, Clone, Copy)]
pub struct ListingPage<'a> {
    pub id: u32,
    /// Cached artist name, empty before the cache is populated
    pub name: &'a str,
    pub entries: &'a [String],
}

#[derive(Serialize)]
struct IndexPage<'a> {
    artists: &'a [ArtistRecord],
}

#[derive(Serialize)]
struct DatesPage<'a> {
    id: u32,
    name: &'a str,
    dates: &'a [String],
}

#[derive(Serialize)]
struct LocationsPage<'a> {
    id: u32,
    name: &'a str,
    locations: &'a [String],
}

#[derive(Serialize)]
struct ErrorPage<'a> {
    title: &'a str,
    message: &'a str,
}
