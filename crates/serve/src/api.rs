//! Route table for the Groupie Tracker web application

use crate::handlers::{
    artist, dates, health, home, locations, method_not_allowed, method_not_allowed_json,
    not_found, search, AppState,
};
use axum::{
    handler::HandlerWithoutStateExt,
    routing::{get, MethodRouter},
    Router,
};
use std::path::Path;
use tower_http::services::ServeDir;

/// Build the application routes
///
/// Every page route answers GET only; other methods, HEAD included, get
/// the 405 page.
/// Unknown paths, including missing static assets, get the 404 page.
pub fn create_routes(state: AppState, static_dir: &Path) -> Router {
    let assets = ServeDir::new(static_dir).not_found_service(not_found.into_service());

    Router::new()
        .route("/", page(home))
        .route("/artist", page(artist))
        .route("/dates", page(dates))
        .route("/locations", page(locations))
        .route(
            "/search",
            get(search)
                .head(method_not_allowed_json)
                .fallback(method_not_allowed_json),
        )
        .route("/health", page(health))
        .nest_service("/static", assets)
        .fallback(not_found)
        .with_state(state)
}

/// GET-only route for an HTML page.
///
/// axum answers HEAD with the GET handler unless HEAD has its own endpoint.
fn page<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: axum::handler::Handler<T, AppState>,
    T: 'static,
{
    get(handler)
        .head(method_not_allowed)
        .fallback(method_not_allowed)
}
