//! showbook-web library - venue/artist/show booking directory
//!
//! Server-rendered HTML pages over the showbook-common data layer.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod flash;
pub mod ui;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
///
/// Unmatched paths render the 404 page.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::home_routes())
        .merge(api::health_routes())
        .merge(api::venue_routes())
        .merge(api::artist_routes())
        .merge(api::show_routes())
        .fallback(api::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
