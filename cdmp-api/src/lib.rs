//! cdmp-api library - index read/write API
//!
//! Serves each user's index documents (files, albums, artists, playlists)
//! from the document store. Every `/api/indexes/*` route is behind bearer
//! authentication; `/health` is public.

use axum::extract::DefaultBodyLimit;
use axum::Router;
use cdmp_common::db::DocumentStore;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;

pub use error::ApiError;

/// Request bodies larger than this are rejected before reaching a handler
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Per-user index documents
    pub store: DocumentStore,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            store: DocumentStore::new(pool),
        }
    }

    /// Pool backing both documents and tokens
    pub fn pool(&self) -> &SqlitePool {
        self.store.pool()
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{any, get};

    // Index routes take any method: each handler's request schema rejects
    // the ones it does not accept
    let protected = Router::new()
        .route("/api/indexes/files", any(api::get_files))
        .route("/api/indexes/albums", any(api::get_albums))
        .route("/api/indexes/albums/:albumid", any(api::get_album))
        .route("/api/indexes/artists", any(api::get_artists))
        .route(
            "/api/indexes/playlists",
            any(api::get_playlists).post(api::post_playlists),
        )
        .route("/api/indexes/playlist/:playlist_id", any(api::get_playlist))
        .route("/api/buildinfo", get(api::get_build_info))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::auth_middleware,
        ));

    // Public routes
    let public = Router::new().merge(api::health_routes());

    Router::new()
        .merge(protected)
        .merge(public)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
