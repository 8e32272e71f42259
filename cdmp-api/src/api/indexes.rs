//! Index read handlers
//!
//! Every handler reads one document owned by the authenticated user. A
//! missing document is an empty collection on every route; a single-id
//! lookup is a 404 only when the document exists without that id.
//!
//! The routes are mounted for any method (POST on the playlists route
//! excepted), so the GET schema check is what turns other methods away.

use axum::extract::{Path, State};
use axum::http::Method;
use axum::{Extension, Json};
use cdmp_common::api::AppUser;
use cdmp_common::models::collections;
use serde_json::{json, Map, Value};
use tracing::debug;

use super::schema::RequestSchema;
use crate::{ApiError, AppState};

const ALBUM_NOT_FOUND: &str = "Album ID not found";
const PLAYLIST_NOT_FOUND: &str = "Playlist ID not found";

/// GET /api/indexes/files
pub async fn get_files(
    State(state): State<AppState>,
    Extension(user): Extension<AppUser>,
    method: Method,
) -> Result<Json<Value>, ApiError> {
    read_index(&state, &user, &method, collections::FILES, "files").await
}

/// GET /api/indexes/albums
pub async fn get_albums(
    State(state): State<AppState>,
    Extension(user): Extension<AppUser>,
    method: Method,
) -> Result<Json<Value>, ApiError> {
    read_index(&state, &user, &method, collections::ALBUMS, "albums").await
}

/// GET /api/indexes/albums/:albumid
pub async fn get_album(
    State(state): State<AppState>,
    Extension(user): Extension<AppUser>,
    method: Method,
    Path(albumid): Path<String>,
) -> Result<Json<Value>, ApiError> {
    read_entry(
        &state,
        &user,
        &method,
        collections::ALBUMS,
        "albums",
        &albumid,
        ALBUM_NOT_FOUND,
    )
    .await
}

/// GET /api/indexes/artists
pub async fn get_artists(
    State(state): State<AppState>,
    Extension(user): Extension<AppUser>,
    method: Method,
) -> Result<Json<Value>, ApiError> {
    read_index(&state, &user, &method, collections::ARTISTS, "artists").await
}

/// GET /api/indexes/playlists
pub async fn get_playlists(
    State(state): State<AppState>,
    Extension(user): Extension<AppUser>,
    method: Method,
) -> Result<Json<Value>, ApiError> {
    read_index(&state, &user, &method, collections::PLAYLISTS, "playlists").await
}

/// GET /api/indexes/playlist/:playlist_id
pub async fn get_playlist(
    State(state): State<AppState>,
    Extension(user): Extension<AppUser>,
    method: Method,
    Path(playlist_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    read_entry(
        &state,
        &user,
        &method,
        collections::PLAYLISTS,
        "playlists",
        &playlist_id,
        PLAYLIST_NOT_FOUND,
    )
    .await
}

/// Whole document, or `{ <field>: {} }` when the user has none yet
async fn read_index(
    state: &AppState,
    user: &AppUser,
    method: &Method,
    collection: &str,
    field: &str,
) -> Result<Json<Value>, ApiError> {
    RequestSchema::get().verify(method, None)?;

    match state.store.get(collection, &user.id).await? {
        Some(doc) => Ok(Json(doc)),
        None => {
            debug!("{} has no {} document, returning empty", user.id, collection);
            Ok(Json(json!({ field: Map::new() })))
        }
    }
}

/// One entry of `<field>` in the user's document
///
/// A user with no document gets the empty collection, as on the listing
/// route; only an id missing from an existing document is a 404.
async fn read_entry(
    state: &AppState,
    user: &AppUser,
    method: &Method,
    collection: &str,
    field: &str,
    id: &str,
    not_found: &str,
) -> Result<Json<Value>, ApiError> {
    RequestSchema::get().verify(method, None)?;

    let Some(mut doc) = state.store.get(collection, &user.id).await? else {
        debug!("{} has no {} document, returning empty", user.id, collection);
        return Ok(Json(json!({ field: Map::new() })));
    };

    doc.get_mut(field)
        .and_then(|entries| entries.get_mut(id))
        .map(Value::take)
        .filter(|entry| !entry.is_null())
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(not_found.to_string()))
}
