//! Playlist writes

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::{Extension, Json};
use cdmp_common::api::AppUser;
use cdmp_common::models::{collections, Playlist, PlaylistsRequest};
use serde_json::{Map, Value};
use tracing::info;
use uuid::Uuid;

use super::schema::{parse_body, FieldKind, RequestSchema, SchemaError};
use crate::{ApiError, AppState};

const CREATE_SCHEMA: RequestSchema = RequestSchema {
    method: Method::POST,
    content: &[("playlists", FieldKind::Array)],
};

/// POST /api/indexes/playlists
///
/// Upserts every playlist in the body into the user's playlist document.
/// An empty `playlistid` is replaced with a fresh UUID. Responds 201 with
/// the playlists as stored.
pub async fn post_playlists(
    State(state): State<AppState>,
    Extension(user): Extension<AppUser>,
    method: Method,
    body: Bytes,
) -> Result<(StatusCode, Json<PlaylistsRequest>), ApiError> {
    let body = parse_body(&body)?;
    CREATE_SCHEMA.verify(&method, body.as_ref())?;

    let request: PlaylistsRequest = serde_json::from_value(body.unwrap_or_default())
        .map_err(|e| SchemaError::InvalidBody(e.to_string()))?;

    let stored: Vec<Playlist> = request
        .playlists
        .into_iter()
        .map(assign_id)
        .collect::<Result<_, _>>()?;

    let existing = state.store.get(collections::PLAYLISTS, &user.id).await?;
    let doc = merge_playlists(existing, &stored).map_err(cdmp_common::Error::from)?;

    state.store.set(collections::PLAYLISTS, &user.id, &doc).await?;
    info!("Stored {} playlist(s) for {}", stored.len(), user.id);

    Ok((
        StatusCode::CREATED,
        Json(PlaylistsRequest { playlists: stored }),
    ))
}

fn assign_id(mut playlist: Playlist) -> Result<Playlist, SchemaError> {
    if playlist.playlist_name.trim().is_empty() {
        return Err(SchemaError::InvalidBody(
            "playlist_name must not be empty".to_string(),
        ));
    }
    if playlist.playlistid.is_empty() {
        playlist.playlistid = Uuid::new_v4().to_string();
    }
    Ok(playlist)
}

/// Insert or replace `stored` in the `playlists` object of a document
///
/// A missing document, or one whose `playlists` is not an object, starts
/// from an empty object. Other top-level fields are kept.
fn merge_playlists(existing: Option<Value>, stored: &[Playlist]) -> serde_json::Result<Value> {
    let mut root = match existing {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };

    let mut entries = match root.remove("playlists") {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };
    for playlist in stored {
        entries.insert(playlist.playlistid.clone(), serde_json::to_value(playlist)?);
    }

    root.insert("playlists".to_string(), Value::Object(entries));
    Ok(Value::Object(root))
}
