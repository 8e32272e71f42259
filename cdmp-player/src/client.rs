//! HTTP client for the index API

use crate::error::{Error, Result};
use cdmp_common::api::types::{ErrorResponse, MessageResponse};
use cdmp_common::models::{FilesIndex, Playlist, PlaylistsRequest};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

/// Response of `POST /api/indexes/playlists`
#[derive(Debug, Deserialize)]
struct CreatedPlaylists {
    playlists: Vec<Playlist>,
}

/// Bearer-authenticated client for `/api/indexes/*`
#[derive(Clone)]
pub struct IndexClient {
    http: Client,
    base_url: String,
    token: String,
}

impl IndexClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// GET /api/indexes/files
    pub async fn fetch_files(&self) -> Result<FilesIndex> {
        self.get_json("/api/indexes/files").await
    }

    /// GET /api/indexes/albums
    pub async fn fetch_albums(&self) -> Result<Map<String, Value>> {
        let doc: Value = self.get_json("/api/indexes/albums").await?;
        Ok(object_field(doc, "albums"))
    }

    /// GET /api/indexes/artists
    pub async fn fetch_artists(&self) -> Result<Map<String, Value>> {
        let doc: Value = self.get_json("/api/indexes/artists").await?;
        Ok(object_field(doc, "artists"))
    }

    /// GET /api/indexes/playlist/:playlist_id
    ///
    /// `Ok(None)` when the user has no playlists at all: the server answers
    /// that case with the empty collection rather than a 404.
    pub async fn fetch_playlist(&self, playlist_id: &str) -> Result<Option<Playlist>> {
        let doc: Value = self
            .get_json(&format!("/api/indexes/playlist/{}", playlist_id))
            .await?;
        if is_empty_collection(&doc, "playlists") {
            return Ok(None);
        }
        let playlist = serde_json::from_value(doc).map_err(cdmp_common::Error::from)?;
        Ok(Some(playlist))
    }

    /// POST /api/indexes/playlists with a single new playlist
    pub async fn create_playlist(&self, name: &str, tracks: Vec<String>) -> Result<Playlist> {
        let body = PlaylistsRequest {
            playlists: vec![Playlist {
                playlistid: String::new(),
                playlist_name: name.to_string(),
                playlist_tracks: tracks,
            }],
        };

        let request = self
            .authorized(self.http.post(self.url("/api/indexes/playlists")))
            .json(&body);
        let created: CreatedPlaylists = decode(request.send().await?).await?;

        created
            .playlists
            .into_iter()
            .next()
            .ok_or_else(|| Error::Status {
                status: 500,
                message: "server returned no playlist".to_string(),
            })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!("GET {}", path);
        let response = self.authorized(self.http.get(self.url(path))).send().await?;
        decode(response).await
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.token)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Decode a success body, or turn an error body into `Error::Status`
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<MessageResponse>(&text)
        .map(|m| m.message)
        .or_else(|_| serde_json::from_str::<ErrorResponse>(&text).map(|e| e.error))
        .unwrap_or(text);

    Err(Error::Status {
        status: status.as_u16(),
        message,
    })
}

/// `{ <field>: {} }` and nothing else
fn is_empty_collection(doc: &Value, field: &str) -> bool {
    match doc.as_object() {
        Some(map) => {
            map.len() == 1
                && map
                    .get(field)
                    .and_then(Value::as_object)
                    .is_some_and(Map::is_empty)
        }
        None => false,
    }
}

fn object_field(doc: Value, field: &str) -> Map<String, Value> {
    match doc {
        Value::Object(mut map) => match map.remove(field) {
            Some(Value::Object(inner)) => inner,
            _ => Map::new(),
        },
        _ => Map::new(),
    }
}
