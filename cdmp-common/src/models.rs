//! Index and playlist records
//!
//! Index documents are stored verbatim as JSON; these types describe the
//! shapes the server writes and the client reads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Document collections, one document per user id in each
pub mod collections {
    pub const FILES: &str = "index-files";
    pub const ALBUMS: &str = "index-album";
    pub const ARTISTS: &str = "index-artist";
    pub const PLAYLISTS: &str = "index-playlist";
}

/// Tag metadata for one indexed file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMetadata {
    #[serde(default)]
    pub song_title: String,
    #[serde(default)]
    pub song_artist: String,
    #[serde(default)]
    pub song_album: String,
}

/// One entry of the files index, keyed by drive file id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexFile {
    pub id: String,
    pub file_metadata: FileMetadata,
}

/// Response of `GET /api/indexes/files`
///
/// Entries are kept as raw JSON so that document order survives and unknown
/// fields are not dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilesIndex {
    #[serde(default)]
    pub files: Map<String, Value>,
}

impl FilesIndex {
    /// Decode every entry in document order
    pub fn entries(&self) -> crate::Result<Vec<IndexFile>> {
        self.files
            .values()
            .map(|v| serde_json::from_value(v.clone()).map_err(crate::Error::from))
            .collect()
    }
}

/// A user playlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    /// Empty on creation requests; the server assigns one
    #[serde(default)]
    pub playlistid: String,
    pub playlist_name: String,
    #[serde(default)]
    pub playlist_tracks: Vec<String>,
}

/// Body of `POST /api/indexes/playlists`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistsRequest {
    pub playlists: Vec<Playlist>,
}
