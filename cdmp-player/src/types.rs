//! Core types for the playback store

use serde::{Deserialize, Serialize};
use std::fmt;

/// Play status of the audio element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayStatus {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl fmt::Display for PlayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayStatus::Stopped => write!(f, "STOPPED"),
            PlayStatus::Playing => write!(f, "PLAYING"),
            PlayStatus::Paused => write!(f, "PAUSED"),
        }
    }
}

/// One entry of the play queue
///
/// `item_id` is unique per insertion, so the same song can sit in the queue
/// more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueItem {
    pub item_id: String,
    #[serde(rename = "playingURL")]
    pub playing_url: String,
    pub song_title: String,
    pub song_artist: String,
    #[serde(default)]
    pub current: bool,
}

/// Payload of the play-song action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaySong {
    /// Drive file id
    pub id: String,
    pub title: String,
    pub artist: String,
}
