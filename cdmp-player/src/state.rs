//! Playback state and its transitions
//!
//! `PlaybackState` is a plain value. Every transition is a method that runs
//! to completion and never fails: an action whose precondition does not hold
//! (empty queue, song still loading) leaves the state untouched.
//!
//! Invariant: at most one queue item has `current == true`, and when one
//! does, `now_playing_url` is that item's URL.

use crate::queue::{self, mark_current};
use crate::types::{PlaySong, PlayStatus, QueueItem};
use cdmp_common::stream::stream_url;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Cover shown until a song provides its own art
pub const DEFAULT_ALBUM_ART_URL: &str = "/images/example-song-cover.png";

/// Maximum volume
pub const MAX_VOLUME: u8 = 100;

/// Client playback state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub play_status: PlayStatus,
    pub now_playing_url: String,
    /// 0..=100
    pub volume: u8,
    pub queue: Vec<QueueItem>,
    pub song_title_label: String,
    pub song_artist_label: String,
    pub song_album_art_url: String,
    pub is_loading_song: bool,
    pub is_loop: bool,
    pub is_shuffle: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            play_status: PlayStatus::Stopped,
            now_playing_url: String::new(),
            volume: MAX_VOLUME,
            queue: Vec::new(),
            song_title_label: String::new(),
            song_artist_label: String::new(),
            song_album_art_url: DEFAULT_ALBUM_ART_URL.to_string(),
            is_loading_song: false,
            is_loop: false,
            is_shuffle: false,
        }
    }
}

impl PlaybackState {
    /// Fresh state: empty queue, STOPPED
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the current queue item
    pub fn current_index(&self) -> Option<usize> {
        self.queue.iter().position(|item| item.current)
    }

    /// The current queue item
    pub fn current_item(&self) -> Option<&QueueItem> {
        self.queue.iter().find(|item| item.current)
    }

    // ---- setters ----

    pub fn set_play_status(&mut self, status: PlayStatus) {
        self.play_status = status;
    }

    pub fn set_now_playing_url(&mut self, url: impl Into<String>) {
        self.now_playing_url = url.into();
    }

    /// Set volume, clamped to 100
    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(MAX_VOLUME);
    }

    /// Replace the queue wholesale
    pub fn set_queue(&mut self, queue: Vec<QueueItem>) {
        debug!("Queue replaced ({} items)", queue.len());
        self.queue = queue;
    }

    pub fn set_song_title_label(&mut self, label: impl Into<String>) {
        self.song_title_label = label.into();
    }

    pub fn set_song_artist_label(&mut self, label: impl Into<String>) {
        self.song_artist_label = label.into();
    }

    pub fn set_song_album_art_url(&mut self, url: impl Into<String>) {
        self.song_album_art_url = url.into();
    }

    pub fn set_is_loading_song(&mut self, loading: bool) {
        self.is_loading_song = loading;
    }

    pub fn set_is_loop(&mut self, is_loop: bool) {
        self.is_loop = is_loop;
    }

    pub fn set_is_shuffle(&mut self, is_shuffle: bool) {
        self.is_shuffle = is_shuffle;
    }

    // ---- transitions ----

    /// Play/pause toggle
    ///
    /// From STOPPED or PAUSED with nothing loaded, the first queue item is
    /// loaded; an empty queue makes this a no-op. While a song is loading
    /// nothing happens.
    pub fn toggle_play(&mut self) {
        if self.is_loading_song {
            return;
        }

        if self.play_status == PlayStatus::Playing {
            self.play_status = PlayStatus::Paused;
            debug!("Paused");
            return;
        }

        if self.now_playing_url.is_empty() {
            if self.queue.is_empty() {
                return;
            }
            self.load_queue_item(0);
        }

        self.play_status = PlayStatus::Playing;
        debug!("Playing {}", self.now_playing_url);
    }

    /// Move to the previous queue item, wrapping to the end
    pub fn prev_song(&mut self) {
        if let Some(index) = queue::resolve_prev_index(&self.queue) {
            self.load_queue_item(index);
            self.play_status = PlayStatus::Playing;
            debug!("Previous -> queue index {}", index);
        }
    }

    /// Move to the next queue item
    ///
    /// `pick_random` receives the queue length and must return an index
    /// below it; it is only consulted in shuffle mode.
    pub fn next_song<F>(&mut self, pick_random: F)
    where
        F: FnOnce(usize) -> usize,
    {
        if let Some(index) =
            queue::resolve_next_index(&self.queue, self.is_loop, self.is_shuffle, pick_random)
        {
            self.load_queue_item(index);
            self.play_status = PlayStatus::Playing;
            debug!("Next -> queue index {}", index);
        }
    }

    /// Play a song directly by drive file id; the queue is left alone
    pub fn play_song(&mut self, token: &str, song: &PlaySong) {
        self.now_playing_url = stream_url(token, &song.id);
        self.song_title_label = song.title.clone();
        self.song_artist_label = song.artist.clone();
        self.play_status = PlayStatus::Playing;
        debug!("Playing song {}", song.id);
    }

    pub fn stop_song(&mut self) {
        self.play_status = PlayStatus::Stopped;
    }

    /// Append an item to the end of the queue
    pub fn add_to_queue(&mut self, mut item: QueueItem) {
        item.current = false;
        self.queue.push(item);
    }

    /// Insert an item right after the now-playing song
    ///
    /// Returns false, leaving the queue unchanged, when the now-playing song
    /// is not in the queue.
    pub fn play_next(&mut self, mut item: QueueItem) -> bool {
        let Some(index) = queue::position_of_now_playing(&self.queue, &self.now_playing_url) else {
            return false;
        };
        item.current = false;
        self.queue.insert(index + 1, item);
        true
    }

    /// Jump to the queue item with `item_id`
    ///
    /// Returns false when no such item exists or it is already current.
    pub fn change_song_in_queue(&mut self, item_id: &str) -> bool {
        let Some(index) = self.queue.iter().position(|item| item.item_id == item_id) else {
            return false;
        };
        if self.queue[index].current {
            return false;
        }
        self.load_queue_item(index);
        self.play_status = PlayStatus::Playing;
        true
    }

    /// Remove the queue item with `item_id`
    ///
    /// Removing the current item first moves playback on: a one-item queue
    /// stops, otherwise the next item is loaded with loop ignored so that
    /// playback never stays on the removed item.
    pub fn remove_from_queue<F>(&mut self, item_id: &str, pick_random: F) -> bool
    where
        F: FnOnce(usize) -> usize,
    {
        let Some(index) = self.queue.iter().position(|item| item.item_id == item_id) else {
            return false;
        };

        if self.queue[index].current {
            if self.queue.len() == 1 {
                self.stop_song();
            } else if let Some(next) =
                queue::resolve_next_index(&self.queue, false, self.is_shuffle, pick_random)
            {
                self.load_queue_item(next);
                self.play_status = PlayStatus::Playing;
            }
        }

        self.queue.remove(index);
        true
    }

    /// Point now-playing at queue item `index` and make it the only current one
    fn load_queue_item(&mut self, index: usize) {
        mark_current(&mut self.queue, index);
        let item = &self.queue[index];
        self.now_playing_url = item.playing_url.clone();
        self.song_title_label = item.song_title.clone();
        self.song_artist_label = item.song_artist.clone();
    }
}
