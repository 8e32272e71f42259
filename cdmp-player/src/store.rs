//! Playback store: dispatches actions onto a `PlaybackState`
//!
//! The store owns the state, the stream token, and the random source used
//! by shuffle. Consumers receive the store explicitly; there is no global.

use crate::state::PlaybackState;
use crate::types::{PlaySong, PlayStatus, QueueItem};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Every mutation the store accepts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum PlayerAction {
    SetPlayStatus(PlayStatus),
    SetNowPlayingUrl(String),
    SetVolume(u8),
    SetQueue(Vec<QueueItem>),
    SetSongTitleLabel(String),
    SetSongArtistLabel(String),
    SetSongAlbumArtUrl(String),
    SetIsLoadingSong(bool),
    SetIsLoop(bool),
    SetIsShuffle(bool),
    TogglePlay,
    PrevSong,
    NextSong,
    PlaySong(PlaySong),
    StopSong,
    AddToQueue(QueueItem),
    PlayNext(QueueItem),
    ChangeSongInQueue(String),
    RemoveFromQueue(String),
}

/// Apply an action to a state value, returning the new state
///
/// `pick_random` is only consulted by `NextSong` in shuffle mode.
pub fn reduce<F>(
    mut state: PlaybackState,
    action: PlayerAction,
    token: &str,
    pick_random: F,
) -> PlaybackState
where
    F: FnOnce(usize) -> usize,
{
    apply(&mut state, action, token, pick_random);
    state
}

fn apply<F>(state: &mut PlaybackState, action: PlayerAction, token: &str, pick_random: F)
where
    F: FnOnce(usize) -> usize,
{
    match action {
        PlayerAction::SetPlayStatus(status) => state.set_play_status(status),
        PlayerAction::SetNowPlayingUrl(url) => state.set_now_playing_url(url),
        PlayerAction::SetVolume(volume) => state.set_volume(volume),
        PlayerAction::SetQueue(queue) => state.set_queue(queue),
        PlayerAction::SetSongTitleLabel(label) => state.set_song_title_label(label),
        PlayerAction::SetSongArtistLabel(label) => state.set_song_artist_label(label),
        PlayerAction::SetSongAlbumArtUrl(url) => state.set_song_album_art_url(url),
        PlayerAction::SetIsLoadingSong(loading) => state.set_is_loading_song(loading),
        PlayerAction::SetIsLoop(is_loop) => state.set_is_loop(is_loop),
        PlayerAction::SetIsShuffle(is_shuffle) => state.set_is_shuffle(is_shuffle),
        PlayerAction::TogglePlay => state.toggle_play(),
        PlayerAction::PrevSong => state.prev_song(),
        PlayerAction::NextSong => state.next_song(pick_random),
        PlayerAction::PlaySong(song) => state.play_song(token, &song),
        PlayerAction::StopSong => state.stop_song(),
        PlayerAction::AddToQueue(item) => state.add_to_queue(item),
        PlayerAction::PlayNext(item) => {
            state.play_next(item);
        }
        PlayerAction::ChangeSongInQueue(item_id) => {
            state.change_song_in_queue(&item_id);
        }
        PlayerAction::RemoveFromQueue(item_id) => {
            state.remove_from_queue(&item_id, pick_random);
        }
    }
}

/// Single-writer playback store
pub struct PlayerStore<R = StdRng> {
    state: PlaybackState,
    token: String,
    rng: R,
}

impl PlayerStore<StdRng> {
    /// Store with an entropy-seeded random source
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_rng(token, StdRng::from_entropy())
    }
}

impl<R: Rng> PlayerStore<R> {
    /// Store with a caller-supplied random source
    pub fn with_rng(token: impl Into<String>, rng: R) -> Self {
        Self {
            state: PlaybackState::new(),
            token: token.into(),
            rng,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Token embedded into stream URLs
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Apply one action; runs to completion before returning
    pub fn dispatch(&mut self, action: PlayerAction) {
        let rng = &mut self.rng;
        apply(&mut self.state, action, &self.token, |len| rng.gen_range(0..len));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdmp_common::stream::stream_url;

    fn item(i: usize) -> QueueItem {
        QueueItem {
            item_id: format!("q{}", i),
            playing_url: stream_url("tok", &format!("f{}", i)),
            song_title: format!("Song {}", i),
            song_artist: "Artist".to_string(),
            current: false,
        }
    }

    #[test]
    fn test_reduce_is_a_pure_transition() {
        let start = PlaybackState::new();
        let queued = reduce(start.clone(), PlayerAction::SetQueue(vec![item(0), item(1)]), "tok", |_| 0);
        let playing = reduce(queued.clone(), PlayerAction::TogglePlay, "tok", |_| 0);

        assert!(start.queue.is_empty());
        assert_eq!(queued.play_status, PlayStatus::Stopped);
        assert_eq!(playing.play_status, PlayStatus::Playing);
        assert_eq!(playing.current_index(), Some(0));
    }

    #[test]
    fn test_dispatch_play_song_uses_store_token() {
        let mut store = PlayerStore::with_rng("secret", StdRng::seed_from_u64(7));
        store.dispatch(PlayerAction::PlaySong(PlaySong {
            id: "f9".to_string(),
            title: "T".to_string(),
            artist: "A".to_string(),
        }));
        assert_eq!(store.state().now_playing_url, stream_url("secret", "f9"));
    }

    #[test]
    fn test_dispatch_shuffle_stays_in_bounds() {
        let mut store = PlayerStore::with_rng("tok", StdRng::seed_from_u64(42));
        store.dispatch(PlayerAction::SetQueue((0..5).map(item).collect()));
        store.dispatch(PlayerAction::SetIsShuffle(true));
        store.dispatch(PlayerAction::TogglePlay);

        for _ in 0..50 {
            store.dispatch(PlayerAction::NextSong);
            let index = store.state().current_index().unwrap();
            assert!(index < 5);
        }
    }

    #[test]
    fn test_action_wire_format() {
        let json = serde_json::to_value(PlayerAction::SetVolume(40)).unwrap();
        assert_eq!(json["type"], "set_volume");
        assert_eq!(json["payload"], 40);

        let action: PlayerAction = serde_json::from_value(serde_json::json!({"type": "toggle_play"})).unwrap();
        assert_eq!(action, PlayerAction::TogglePlay);
    }
}
