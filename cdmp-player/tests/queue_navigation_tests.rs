//! Queue navigation invariants
//!
//! Property tests drive the store through random action sequences; the
//! remaining tests pin down the documented wrap-around and toggle behavior.

use cdmp_common::stream::stream_url;
use cdmp_player::{reduce, PlayStatus, PlaybackState, PlayerAction, PlayerStore, QueueItem};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ===== Helpers =====

fn item(i: usize) -> QueueItem {
    QueueItem {
        item_id: format!("queue_item_f{}", i),
        playing_url: stream_url("tok", &format!("f{}", i)),
        song_title: format!("Song {}", i),
        song_artist: format!("Artist {}", i),
        current: false,
    }
}

fn queue(len: usize) -> Vec<QueueItem> {
    (0..len).map(item).collect()
}

fn current_count(state: &PlaybackState) -> usize {
    state.queue.iter().filter(|item| item.current).count()
}

#[derive(Debug, Clone)]
enum Step {
    Next,
    Prev,
    Toggle,
    Loop(bool),
    Shuffle(bool),
    Jump(usize),
}

fn arbitrary_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => Just(Step::Next),
        3 => Just(Step::Prev),
        1 => Just(Step::Toggle),
        1 => any::<bool>().prop_map(Step::Loop),
        1 => any::<bool>().prop_map(Step::Shuffle),
        1 => (0usize..64).prop_map(Step::Jump),
    ]
}

fn action_for(step: &Step, len: usize) -> PlayerAction {
    match step {
        Step::Next => PlayerAction::NextSong,
        Step::Prev => PlayerAction::PrevSong,
        Step::Toggle => PlayerAction::TogglePlay,
        Step::Loop(on) => PlayerAction::SetIsLoop(*on),
        Step::Shuffle(on) => PlayerAction::SetIsShuffle(*on),
        Step::Jump(i) => PlayerAction::ChangeSongInQueue(format!("queue_item_f{}", i % len)),
    }
}

// ===== Property Tests =====

proptest! {
    /// Property: after any next/prev, exactly one queue item is current
    #[test]
    fn exactly_one_current_after_navigation(
        len in 1usize..20,
        seed in any::<u64>(),
        steps in prop::collection::vec(arbitrary_step(), 1..60),
    ) {
        let mut store = PlayerStore::with_rng("tok", StdRng::seed_from_u64(seed));
        store.dispatch(PlayerAction::SetQueue(queue(len)));

        for step in &steps {
            store.dispatch(action_for(step, len));
            if matches!(step, Step::Next | Step::Prev) {
                prop_assert_eq!(current_count(store.state()), 1);
                prop_assert_eq!(store.state().play_status, PlayStatus::Playing);
            }
        }
    }

    /// Property: the now-playing URL always belongs to the current item
    #[test]
    fn now_playing_matches_current_item(
        len in 1usize..20,
        seed in any::<u64>(),
        steps in prop::collection::vec(arbitrary_step(), 1..60),
    ) {
        let mut store = PlayerStore::with_rng("tok", StdRng::seed_from_u64(seed));
        store.dispatch(PlayerAction::SetQueue(queue(len)));
        store.dispatch(PlayerAction::NextSong);

        for step in &steps {
            store.dispatch(action_for(step, len));
            let state = store.state();
            let current = state.current_item().expect("a current item");
            prop_assert_eq!(&state.now_playing_url, &current.playing_url);
            prop_assert_eq!(&state.song_title_label, &current.song_title);
        }
    }

    /// Property: shuffle never selects an index outside the queue and never
    /// repeats the current item unless the queue wraps
    #[test]
    fn shuffle_next_moves_within_bounds(len in 2usize..30, start in 0usize..30, pick in 0usize..30) {
        let start = start % (len - 1);
        let pick = pick % len;

        let mut state = PlaybackState::new();
        state.set_queue(queue(len));
        state.set_is_shuffle(true);
        state.change_song_in_queue(&format!("queue_item_f{}", start));

        let next = reduce(state, PlayerAction::NextSong, "tok", |_| pick);
        let index = next.current_index().expect("a current item");
        prop_assert!(index < len);
        prop_assert_ne!(index, start);
    }

    /// Property: volume is always within range
    #[test]
    fn volume_is_clamped(volume in any::<u8>()) {
        let state = reduce(PlaybackState::new(), PlayerAction::SetVolume(volume), "tok", |_| 0);
        prop_assert!(state.volume <= 100);
    }
}

// ===== Documented behavior =====

#[test]
fn next_on_single_item_queue_reselects_it() {
    let mut state = PlaybackState::new();
    state.set_queue(queue(1));

    for _ in 0..3 {
        state.next_song(|_| 0);
        assert_eq!(state.current_index(), Some(0));
        assert_eq!(current_count(&state), 1);
    }
}

#[test]
fn prev_from_first_wraps_to_last() {
    let mut state = PlaybackState::new();
    state.set_queue(queue(5));
    state.toggle_play();
    assert_eq!(state.current_index(), Some(0));

    state.prev_song();
    assert_eq!(state.current_index(), Some(4));
    assert_eq!(state.song_title_label, "Song 4");
}

#[test]
fn toggle_on_empty_state_changes_nothing() {
    let before = PlaybackState::new();
    let after = reduce(before.clone(), PlayerAction::TogglePlay, "tok", |_| 0);
    assert_eq!(after, before);
}

#[test]
fn toggle_twice_plays_then_pauses_first_item() {
    let mut state = PlaybackState::new();
    state.set_queue(queue(3));

    state.toggle_play();
    assert_eq!(state.play_status, PlayStatus::Playing);

    state.toggle_play();
    assert_eq!(state.play_status, PlayStatus::Paused);
    assert_eq!(state.now_playing_url, stream_url("tok", "f0"));
    assert_eq!(state.song_title_label, "Song 0");
    assert_eq!(state.song_artist_label, "Artist 0");
}

#[test]
fn loop_and_shuffle_together_repeat_current() {
    let mut state = PlaybackState::new();
    state.set_queue(queue(4));
    state.set_is_loop(true);
    state.set_is_shuffle(true);
    state.change_song_in_queue("queue_item_f1");

    state.next_song(|_| 3);
    assert_eq!(state.current_index(), Some(1));
}

#[test]
fn navigation_on_empty_queue_is_a_no_op() {
    let mut state = PlaybackState::new();
    state.next_song(|_| 0);
    state.prev_song();
    assert_eq!(state, PlaybackState::new());
}
