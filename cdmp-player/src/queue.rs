//! Queue navigation and queue building
//!
//! Index resolution for next/previous is kept free of the store so that it
//! can be tested without a random source.

use crate::types::QueueItem;
use cdmp_common::models::IndexFile;
use cdmp_common::stream::{file_id_from_stream_url, stream_url};

/// Resolve the index `next` should move to
///
/// With the current item at `i` and `i` not the last index:
/// - loop only: stay on `i`
/// - shuffle only: `pick_random(len)`, or `i + 1` when the pick equals `i`
/// - neither: `i + 1`
/// - both: loop wins, stay on `i`
///
/// When the current item is last, or no item is current, the result is 0.
/// With several items flagged, `i` is the last flagged index below the final
/// one. Returns `None` for an empty queue.
pub fn resolve_next_index<F>(
    queue: &[QueueItem],
    is_loop: bool,
    is_shuffle: bool,
    pick_random: F,
) -> Option<usize>
where
    F: FnOnce(usize) -> usize,
{
    if queue.is_empty() {
        return None;
    }

    // Last flagged item before the final index; flags on the final index
    // alone wrap to 0
    let last = queue.len() - 1;
    let Some(current) = queue[..last].iter().rposition(|item| item.current) else {
        return Some(0);
    };

    let next = match (is_loop, is_shuffle) {
        (false, false) => current + 1,
        (false, true) => {
            let picked = pick_random(queue.len());
            if picked == current {
                current + 1
            } else {
                picked
            }
        }
        // Loop wins when shuffle is also on
        (true, _) => current,
    };

    Some(next)
}

/// Resolve the index `previous` should move to
///
/// The item before the current one, or the last index when the current item
/// is first or no item is current. With several items flagged, the earliest
/// flagged index above 0 is used. Returns `None` for an empty queue.
pub fn resolve_prev_index(queue: &[QueueItem]) -> Option<usize> {
    if queue.is_empty() {
        return None;
    }

    // Position within the skipped iterator is the predecessor's index
    let prev = queue
        .iter()
        .skip(1)
        .position(|item| item.current)
        .unwrap_or(queue.len() - 1);

    Some(prev)
}

/// Clear every current flag and set the one at `index`
pub fn mark_current(queue: &mut [QueueItem], index: usize) {
    for (i, item) in queue.iter_mut().enumerate() {
        item.current = i == index;
    }
}

/// Position of the item playing `now_playing_url`, matched by drive file id
pub fn position_of_now_playing(queue: &[QueueItem], now_playing_url: &str) -> Option<usize> {
    let file_id = file_id_from_stream_url(now_playing_url)?;
    queue
        .iter()
        .position(|item| file_id_from_stream_url(&item.playing_url) == Some(file_id))
}

/// Build a fresh queue item for a song added by the user
///
/// The id carries a millisecond timestamp so repeated insertions of the same
/// file stay distinct.
pub fn new_queue_item(token: &str, file: &IndexFile) -> QueueItem {
    QueueItem {
        item_id: format!(
            "queue_item_{}{}",
            file.id,
            chrono::Utc::now().timestamp_millis()
        ),
        playing_url: stream_url(token, &file.id),
        song_title: file.file_metadata.song_title.clone(),
        song_artist: file.file_metadata.song_artist.clone(),
        current: false,
    }
}

/// Queue of every indexed file, with `selected_id` marked current
pub fn library_queue(files: &[IndexFile], selected_id: &str, token: &str) -> Vec<QueueItem> {
    files
        .iter()
        .map(|file| QueueItem {
            item_id: format!("queue_item_{}", file.id),
            playing_url: stream_url(token, &file.id),
            song_title: file.file_metadata.song_title.clone(),
            song_artist: file.file_metadata.song_artist.clone(),
            current: file.id == selected_id,
        })
        .collect()
}

/// Queue of a playlist's tracks, skipping ids missing from the files index
pub fn playlist_queue(files: &[IndexFile], track_ids: &[String], token: &str) -> Vec<QueueItem> {
    track_ids
        .iter()
        .enumerate()
        .filter_map(|(position, id)| {
            let file = files.iter().find(|f| &f.id == id)?;
            Some(QueueItem {
                item_id: format!("queue_item_{}_{}", file.id, position),
                playing_url: stream_url(token, &file.id),
                song_title: file.file_metadata.song_title.clone(),
                song_artist: file.file_metadata.song_artist.clone(),
                current: false,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdmp_common::models::FileMetadata;

    fn queue(len: usize, current: Option<usize>) -> Vec<QueueItem> {
        (0..len)
            .map(|i| QueueItem {
                item_id: format!("q{}", i),
                playing_url: stream_url("tok", &format!("f{}", i)),
                song_title: format!("Song {}", i),
                song_artist: "Artist".to_string(),
                current: current == Some(i),
            })
            .collect()
    }

    fn file(id: &str) -> IndexFile {
        IndexFile {
            id: id.to_string(),
            file_metadata: FileMetadata {
                song_title: format!("Title {}", id),
                song_artist: "Artist".to_string(),
                song_album: String::new(),
            },
        }
    }

    #[test]
    fn test_next_plain_advances() {
        assert_eq!(resolve_next_index(&queue(3, Some(0)), false, false, |_| 0), Some(1));
        assert_eq!(resolve_next_index(&queue(3, Some(1)), false, false, |_| 0), Some(2));
    }

    #[test]
    fn test_next_wraps_from_last() {
        assert_eq!(resolve_next_index(&queue(3, Some(2)), false, false, |_| 1), Some(0));
        // Loop does not hold the last item either
        assert_eq!(resolve_next_index(&queue(3, Some(2)), true, false, |_| 1), Some(0));
    }

    #[test]
    fn test_next_without_current_starts_at_zero() {
        assert_eq!(resolve_next_index(&queue(3, None), false, false, |_| 2), Some(0));
    }

    #[test]
    fn test_next_loop_repeats() {
        assert_eq!(resolve_next_index(&queue(4, Some(1)), true, false, |_| 3), Some(1));
    }

    #[test]
    fn test_next_shuffle_uses_pick() {
        assert_eq!(resolve_next_index(&queue(5, Some(1)), false, true, |_| 4), Some(4));
        assert_eq!(resolve_next_index(&queue(5, Some(1)), false, true, |_| 0), Some(0));
    }

    #[test]
    fn test_next_shuffle_pick_equal_to_current_steps_forward() {
        assert_eq!(resolve_next_index(&queue(5, Some(1)), false, true, |_| 1), Some(2));
    }

    #[test]
    fn test_next_loop_and_shuffle_loop_wins() {
        let mut called = false;
        let next = resolve_next_index(&queue(5, Some(2)), true, true, |_| {
            called = true;
            4
        });
        assert_eq!(next, Some(2));
        assert!(!called);
    }

    #[test]
    fn test_empty_queue_has_no_target() {
        assert_eq!(resolve_next_index(&[], false, false, |_| 0), None);
        assert_eq!(resolve_prev_index(&[]), None);
    }

    #[test]
    fn test_prev_steps_back_and_wraps() {
        assert_eq!(resolve_prev_index(&queue(3, Some(2))), Some(1));
        assert_eq!(resolve_prev_index(&queue(3, Some(0))), Some(2));
        assert_eq!(resolve_prev_index(&queue(3, None)), Some(2));
    }

    #[test]
    fn test_next_with_several_flags_uses_last_before_final() {
        let mut q = queue(5, Some(1));
        q[4].current = true;
        assert_eq!(resolve_next_index(&q, false, false, |_| 0), Some(2));

        let mut q = queue(5, Some(0));
        q[2].current = true;
        assert_eq!(resolve_next_index(&q, false, false, |_| 0), Some(3));
    }

    #[test]
    fn test_prev_with_several_flags_uses_earliest_after_first() {
        let mut q = queue(5, Some(0));
        q[2].current = true;
        assert_eq!(resolve_prev_index(&q), Some(1));

        let mut q = queue(5, Some(3));
        q[4].current = true;
        assert_eq!(resolve_prev_index(&q), Some(2));
    }

    #[test]
    fn test_mark_current_leaves_one_flag() {
        let mut q = queue(4, Some(0));
        q[3].current = true;
        mark_current(&mut q, 2);
        let flagged: Vec<usize> = (0..4).filter(|&i| q[i].current).collect();
        assert_eq!(flagged, vec![2]);
    }

    #[test]
    fn test_position_of_now_playing_matches_file_id() {
        let q = queue(3, None);
        // Token differs; only the file id is compared
        let url = stream_url("other-token", "f2");
        assert_eq!(position_of_now_playing(&q, &url), Some(2));
        assert_eq!(position_of_now_playing(&q, ""), None);
    }

    #[test]
    fn test_library_queue_marks_selection() {
        let files = vec![file("a"), file("b"), file("c")];
        let q = library_queue(&files, "b", "tok");
        assert_eq!(q.len(), 3);
        assert_eq!(q[0].item_id, "queue_item_a");
        assert!(!q[0].current && q[1].current && !q[2].current);
        assert_eq!(q[1].playing_url, stream_url("tok", "b"));
        assert_eq!(q[1].song_title, "Title b");
    }

    #[test]
    fn test_playlist_queue_skips_unknown_tracks() {
        let files = vec![file("a"), file("b")];
        let tracks = vec!["b".to_string(), "missing".to_string(), "a".to_string(), "b".to_string()];
        let q = playlist_queue(&files, &tracks, "tok");
        let titles: Vec<&str> = q.iter().map(|i| i.song_title.as_str()).collect();
        assert_eq!(titles, vec!["Title b", "Title a", "Title b"]);
        assert_ne!(q[0].item_id, q[2].item_id);
    }

    #[test]
    fn test_new_queue_item_is_not_current() {
        let item = new_queue_item("tok", &file("a"));
        assert!(item.item_id.starts_with("queue_item_a"));
        assert!(!item.current);
    }
}
