//! Ordering operations on the watch list. Each one returns a fresh list and
//! leaves its input untouched.

use crate::core::{Host, VideoEntry};

pub fn contains(list: &[VideoEntry], host: Host, id: &str) -> bool {
    list.iter().any(|entry| entry.is(host, id))
}

pub fn append(list: &[VideoEntry], entry: VideoEntry) -> Vec<VideoEntry> {
    let mut next = list.to_vec();
    next.push(entry);
    next
}

pub fn remove(list: &[VideoEntry], host: Host, id: &str) -> Vec<VideoEntry> {
    list.iter()
        .filter(|entry| !entry.is(host, id))
        .cloned()
        .collect()
}

/// Moves an entry to `target`. Moving above the top wraps to the end and
/// moving past the end wraps to the front, so arrow-key reordering cycles.
/// Unknown entries leave the order as it was.
pub fn reorder(list: &[VideoEntry], host: Host, id: &str, target: isize) -> Vec<VideoEntry> {
    let Some(entry) = list.iter().find(|entry| entry.is(host, id)).cloned() else {
        return list.to_vec();
    };

    let mut next = remove(list, host, id);
    let index = if target < 0 {
        next.len()
    } else if target as usize >= list.len() {
        0
    } else {
        (target as usize).min(next.len())
    };
    next.insert(index, entry);
    next
}

/// First entry that has a chat to show.
pub fn first_chat(list: &[VideoEntry]) -> Option<&VideoEntry> {
    list.iter().find(|entry| entry.livestream_chat)
}
