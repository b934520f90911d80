//! Deterministic title hashing for video selection.

/// Hashes a title with the `h = h * 31 + unit` recurrence over its UTF-16
/// code units, wrapping at 32-bit signed overflow.
///
/// The value must stay stable across releases: stored requests and retries
/// rely on the same title always selecting the same video.
#[must_use]
pub fn title_hash(title: &str) -> i32 {
    title.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    })
}

/// Maps a title onto an index in `0..len`. `len` must be non-zero.
#[must_use]
pub fn pick_index(title: &str, len: usize) -> usize {
    debug_assert!(len > 0, "pick_index called with an empty list");
    title_hash(title).unsigned_abs() as usize % len
}
