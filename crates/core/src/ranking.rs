//! Paging and recommendation helpers for published-video listings.

use rand::Rng;

/// Default page size for video listings.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Maximum page size for video listings.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Recommendations only sample a window once more than this many videos exist.
pub const RECOMMENDATION_THRESHOLD: i64 = 25;

/// Number of videos in a recommendation window.
pub const RECOMMENDATION_WINDOW: i64 = 20;

/// Clamp a user-provided page size into `[1, max]`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// A contiguous slice of an id-ordered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: i64,
    pub limit: i64,
}

/// Pick the slice of published videos to recommend.
///
/// Returns `None` when `total` is at or below [`RECOMMENDATION_THRESHOLD`],
/// meaning every video is returned. Otherwise the window starts at a uniform
/// offset in `[0, total - 21]`.
pub fn recommendation_window<R: Rng + ?Sized>(total: i64, rng: &mut R) -> Option<Window> {
    if total <= RECOMMENDATION_THRESHOLD {
        return None;
    }
    let max_start = total - (RECOMMENDATION_WINDOW + 1);
    Some(Window {
        offset: rng.random_range(0..=max_start),
        limit: RECOMMENDATION_WINDOW,
    })
}
