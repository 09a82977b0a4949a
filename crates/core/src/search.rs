//! Full-text and trigram search constants and query helpers.
//!
//! The score of a video is `(ts_rank + similarity) / 2`, where `similarity`
//! sums the trigram similarity of the title, description and channel name.

/// Text search configuration used for vectors and queries.
pub const TS_CONFIG: &str = "english";

/// tsvector weight for video titles (highest priority).
pub const WEIGHT_TITLE: char = 'A';

/// tsvector weight for video descriptions.
pub const WEIGHT_DESCRIPTION: char = 'B';

/// tsvector weight for the owning channel's name.
pub const WEIGHT_CHANNEL_NAME: char = 'C';

/// Results scoring at or below this value are dropped.
pub const MIN_SEARCH_SCORE: f64 = 0.1;

/// Default number of search results per page.
pub const DEFAULT_SEARCH_LIMIT: i64 = 20;

/// Maximum number of search results per page.
pub const MAX_SEARCH_LIMIT: i64 = 100;

/// Normalise raw user input into search terms.
///
/// - Splits on whitespace.
/// - Strips non-alphanumeric characters (except `_`) from the ends of each term.
/// - Drops empty terms and joins the rest with single spaces.
///
/// Returns `None` if the input yields no usable terms.
///
/// # Examples
///
/// ```
/// use vidshare_core::search::normalize_query;
/// assert_eq!(normalize_query("  cats   & dogs! "), Some("cats dogs".to_string()));
/// assert_eq!(normalize_query("?!"), None);
/// ```
pub fn normalize_query(query: &str) -> Option<String> {
    let terms: Vec<&str> = query
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric() && c != '_'))
        .filter(|t| !t.is_empty())
        .collect();

    if terms.is_empty() {
        None
    } else {
        Some(terms.join(" "))
    }
}
