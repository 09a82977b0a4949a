//! Storage key conventions for video files, posters, and channel backgrounds.
//!
//! Keys are relative to a storage root. Transfer to and deletion from the CDN
//! belong to the storage backend; this module only builds the keys and the
//! public URLs they are served from.

use crate::error::CoreError;

/// HLS playlists produced by the transcoder, highest quality first.
pub const PLAYLIST_RENDITIONS: &[&str] = &["480p.m3u8", "360p.m3u8"];

/// Sub-directory (and URL segment) for video files.
pub const VIDEOS_DIR: &str = "videos";

/// Sub-directory (and URL segment) for poster images.
pub const POSTERS_DIR: &str = "posters";

/// Sub-directory (and URL segment) for channel backgrounds.
pub const BACKGROUNDS_DIR: &str = "backgrounds";

/// Key prefix for a video: `{channel_id}/{watch_id}/`, or the file inside it.
///
/// Fails with [`CoreError::InvalidState`] when the video has no watch id yet.
pub fn video_location(
    channel_id: &str,
    watch_id: Option<&str>,
    filename: Option<&str>,
) -> Result<String, CoreError> {
    let watch_id = match watch_id {
        Some(id) if !id.is_empty() => id,
        _ => {
            return Err(CoreError::InvalidState(
                "Video has no watch id; storage location is undefined".into(),
            ))
        }
    };
    if channel_id.is_empty() {
        return Err(CoreError::InvalidState(
            "Channel has no public id; storage location is undefined".into(),
        ));
    }

    Ok(match filename {
        Some(name) => format!("{channel_id}/{watch_id}/{name}"),
        None => format!("{channel_id}/{watch_id}/"),
    })
}

/// Key prefix for a channel background: `{channel_id}/`, or the file inside it.
pub fn background_location(channel_id: &str, filename: Option<&str>) -> String {
    match filename {
        Some(name) => format!("{channel_id}/{name}"),
        None => format!("{channel_id}/"),
    }
}

/// Keys of every HLS playlist rendition of a video.
pub fn playlist_keys(channel_id: &str, watch_id: Option<&str>) -> Result<Vec<String>, CoreError> {
    PLAYLIST_RENDITIONS
        .iter()
        .map(|name| video_location(channel_id, watch_id, Some(name)))
        .collect()
}

/// Served when a video has no poster thumbnail yet.
pub const DEFAULT_THUMBNAIL_PATH: &str = "/static/web/img/thumbnail_default.jpg";

/// Public media URL the storage keys hang off.
#[derive(Debug, Clone)]
pub struct MediaLayout {
    base_url: String,
}

impl MediaLayout {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Public URL of a video storage key.
    pub fn video_url(&self, key: &str) -> String {
        format!("{}/{VIDEOS_DIR}/{key}", self.base_url)
    }

    /// Public URL of a poster storage key.
    pub fn poster_url(&self, key: &str) -> String {
        format!("{}/{POSTERS_DIR}/{key}", self.base_url)
    }

    /// Thumbnail URL, or [`DEFAULT_THUMBNAIL_PATH`] when there is none.
    pub fn thumbnail_url(&self, key: Option<&str>) -> String {
        match key {
            Some(key) if !key.is_empty() => self.poster_url(key),
            _ => DEFAULT_THUMBNAIL_PATH.to_string(),
        }
    }

    pub fn background_url(&self, key: &str) -> String {
        format!("{}/{BACKGROUNDS_DIR}/{key}", self.base_url)
    }
}
