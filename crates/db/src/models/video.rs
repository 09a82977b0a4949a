//! Video model, listing projections, and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vidshare_core::error::CoreError;
use vidshare_core::storage::{self, MediaLayout};
use vidshare_core::types::{DbId, Timestamp};
use vidshare_core::video::{TranscodeStatus, Visibility};

/// A row from the `videos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Video {
    pub id: DbId,
    pub watch_id: Option<String>,
    pub channel_id: DbId,
    pub category_id: Option<DbId>,
    /// Poster set, once posters have been generated.
    pub image_set_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    #[sqlx(try_from = "String")]
    pub visibility: Visibility,
    #[sqlx(try_from = "String")]
    pub transcode_status: TranscodeStatus,
    pub published: bool,
    pub views: i64,
    pub job_id: Option<String>,
    pub subs_notified: bool,
    pub created_at: Timestamp,
}

impl Video {
    /// Storage keys of the HLS playlists, given the owning channel's public id.
    pub fn playlist_keys(&self, channel_public_id: &str) -> Result<Vec<String>, CoreError> {
        storage::playlist_keys(channel_public_id, self.watch_id.as_deref())
    }

    /// Public URLs of the HLS playlists, highest quality first.
    pub fn playlist_urls(
        &self,
        layout: &MediaLayout,
        channel_public_id: &str,
    ) -> Result<Vec<String>, CoreError> {
        Ok(self
            .playlist_keys(channel_public_id)?
            .iter()
            .map(|key| layout.video_url(key))
            .collect())
    }
}

/// A published video annotated with the counts used for ranking.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RankedVideo {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub video: Video,
    pub like_count: i64,
    pub sub_count: i64,
}

/// A search hit with its combined relevance score.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScoredVideo {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub video: Video,
    pub score: f64,
}

/// DTO for creating a video record for a fresh upload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateVideo {
    pub channel_id: DbId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub visibility: Option<Visibility>,
}

/// DTO for editing a video. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateVideo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub visibility: Option<Visibility>,
    pub published: Option<bool>,
}
