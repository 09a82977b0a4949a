//! Poster image set models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vidshare_core::storage::MediaLayout;
use vidshare_core::types::{DbId, Timestamp};

/// A row from the `image_sets` table: the posters generated for one video.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ImageSet {
    pub id: DbId,
    pub primary_image_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// A row from the `images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Image {
    pub id: DbId,
    pub image_set_id: DbId,
    pub video_id: DbId,
    /// Storage key of the full-size poster.
    pub image_key: String,
    /// Storage key of the 320x180 thumbnail, once it has been rendered.
    pub thumbnail_key: Option<String>,
    pub created_at: Timestamp,
}

impl Image {
    pub fn poster_url(&self, layout: &MediaLayout) -> String {
        layout.poster_url(&self.image_key)
    }

    /// Thumbnail URL, falling back to the default thumbnail.
    pub fn thumbnail_url(&self, layout: &MediaLayout) -> String {
        layout.thumbnail_url(self.thumbnail_key.as_deref())
    }
}

/// A poster file produced for a video, with its optional thumbnail.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPoster {
    pub file_name: String,
    pub thumbnail_file_name: Option<String>,
}
