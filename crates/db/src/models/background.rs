//! Channel background model and DTO.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vidshare_core::background::{imagemap_code, BackgroundRepeat};
use vidshare_core::storage::MediaLayout;
use vidshare_core::types::DbId;

/// A row from the `channel_backgrounds` table. At most one per channel.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChannelBackground {
    pub id: DbId,
    pub channel_id: DbId,
    /// Storage key of the desktop background image.
    pub desktop_image: Option<String>,
    #[sqlx(try_from = "String")]
    pub desktop_image_repeat: BackgroundRepeat,
    /// Height of the clickable header, in pixels. Zero disables the imagemap.
    pub header_size: i32,
    pub imagemap: Option<String>,
    pub color: String,
}

impl ChannelBackground {
    /// Sanitised imagemap markup for the header.
    pub fn map_code(&self) -> String {
        imagemap_code(self.imagemap.as_deref(), self.header_size)
    }

    pub fn desktop_image_url(&self, layout: &MediaLayout) -> Option<String> {
        self.desktop_image.as_deref().map(|key| layout.background_url(key))
    }
}

/// DTO for creating or editing a channel background. Only non-`None` fields
/// are applied to an existing background.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaveChannelBackground {
    /// File name of the desktop image, stored under the channel's key prefix.
    pub desktop_image: Option<String>,
    pub desktop_image_repeat: Option<BackgroundRepeat>,
    pub header_size: Option<i32>,
    pub imagemap: Option<String>,
    /// `#RRGGBB`; blank resets to the default colour.
    pub color: Option<String>,
}
