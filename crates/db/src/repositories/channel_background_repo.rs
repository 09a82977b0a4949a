//! Repository for the `channel_backgrounds` table.

use sqlx::PgPool;
use vidshare_core::background::{
    normalize_color, validate_header_size, validate_imagemap, BackgroundRepeat,
};
use vidshare_core::error::CoreError;
use vidshare_core::storage::background_location;
use vidshare_core::types::DbId;

use crate::error::DbResult;
use crate::models::background::{ChannelBackground, SaveChannelBackground};

/// Column list for `channel_backgrounds` queries.
const COLUMNS: &str = "id, channel_id, desktop_image, desktop_image_repeat, header_size, \
                       imagemap, color";

/// Provides operations for channel page backgrounds.
pub struct ChannelBackgroundRepo;

impl ChannelBackgroundRepo {
    /// Create the channel's background, or apply the non-`None` fields of
    /// `input` to the existing one.
    ///
    /// A new desktop image file name is stored as a key under the channel's
    /// storage prefix.
    pub async fn save(
        pool: &PgPool,
        channel_id: DbId,
        input: &SaveChannelBackground,
    ) -> DbResult<ChannelBackground> {
        if let Some(size) = input.header_size {
            validate_header_size(size)?;
        }
        if let Some(imagemap) = &input.imagemap {
            validate_imagemap(imagemap)?;
        }
        let color = input
            .color
            .as_deref()
            .map(|c| normalize_color(Some(c)))
            .transpose()?;

        let public_id: String = sqlx::query_scalar("SELECT public_id FROM channels WHERE id = $1")
            .bind(channel_id)
            .fetch_optional(pool)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "channel",
                id: channel_id,
            })?;
        let desktop_image = input
            .desktop_image
            .as_deref()
            .map(|name| background_location(&public_id, Some(name)));

        let query = format!(
            "INSERT INTO channel_backgrounds \
                (channel_id, desktop_image, desktop_image_repeat, header_size, imagemap, color) \
             VALUES ($1, $2, COALESCE($3, 'NR'), COALESCE($4, 0), $5, COALESCE($6, '#CCCCCC')) \
             ON CONFLICT ON CONSTRAINT uq_channel_backgrounds_channel_id DO UPDATE SET \
                desktop_image = COALESCE($2, channel_backgrounds.desktop_image), \
                desktop_image_repeat = COALESCE($3, channel_backgrounds.desktop_image_repeat), \
                header_size = COALESCE($4, channel_backgrounds.header_size), \
                imagemap = COALESCE($5, channel_backgrounds.imagemap), \
                color = COALESCE($6, channel_backgrounds.color) \
             RETURNING {COLUMNS}"
        );
        let background = sqlx::query_as::<_, ChannelBackground>(&query)
            .bind(channel_id)
            .bind(desktop_image)
            .bind(input.desktop_image_repeat.map(BackgroundRepeat::as_str))
            .bind(input.header_size)
            .bind(&input.imagemap)
            .bind(color)
            .fetch_one(pool)
            .await?;

        tracing::debug!(channel_id, "Channel background saved");
        Ok(background)
    }

    /// The channel's background, if it has set one.
    pub async fn find_for_channel(
        pool: &PgPool,
        channel_id: DbId,
    ) -> Result<Option<ChannelBackground>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM channel_backgrounds WHERE channel_id = $1");
        sqlx::query_as::<_, ChannelBackground>(&query)
            .bind(channel_id)
            .fetch_optional(pool)
            .await
    }

    /// Remove the channel's background. Returns `true` if one existed.
    pub async fn delete(pool: &PgPool, channel_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM channel_backgrounds WHERE channel_id = $1")
            .bind(channel_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
