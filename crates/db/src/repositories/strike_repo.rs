//! Repository for the `video_strikes` and `comment_strikes` tables.
//!
//! A strike is charged to the channel that owns the content. A struck video
//! drops out of every published listing.

use sqlx::PgPool;
use vidshare_core::error::CoreError;
use vidshare_core::moderation::StrikeCategory;
use vidshare_core::types::DbId;

use crate::error::DbResult;
use crate::models::moderation::{CommentStrike, VideoStrike};

/// Column list for `video_strikes` queries.
const VIDEO_COLUMNS: &str = "id, video_id, channel_id, category, created_at";

/// Column list for `comment_strikes` queries.
const COMMENT_COLUMNS: &str = "id, comment_id, channel_id, category, created_at";

/// Provides strike issuance and lookups.
pub struct StrikeRepo;

impl StrikeRepo {
    /// Strike a video, charging its owning channel.
    pub async fn strike_video(
        pool: &PgPool,
        video_id: DbId,
        category: StrikeCategory,
    ) -> DbResult<VideoStrike> {
        let query = format!(
            "INSERT INTO video_strikes (video_id, channel_id, category) \
             SELECT id, channel_id, $2 FROM videos WHERE id = $1 \
             RETURNING {VIDEO_COLUMNS}"
        );
        let strike = sqlx::query_as::<_, VideoStrike>(&query)
            .bind(video_id)
            .bind(category.as_str())
            .fetch_optional(pool)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "video",
                id: video_id,
            })?;

        tracing::info!(
            strike_id = strike.id,
            video_id,
            channel_id = strike.details.channel_id,
            category = %category,
            "Video struck"
        );
        Ok(strike)
    }

    /// Strike a comment, charging its author.
    pub async fn strike_comment(
        pool: &PgPool,
        comment_id: DbId,
        category: StrikeCategory,
    ) -> DbResult<CommentStrike> {
        let query = format!(
            "INSERT INTO comment_strikes (comment_id, channel_id, category) \
             SELECT id, author_id, $2 FROM comments WHERE id = $1 \
             RETURNING {COMMENT_COLUMNS}"
        );
        let strike = sqlx::query_as::<_, CommentStrike>(&query)
            .bind(comment_id)
            .bind(category.as_str())
            .fetch_optional(pool)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "comment",
                id: comment_id,
            })?;

        tracing::info!(
            strike_id = strike.id,
            comment_id,
            channel_id = strike.details.channel_id,
            category = %category,
            "Comment struck"
        );
        Ok(strike)
    }

    /// Video strikes charged to a channel, newest first.
    pub async fn list_video_strikes_for_channel(
        pool: &PgPool,
        channel_id: DbId,
    ) -> Result<Vec<VideoStrike>, sqlx::Error> {
        let query = format!(
            "SELECT {VIDEO_COLUMNS} FROM video_strikes \
             WHERE channel_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, VideoStrike>(&query)
            .bind(channel_id)
            .fetch_all(pool)
            .await
    }

    /// Comment strikes charged to a channel, newest first.
    pub async fn list_comment_strikes_for_channel(
        pool: &PgPool,
        channel_id: DbId,
    ) -> Result<Vec<CommentStrike>, sqlx::Error> {
        let query = format!(
            "SELECT {COMMENT_COLUMNS} FROM comment_strikes \
             WHERE channel_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, CommentStrike>(&query)
            .bind(channel_id)
            .fetch_all(pool)
            .await
    }

    /// Total strikes of both kinds charged to a channel.
    pub async fn count_for_channel(pool: &PgPool, channel_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT \
                (SELECT COUNT(*) FROM video_strikes WHERE channel_id = $1) + \
                (SELECT COUNT(*) FROM comment_strikes WHERE channel_id = $1)",
        )
        .bind(channel_id)
        .fetch_one(pool)
        .await
    }

    /// Whether a video carries any strike.
    pub async fn is_video_struck(pool: &PgPool, video_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM video_strikes WHERE video_id = $1)")
            .bind(video_id)
            .fetch_one(pool)
            .await
    }
}
