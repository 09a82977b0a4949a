//! Repository for the `watch_history` table.

use sqlx::PgPool;
use vidshare_core::types::DbId;

use crate::models::watch_history::WatchHistoryEntry;

/// Column list for `watch_history` queries.
const COLUMNS: &str = "id, channel_id, video_id, watched_at";

/// Provides watch history operations.
pub struct WatchHistoryRepo;

impl WatchHistoryRepo {
    /// Record that a channel watched a video.
    ///
    /// A repeat watch refreshes the existing entry's timestamp instead of
    /// adding a row.
    pub async fn add_entry(
        pool: &PgPool,
        channel_id: DbId,
        video_id: DbId,
    ) -> Result<WatchHistoryEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO watch_history (channel_id, video_id) \
             VALUES ($1, $2) \
             ON CONFLICT ON CONSTRAINT uq_watch_history DO UPDATE SET watched_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WatchHistoryEntry>(&query)
            .bind(channel_id)
            .bind(video_id)
            .fetch_one(pool)
            .await
    }

    /// A channel's history, most recently watched first.
    pub async fn list_for_channel(
        pool: &PgPool,
        channel_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<WatchHistoryEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM watch_history \
             WHERE channel_id = $1 \
             ORDER BY watched_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, WatchHistoryEntry>(&query)
            .bind(channel_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Remove a channel's entire history. Returns the number of rows removed.
    pub async fn clear(pool: &PgPool, channel_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM watch_history WHERE channel_id = $1")
            .bind(channel_id)
            .execute(pool)
            .await?;
        tracing::debug!(channel_id, removed = result.rows_affected(), "Watch history cleared");
        Ok(result.rows_affected())
    }
}
