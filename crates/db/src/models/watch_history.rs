use serde::Serialize;
use sqlx::FromRow;
use vidshare_core::types::{DbId, Timestamp};

/// A row from the `watch_history` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WatchHistoryEntry {
    pub id: DbId,
    pub channel_id: DbId,
    pub video_id: DbId,
    pub watched_at: Timestamp,
}
