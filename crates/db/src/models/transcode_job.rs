use serde::Serialize;
use sqlx::FromRow;
use vidshare_core::types::{DbId, Timestamp};

/// A row from the `transcode_jobs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TranscodeJob {
    pub id: DbId,
    pub job_id: String,
    pub video_id: DbId,
    pub enqueued_at: Timestamp,
}
