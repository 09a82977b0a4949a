//! Repository for the `transcode_jobs` table.
//!
//! Rows are the hand-off to the external transcode queue, which reports
//! progress back through [`VideoRepo::set_transcode_status`].
//!
//! [`VideoRepo::set_transcode_status`]: crate::repositories::VideoRepo::set_transcode_status

use sqlx::PgPool;
use vidshare_core::error::CoreError;
use vidshare_core::types::DbId;
use vidshare_core::video::TranscodeStatus;

use crate::error::DbResult;
use crate::models::transcode_job::TranscodeJob;

/// Column list for `transcode_jobs` queries.
const COLUMNS: &str = "id, job_id, video_id, enqueued_at";

/// Provides transcode enqueue operations.
pub struct TranscodeJobRepo;

impl TranscodeJobRepo {
    /// Enqueue a transcode of a video.
    ///
    /// Inserts the job record, stores its id on the video and resets the
    /// video's status to queued, all in one transaction.
    pub async fn enqueue(pool: &PgPool, video_id: DbId) -> DbResult<TranscodeJob> {
        let mut tx = pool.begin().await?;

        let locked = sqlx::query("SELECT 1 FROM videos WHERE id = $1 FOR UPDATE")
            .bind(video_id)
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Err(CoreError::NotFound {
                entity: "video",
                id: video_id,
            }
            .into());
        }

        let query = format!(
            "INSERT INTO transcode_jobs (video_id) VALUES ($1) RETURNING {COLUMNS}"
        );
        let job = sqlx::query_as::<_, TranscodeJob>(&query)
            .bind(video_id)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE videos SET job_id = $2, transcode_status = $3 WHERE id = $1")
            .bind(video_id)
            .bind(&job.job_id)
            .bind(TranscodeStatus::Queued.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(video_id, job_id = %job.job_id, "Transcode enqueued");
        Ok(job)
    }

    /// Find a job by its queue id.
    pub async fn find_by_job_id(
        pool: &PgPool,
        job_id: &str,
    ) -> Result<Option<TranscodeJob>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM transcode_jobs WHERE job_id = $1");
        sqlx::query_as::<_, TranscodeJob>(&query)
            .bind(job_id)
            .fetch_optional(pool)
            .await
    }

    /// Jobs enqueued for a video, most recent first.
    pub async fn list_for_video(
        pool: &PgPool,
        video_id: DbId,
    ) -> Result<Vec<TranscodeJob>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM transcode_jobs \
             WHERE video_id = $1 \
             ORDER BY enqueued_at DESC, id DESC"
        );
        sqlx::query_as::<_, TranscodeJob>(&query)
            .bind(video_id)
            .fetch_all(pool)
            .await
    }
}
