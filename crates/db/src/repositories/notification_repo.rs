//! Repository for the `notifications` table.

use sqlx::PgPool;
use vidshare_core::error::CoreError;
use vidshare_core::notification::{ContentKind, NotificationKind};
use vidshare_core::types::DbId;

use crate::error::DbResult;
use crate::models::notification::{CreateNotification, Notification, NotificationRow};
use crate::repositories::video_repo;

/// Column list for `notifications` queries.
const COLUMNS: &str = "id, kind, recipient_user_id, actor_channel_id, action_kind, action_id, \
                       target_kind, target_id, unread, created_at";

/// Provides CRUD operations for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Create a notification, returning the stored row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateNotification,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications \
                (kind, recipient_user_id, actor_channel_id, action_kind, action_id, target_kind, target_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, NotificationRow>(&query)
            .bind(input.kind.as_str())
            .bind(input.recipient_user_id)
            .bind(input.actor_channel_id)
            .bind(input.action.kind().as_str())
            .bind(input.action.id())
            .bind(input.target.kind().as_str())
            .bind(input.target.id())
            .fetch_one(pool)
            .await?;
        decode(row)
    }

    /// List notifications for a user, newest first.
    ///
    /// When `unread_only` is `true`, only notifications with `unread = true`
    /// are returned.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let filter = if unread_only { "AND unread = true" } else { "" };
        let query = format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE recipient_user_id = $1 {filter} \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, NotificationRow>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    /// Mark a single notification as read.
    ///
    /// Returns `true` if the notification was found unread for the given user
    /// and updated, `false` otherwise.
    pub async fn mark_read(
        pool: &PgPool,
        notification_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications SET unread = false \
             WHERE id = $1 AND recipient_user_id = $2 AND unread = true",
        )
        .bind(notification_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark all unread notifications as read for a user.
    ///
    /// Returns the number of notifications that were marked read.
    pub async fn mark_all_read(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications SET unread = false \
             WHERE recipient_user_id = $1 AND unread = true",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Get the number of unread notifications for a user.
    pub async fn unread_count(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE recipient_user_id = $1 AND unread = true",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Notify every subscriber of a video's channel that the video is out.
    ///
    /// Each subscriber's owning user gets one `video` notification acted by
    /// the uploading channel. The video is flagged in the same transaction, so
    /// a second call inserts nothing. Returns the number of notifications
    /// created.
    pub async fn notify_subscribers_of_video(pool: &PgPool, video_id: DbId) -> DbResult<u64> {
        let mut tx = pool.begin().await?;

        let (channel_id, already_notified): (DbId, bool) = sqlx::query_as(
            "SELECT channel_id, subs_notified FROM videos WHERE id = $1 FOR UPDATE",
        )
        .bind(video_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "video",
            id: video_id,
        })?;

        if already_notified {
            tx.rollback().await?;
            return Ok(0);
        }

        let video_kind = ContentKind::Video.as_str();
        let inserted = sqlx::query(
            "INSERT INTO notifications \
                (kind, recipient_user_id, actor_channel_id, action_kind, action_id, target_kind, target_id) \
             SELECT $1, c.user_id, $2, $3, $4, $3, $4 \
             FROM subscriptions s \
             JOIN channels c ON c.id = s.from_channel_id \
             WHERE s.to_channel_id = $2",
        )
        .bind(NotificationKind::Video.as_str())
        .bind(channel_id)
        .bind(video_kind)
        .bind(video_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        video_repo::mark_subscribers_notified(&mut *tx, video_id).await?;
        tx.commit().await?;

        tracing::info!(video_id, channel_id, notified = inserted, "Subscribers notified of video");
        Ok(inserted)
    }
}

fn decode(row: NotificationRow) -> Result<Notification, sqlx::Error> {
    Notification::try_from(row).map_err(|e| sqlx::Error::Decode(Box::new(e)))
}
