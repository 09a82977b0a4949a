//! Repository for the `subscriptions` table.

use sqlx::{PgExecutor, PgPool};
use vidshare_core::error::CoreError;
use vidshare_core::types::DbId;

use crate::error::DbResult;
use crate::models::channel::Channel;
use crate::repositories::channel_repo;

/// Provides subscription toggles and follower lookups.
pub struct SubscriptionRepo;

impl SubscriptionRepo {
    /// Subscribe `from_channel_id` to `to_channel_id`, or unsubscribe if the
    /// subscription already exists.
    ///
    /// Returns the subscriber count of `to_channel_id` after the change.
    /// Subscribing a channel to itself is a [`CoreError::Validation`].
    pub async fn toggle(pool: &PgPool, to_channel_id: DbId, from_channel_id: DbId) -> DbResult<i64> {
        if to_channel_id == from_channel_id {
            return Err(CoreError::Validation("A channel cannot subscribe to itself".into()).into());
        }

        let mut tx = pool.begin().await?;

        let removed = sqlx::query(
            "DELETE FROM subscriptions WHERE from_channel_id = $1 AND to_channel_id = $2",
        )
        .bind(from_channel_id)
        .bind(to_channel_id)
        .execute(&mut *tx)
        .await?
        .rows_affected()
            > 0;

        if !removed {
            sqlx::query(
                "INSERT INTO subscriptions (from_channel_id, to_channel_id) \
                 VALUES ($1, $2) \
                 ON CONFLICT ON CONSTRAINT uq_subscriptions DO NOTHING",
            )
            .bind(from_channel_id)
            .bind(to_channel_id)
            .execute(&mut *tx)
            .await?;
        }

        let count = subscriber_count(&mut *tx, to_channel_id).await?;
        tx.commit().await?;

        tracing::info!(
            from_channel_id,
            to_channel_id,
            subscribed = !removed,
            subscribers = count,
            "Subscription toggled"
        );
        Ok(count)
    }

    /// Whether `from_channel_id` is subscribed to `to_channel_id`.
    pub async fn is_subscribed(
        pool: &PgPool,
        to_channel_id: DbId,
        from_channel_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS( \
                SELECT 1 FROM subscriptions \
                WHERE from_channel_id = $1 AND to_channel_id = $2 \
             )",
        )
        .bind(from_channel_id)
        .bind(to_channel_id)
        .fetch_one(pool)
        .await
    }

    /// Number of channels subscribed to `channel_id`.
    pub async fn subscriber_count(pool: &PgPool, channel_id: DbId) -> Result<i64, sqlx::Error> {
        subscriber_count(pool, channel_id).await
    }

    /// Channels that `channel_id` subscribes to, most recent first.
    pub async fn list_subscribed_channels(
        pool: &PgPool,
        channel_id: DbId,
    ) -> Result<Vec<Channel>, sqlx::Error> {
        let columns = channel_repo::C_COLUMNS;
        let query = format!(
            "SELECT {columns} FROM subscriptions s \
             JOIN channels c ON c.id = s.to_channel_id \
             WHERE s.from_channel_id = $1 \
             ORDER BY s.created_at DESC, s.id DESC"
        );
        sqlx::query_as::<_, Channel>(&query)
            .bind(channel_id)
            .fetch_all(pool)
            .await
    }

    /// Channels subscribed to `channel_id`, most recent first.
    pub async fn list_subscribers(
        pool: &PgPool,
        channel_id: DbId,
    ) -> Result<Vec<Channel>, sqlx::Error> {
        let columns = channel_repo::C_COLUMNS;
        let query = format!(
            "SELECT {columns} FROM subscriptions s \
             JOIN channels c ON c.id = s.from_channel_id \
             WHERE s.to_channel_id = $1 \
             ORDER BY s.created_at DESC, s.id DESC"
        );
        sqlx::query_as::<_, Channel>(&query)
            .bind(channel_id)
            .fetch_all(pool)
            .await
    }
}

async fn subscriber_count<'e, E: PgExecutor<'e>>(
    executor: E,
    channel_id: DbId,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM subscriptions WHERE to_channel_id = $1")
        .bind(channel_id)
        .fetch_one(executor)
        .await
}
