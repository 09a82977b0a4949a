//! Repository for the `channels` table.

use sqlx::PgPool;
use vidshare_core::ids::{generate_public_id, is_valid_public_id};
use vidshare_core::text::{validate_channel_description, validate_channel_name};
use vidshare_core::types::DbId;

use crate::error::{is_unique_violation, DbResult};
use crate::models::channel::{Channel, CreateChannel, UpdateChannel};

/// Column list for `channels` queries.
pub(crate) const COLUMNS: &str = "id, public_id, user_id, name, description, avatar_path, \
                                  verified, last_login_at, created_at";

/// Same columns qualified with the `c` alias, for joins.
pub(crate) const C_COLUMNS: &str = "c.id, c.public_id, c.user_id, c.name, c.description, \
                                    c.avatar_path, c.verified, c.last_login_at, c.created_at";

/// How many fresh public ids to try before giving up on a collision.
pub(crate) const MAX_PUBLIC_ID_ATTEMPTS: usize = 3;

/// Provides CRUD operations for channels.
pub struct ChannelRepo;

impl ChannelRepo {
    /// Create a channel with a freshly generated public id.
    pub async fn create(pool: &PgPool, input: &CreateChannel) -> DbResult<Channel> {
        validate_channel_name(&input.name)?;
        let description = input.description.as_deref().unwrap_or_default();
        validate_channel_description(description)?;

        let query = format!(
            "INSERT INTO channels (public_id, user_id, name, description) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );

        let mut attempt = 0;
        loop {
            attempt += 1;
            let result = sqlx::query_as::<_, Channel>(&query)
                .bind(generate_public_id())
                .bind(input.user_id)
                .bind(input.name.trim())
                .bind(description)
                .fetch_one(pool)
                .await;

            match result {
                Err(e)
                    if attempt < MAX_PUBLIC_ID_ATTEMPTS
                        && is_unique_violation(&e, Some("uq_channels_public_id")) =>
                {
                    tracing::warn!(attempt, "Channel public id collision, retrying");
                }
                other => return Ok(other?),
            }
        }
    }

    /// Find a channel by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Channel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM channels WHERE id = $1");
        sqlx::query_as::<_, Channel>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a channel by its public id. Channels of banned users are not returned.
    pub async fn find_by_public_id(
        pool: &PgPool,
        public_id: &str,
    ) -> Result<Option<Channel>, sqlx::Error> {
        if !is_valid_public_id(public_id) {
            return Ok(None);
        }
        let query = format!(
            "SELECT {C_COLUMNS} FROM channels c \
             JOIN users u ON u.id = c.user_id \
             WHERE c.public_id = $1 AND u.banned = false"
        );
        sqlx::query_as::<_, Channel>(&query)
            .bind(public_id)
            .fetch_optional(pool)
            .await
    }

    /// The first channel a user created, if any.
    pub async fn first_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Channel>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM channels WHERE user_id = $1 ORDER BY id LIMIT 1"
        );
        sqlx::query_as::<_, Channel>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List every channel whose owner is not banned, oldest first.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Channel>, sqlx::Error> {
        let query = format!(
            "SELECT {C_COLUMNS} FROM channels c \
             JOIN users u ON u.id = c.user_id \
             WHERE u.banned = false \
             ORDER BY c.created_at, c.id"
        );
        sqlx::query_as::<_, Channel>(&query).fetch_all(pool).await
    }

    /// Update a channel. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateChannel,
    ) -> DbResult<Option<Channel>> {
        if let Some(name) = &input.name {
            validate_channel_name(name)?;
        }
        if let Some(description) = &input.description {
            validate_channel_description(description)?;
        }

        let query = format!(
            "UPDATE channels SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description), \
                avatar_path = COALESCE($4, avatar_path), \
                verified = COALESCE($5, verified) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let channel = sqlx::query_as::<_, Channel>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.description)
            .bind(&input.avatar_path)
            .bind(input.verified)
            .fetch_optional(pool)
            .await?;
        Ok(channel)
    }

    /// Set `last_login_at` to now.
    pub async fn record_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE channels SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Sum of views over every video of the channel, published or not.
    pub async fn total_views(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COALESCE(SUM(views), 0)::BIGINT FROM videos WHERE channel_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
    }
}
