//! Repository for the `videos` table.
//!
//! Every public listing goes through [`PUBLISHED_FROM`] and
//! [`PUBLISHED_PREDICATE`] so that the visibility gate is applied the same
//! way everywhere: transcode finished, published, owner not banned, and no
//! video strike.

use sqlx::{PgExecutor, PgPool};
use vidshare_core::error::CoreError;
use vidshare_core::ids::{generate_public_id, is_valid_public_id};
use vidshare_core::ranking::{
    clamp_limit, clamp_offset, recommendation_window, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT,
};
use vidshare_core::search::{
    normalize_query, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT, MIN_SEARCH_SCORE, TS_CONFIG,
    WEIGHT_CHANNEL_NAME, WEIGHT_DESCRIPTION, WEIGHT_TITLE,
};
use vidshare_core::types::DbId;
use vidshare_core::video::{validate_title, TranscodeStatus, Visibility, DEFAULT_VIDEO_TITLE};

use crate::error::{is_unique_violation, DbResult};
use crate::models::video::{CreateVideo, RankedVideo, ScoredVideo, UpdateVideo, Video};
use crate::repositories::channel_repo::MAX_PUBLIC_ID_ATTEMPTS;

/// Column list for `videos` queries.
const COLUMNS: &str = "\
    id, watch_id, channel_id, category_id, image_set_id, title, description, visibility, \
    transcode_status, published, views, job_id, subs_notified, created_at";

/// Same columns qualified with the `v` alias, for joins.
const V_COLUMNS: &str = "\
    v.id, v.watch_id, v.channel_id, v.category_id, v.image_set_id, v.title, v.description, \
    v.visibility, v.transcode_status, v.published, v.views, v.job_id, v.subs_notified, \
    v.created_at";

/// Joins needed by [`PUBLISHED_PREDICATE`]: `v` videos, `c` channels, `u` users.
pub(crate) const PUBLISHED_FROM: &str = "\
    FROM videos v \
    JOIN channels c ON c.id = v.channel_id \
    JOIN users u ON u.id = c.user_id";

/// The published-video gate. Must be used by every public listing.
pub(crate) const PUBLISHED_PREDICATE: &str = "\
    v.transcode_status = 'finished' \
    AND v.published = true \
    AND u.banned = false \
    AND NOT EXISTS (SELECT 1 FROM video_strikes vs WHERE vs.video_id = v.id)";

/// Provides CRUD and listing operations for videos.
pub struct VideoRepo;

impl VideoRepo {
    // -----------------------------------------------------------------------
    // CRUD
    // -----------------------------------------------------------------------

    /// Create a video record with a freshly generated watch id.
    pub async fn create(pool: &PgPool, input: &CreateVideo) -> DbResult<Video> {
        let title = match &input.title {
            Some(title) => {
                validate_title(title)?;
                title.trim()
            }
            None => DEFAULT_VIDEO_TITLE,
        };
        let visibility = input.visibility.unwrap_or_default();

        let query = format!(
            "INSERT INTO videos (watch_id, channel_id, category_id, title, description, visibility) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );

        let mut attempt = 0;
        loop {
            attempt += 1;
            let result = sqlx::query_as::<_, Video>(&query)
                .bind(generate_public_id())
                .bind(input.channel_id)
                .bind(input.category_id)
                .bind(title)
                .bind(&input.description)
                .bind(visibility.as_str())
                .fetch_one(pool)
                .await;

            match result {
                Err(e)
                    if attempt < MAX_PUBLIC_ID_ATTEMPTS
                        && is_unique_violation(&e, Some("uq_videos_watch_id")) =>
                {
                    tracing::warn!(attempt, "Video watch id collision, retrying");
                }
                other => return Ok(other?),
            }
        }
    }

    /// Find a video by internal ID, regardless of visibility.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Video>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM videos WHERE id = $1");
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a video by watch id, regardless of visibility.
    pub async fn find_by_watch_id(
        pool: &PgPool,
        watch_id: &str,
    ) -> Result<Option<Video>, sqlx::Error> {
        if !is_valid_public_id(watch_id) {
            return Ok(None);
        }
        let query = format!("SELECT {COLUMNS} FROM videos WHERE watch_id = $1");
        sqlx::query_as::<_, Video>(&query)
            .bind(watch_id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch a video by watch id that must exist.
    pub async fn get_by_watch_id(pool: &PgPool, watch_id: &str) -> DbResult<Video> {
        Self::find_by_watch_id(pool, watch_id).await?.ok_or(
            CoreError::NotFoundByKey {
                entity: "video",
                key: watch_id.to_string(),
            }
            .into(),
        )
    }

    /// Find a video by watch id through the published gate.
    ///
    /// Visibility is not checked so that unlisted videos stay reachable by
    /// link.
    pub async fn find_published(
        pool: &PgPool,
        watch_id: &str,
    ) -> Result<Option<Video>, sqlx::Error> {
        if !is_valid_public_id(watch_id) {
            return Ok(None);
        }
        let query = format!(
            "SELECT {V_COLUMNS} {PUBLISHED_FROM} \
             WHERE v.watch_id = $1 AND {PUBLISHED_PREDICATE}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(watch_id)
            .fetch_optional(pool)
            .await
    }

    /// Edit a video. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(pool: &PgPool, id: DbId, input: &UpdateVideo) -> DbResult<Option<Video>> {
        if let Some(title) = &input.title {
            validate_title(title)?;
        }

        let query = format!(
            "UPDATE videos SET \
                title = COALESCE($2, title), \
                description = COALESCE($3, description), \
                category_id = COALESCE($4, category_id), \
                visibility = COALESCE($5, visibility), \
                published = COALESCE($6, published) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let video = sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .bind(input.title.as_deref().map(str::trim))
            .bind(&input.description)
            .bind(input.category_id)
            .bind(input.visibility.map(Visibility::as_str))
            .bind(input.published)
            .fetch_optional(pool)
            .await?;
        Ok(video)
    }

    /// Persist the status reported by the transcode queue.
    ///
    /// Returns `true` if the video exists.
    pub async fn set_transcode_status(
        pool: &PgPool,
        id: DbId,
        status: TranscodeStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE videos SET transcode_status = $2 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(pool)
            .await?;
        if status.is_terminal() {
            tracing::info!(video_id = id, status = %status, "Transcode finished");
        } else {
            tracing::debug!(video_id = id, status = %status, "Transcode status updated");
        }
        Ok(result.rows_affected() > 0)
    }

    /// Store the id of the transcode job processing this video.
    pub async fn record_job(pool: &PgPool, id: DbId, job_id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE videos SET job_id = $2 WHERE id = $1")
            .bind(id)
            .bind(job_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Flag a video as having had its subscribers notified.
    pub async fn mark_subscribers_notified(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        mark_subscribers_notified(pool, id).await
    }

    /// Permanently delete a video. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Atomically add one view and return the new total.
    ///
    /// Returns `None` when no video has the given watch id.
    pub async fn increment_views(pool: &PgPool, watch_id: &str) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar("UPDATE videos SET views = views + 1 WHERE watch_id = $1 RETURNING views")
            .bind(watch_id)
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Published listings
    // -----------------------------------------------------------------------

    /// Public videos ranked by likes, channel subscribers, views, then recency.
    pub async fn list_latest(
        pool: &PgPool,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<RankedVideo>, sqlx::Error> {
        let query = format!(
            "SELECT {V_COLUMNS}, \
                (SELECT COUNT(*) FROM video_reactions r \
                  WHERE r.video_id = v.id AND r.kind = 'like') AS like_count, \
                (SELECT COUNT(*) FROM subscriptions s \
                  WHERE s.to_channel_id = v.channel_id) AS sub_count \
             {PUBLISHED_FROM} \
             WHERE {PUBLISHED_PREDICATE} AND v.visibility = $1 \
             ORDER BY like_count DESC, sub_count DESC, v.views DESC, v.created_at DESC, v.id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, RankedVideo>(&query)
            .bind(Visibility::Public.as_str())
            .bind(clamp_limit(limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT))
            .bind(clamp_offset(offset))
            .fetch_all(pool)
            .await
    }

    /// Number of public videos passing the published gate.
    pub async fn count_public(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*) {PUBLISHED_FROM} WHERE {PUBLISHED_PREDICATE} AND v.visibility = $1"
        );
        sqlx::query_scalar(&query)
            .bind(Visibility::Public.as_str())
            .fetch_one(pool)
            .await
    }

    /// Recommended public videos.
    ///
    /// Small catalogues are returned whole; larger ones yield a random
    /// contiguous window of 20 in id order.
    pub async fn list_recommended(pool: &PgPool) -> Result<Vec<Video>, sqlx::Error> {
        let total = Self::count_public(pool).await?;
        if total == 0 {
            return Ok(Vec::new());
        }

        let window = recommendation_window(total, &mut rand::rng());
        let (limit, offset) = match window {
            Some(w) => (w.limit, w.offset),
            None => (total, 0),
        };

        let query = format!(
            "SELECT {V_COLUMNS} {PUBLISHED_FROM} \
             WHERE {PUBLISHED_PREDICATE} AND v.visibility = $1 \
             ORDER BY v.id \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(Visibility::Public.as_str())
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Public videos in a category, newest first.
    pub async fn list_by_category(
        pool: &PgPool,
        category_id: DbId,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Video>, sqlx::Error> {
        let query = format!(
            "SELECT {V_COLUMNS} {PUBLISHED_FROM} \
             WHERE {PUBLISHED_PREDICATE} AND v.visibility = $1 AND v.category_id = $2 \
             ORDER BY v.created_at DESC, v.id DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(Visibility::Public.as_str())
            .bind(category_id)
            .bind(clamp_limit(limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT))
            .bind(clamp_offset(offset))
            .fetch_all(pool)
            .await
    }

    /// Public videos of a channel, newest first.
    pub async fn list_by_channel(
        pool: &PgPool,
        channel_id: DbId,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Video>, sqlx::Error> {
        let query = format!(
            "SELECT {V_COLUMNS} {PUBLISHED_FROM} \
             WHERE {PUBLISHED_PREDICATE} AND v.visibility = $1 AND v.channel_id = $2 \
             ORDER BY v.created_at DESC, v.id DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(Visibility::Public.as_str())
            .bind(channel_id)
            .bind(clamp_limit(limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT))
            .bind(clamp_offset(offset))
            .fetch_all(pool)
            .await
    }

    /// Public videos from every channel `viewer_channel_id` subscribes to,
    /// newest first.
    pub async fn subscription_feed(
        pool: &PgPool,
        viewer_channel_id: DbId,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Video>, sqlx::Error> {
        let query = format!(
            "SELECT {V_COLUMNS} {PUBLISHED_FROM} \
             JOIN subscriptions s ON s.to_channel_id = v.channel_id AND s.from_channel_id = $2 \
             WHERE {PUBLISHED_PREDICATE} AND v.visibility = $1 \
             ORDER BY v.created_at DESC, v.id DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(Visibility::Public.as_str())
            .bind(viewer_channel_id)
            .bind(clamp_limit(limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT))
            .bind(clamp_offset(offset))
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    /// Search public videos by title, description, and channel name.
    ///
    /// Each hit is scored as the mean of its weighted `ts_rank` and the sum of
    /// its trigram similarities; hits at or below the threshold are dropped.
    pub async fn search(
        pool: &PgPool,
        terms: &str,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<ScoredVideo>, sqlx::Error> {
        let Some(terms) = normalize_query(terms) else {
            return Ok(Vec::new());
        };

        let query = format!(
            "SELECT {COLUMNS}, score FROM ( \
                SELECT {V_COLUMNS}, \
                    (ts_rank( \
                        setweight(to_tsvector('{TS_CONFIG}', v.title), '{WEIGHT_TITLE}') || \
                        setweight(to_tsvector('{TS_CONFIG}', COALESCE(v.description, '')), '{WEIGHT_DESCRIPTION}') || \
                        setweight(to_tsvector('{TS_CONFIG}', c.name), '{WEIGHT_CHANNEL_NAME}'), \
                        plainto_tsquery('{TS_CONFIG}', $1) \
                     )::FLOAT8 \
                     + similarity(v.title, $1)::FLOAT8 \
                     + similarity(COALESCE(v.description, ''), $1)::FLOAT8 \
                     + similarity(c.name, $1)::FLOAT8 \
                    ) / 2 AS score \
                {PUBLISHED_FROM} \
                WHERE {PUBLISHED_PREDICATE} AND v.visibility = $2 \
             ) scored \
             WHERE score > $3 \
             ORDER BY score DESC, created_at DESC, id DESC \
             LIMIT $4 OFFSET $5"
        );
        let results = sqlx::query_as::<_, ScoredVideo>(&query)
            .bind(&terms)
            .bind(Visibility::Public.as_str())
            .bind(MIN_SEARCH_SCORE)
            .bind(clamp_limit(limit, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT))
            .bind(clamp_offset(offset))
            .fetch_all(pool)
            .await?;

        tracing::debug!(terms = %terms, hits = results.len(), "Video search executed");
        Ok(results)
    }

    // -----------------------------------------------------------------------
    // Subscriber notification bookkeeping
    // -----------------------------------------------------------------------

    /// Public videos whose subscribers have not been notified yet, oldest first.
    pub async fn list_awaiting_subscriber_notification(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<Video>, sqlx::Error> {
        let query = format!(
            "SELECT {V_COLUMNS} {PUBLISHED_FROM} \
             WHERE {PUBLISHED_PREDICATE} AND v.visibility = $1 AND v.subs_notified = false \
             ORDER BY v.created_at, v.id \
             LIMIT $2"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(Visibility::Public.as_str())
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}

pub(crate) async fn mark_subscribers_notified<'e, E: PgExecutor<'e>>(
    executor: E,
    id: DbId,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE videos SET subs_notified = true WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}
