//! Repository for the `video_reactions` and `comment_reactions` tables.
//!
//! Both tables hold at most one row per (target, channel); the `kind` column
//! says whether it is a like or a dislike. Toggles delete and insert rows,
//! never update them.

use serde::Serialize;
use sqlx::{PgExecutor, PgPool};
use vidshare_core::reaction::{plan_toggle, ReactionCounts, ReactionKind, ToggleOutcome};
use vidshare_core::types::DbId;

/// Which reaction table a query runs against.
#[derive(Debug, Clone, Copy)]
struct ReactionTable {
    table: &'static str,
    target_column: &'static str,
}

const VIDEO: ReactionTable = ReactionTable {
    table: "video_reactions",
    target_column: "video_id",
};

const COMMENT: ReactionTable = ReactionTable {
    table: "comment_reactions",
    target_column: "comment_id",
};

/// Result of a like or dislike toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToggleResult {
    pub outcome: ToggleOutcome,
    #[serde(flatten)]
    pub counts: ReactionCounts,
}

/// Provides like/dislike toggles and lookups for videos and comments.
pub struct ReactionRepo;

impl ReactionRepo {
    // -----------------------------------------------------------------------
    // Videos
    // -----------------------------------------------------------------------

    /// Toggle `channel_id`'s like on a video, clearing a dislike first.
    pub async fn toggle_video_like(
        pool: &PgPool,
        video_id: DbId,
        channel_id: DbId,
    ) -> Result<ToggleResult, sqlx::Error> {
        toggle(pool, VIDEO, video_id, channel_id, ReactionKind::Like).await
    }

    /// Toggle `channel_id`'s dislike on a video, clearing a like first.
    pub async fn toggle_video_dislike(
        pool: &PgPool,
        video_id: DbId,
        channel_id: DbId,
    ) -> Result<ToggleResult, sqlx::Error> {
        toggle(pool, VIDEO, video_id, channel_id, ReactionKind::Dislike).await
    }

    /// The reaction `channel_id` currently holds on a video.
    pub async fn video_reaction_of(
        pool: &PgPool,
        video_id: DbId,
        channel_id: DbId,
    ) -> Result<Option<ReactionKind>, sqlx::Error> {
        reaction_of(pool, VIDEO, video_id, channel_id).await
    }

    pub async fn is_video_liked(
        pool: &PgPool,
        video_id: DbId,
        channel_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        Ok(Self::video_reaction_of(pool, video_id, channel_id).await? == Some(ReactionKind::Like))
    }

    pub async fn is_video_disliked(
        pool: &PgPool,
        video_id: DbId,
        channel_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        Ok(Self::video_reaction_of(pool, video_id, channel_id).await?
            == Some(ReactionKind::Dislike))
    }

    /// Like and dislike totals for a video.
    pub async fn video_counts(pool: &PgPool, video_id: DbId) -> Result<ReactionCounts, sqlx::Error> {
        counts(pool, VIDEO, video_id).await
    }

    // -----------------------------------------------------------------------
    // Comments
    // -----------------------------------------------------------------------

    /// Toggle `channel_id`'s like on a comment, clearing a dislike first.
    pub async fn toggle_comment_like(
        pool: &PgPool,
        comment_id: DbId,
        channel_id: DbId,
    ) -> Result<ToggleResult, sqlx::Error> {
        toggle(pool, COMMENT, comment_id, channel_id, ReactionKind::Like).await
    }

    /// Toggle `channel_id`'s dislike on a comment, clearing a like first.
    pub async fn toggle_comment_dislike(
        pool: &PgPool,
        comment_id: DbId,
        channel_id: DbId,
    ) -> Result<ToggleResult, sqlx::Error> {
        toggle(pool, COMMENT, comment_id, channel_id, ReactionKind::Dislike).await
    }

    /// The reaction `channel_id` currently holds on a comment.
    pub async fn comment_reaction_of(
        pool: &PgPool,
        comment_id: DbId,
        channel_id: DbId,
    ) -> Result<Option<ReactionKind>, sqlx::Error> {
        reaction_of(pool, COMMENT, comment_id, channel_id).await
    }

    pub async fn is_comment_liked(
        pool: &PgPool,
        comment_id: DbId,
        channel_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        Ok(Self::comment_reaction_of(pool, comment_id, channel_id).await?
            == Some(ReactionKind::Like))
    }

    pub async fn is_comment_disliked(
        pool: &PgPool,
        comment_id: DbId,
        channel_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        Ok(Self::comment_reaction_of(pool, comment_id, channel_id).await?
            == Some(ReactionKind::Dislike))
    }

    /// Like and dislike totals for a comment.
    pub async fn comment_counts(
        pool: &PgPool,
        comment_id: DbId,
    ) -> Result<ReactionCounts, sqlx::Error> {
        counts(pool, COMMENT, comment_id).await
    }
}

/// Run one toggle in a transaction and return the counts it left behind.
///
/// The held row is locked with `FOR UPDATE`; a concurrent insert of the same
/// (target, channel) pair hits the primary key and is ignored.
async fn toggle(
    pool: &PgPool,
    t: ReactionTable,
    target_id: DbId,
    channel_id: DbId,
    requested: ReactionKind,
) -> Result<ToggleResult, sqlx::Error> {
    let ReactionTable {
        table,
        target_column,
    } = t;
    let mut tx = pool.begin().await?;

    let current = reaction_of(&mut *tx, t, target_id, channel_id).await?;
    let (clear_opposite, outcome) = plan_toggle(current, requested);

    let delete = format!(
        "DELETE FROM {table} WHERE {target_column} = $1 AND channel_id = $2 AND kind = $3"
    );
    if clear_opposite {
        sqlx::query(&delete)
            .bind(target_id)
            .bind(channel_id)
            .bind(requested.opposite().as_str())
            .execute(&mut *tx)
            .await?;
    }

    match outcome {
        ToggleOutcome::Removed => {
            sqlx::query(&delete)
                .bind(target_id)
                .bind(channel_id)
                .bind(requested.as_str())
                .execute(&mut *tx)
                .await?;
        }
        ToggleOutcome::Added => {
            sqlx::query(&format!(
                "INSERT INTO {table} ({target_column}, channel_id, kind) \
                 VALUES ($1, $2, $3) \
                 ON CONFLICT ({target_column}, channel_id) DO NOTHING"
            ))
            .bind(target_id)
            .bind(channel_id)
            .bind(requested.as_str())
            .execute(&mut *tx)
            .await?;
        }
    }

    let counts = counts(&mut *tx, t, target_id).await?;
    tx.commit().await?;

    tracing::info!(
        table,
        target_id,
        channel_id,
        kind = %requested,
        ?outcome,
        likes = counts.likes,
        dislikes = counts.dislikes,
        "Reaction toggled"
    );
    Ok(ToggleResult { outcome, counts })
}

async fn reaction_of<'e, E: PgExecutor<'e>>(
    executor: E,
    t: ReactionTable,
    target_id: DbId,
    channel_id: DbId,
) -> Result<Option<ReactionKind>, sqlx::Error> {
    let ReactionTable {
        table,
        target_column,
    } = t;
    let kind: Option<String> = sqlx::query_scalar(&format!(
        "SELECT kind FROM {table} WHERE {target_column} = $1 AND channel_id = $2 FOR UPDATE"
    ))
    .bind(target_id)
    .bind(channel_id)
    .fetch_optional(executor)
    .await?;

    kind.map(ReactionKind::try_from)
        .transpose()
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

async fn counts<'e, E: PgExecutor<'e>>(
    executor: E,
    t: ReactionTable,
    target_id: DbId,
) -> Result<ReactionCounts, sqlx::Error> {
    let ReactionTable {
        table,
        target_column,
    } = t;
    let (likes, dislikes): (i64, i64) = sqlx::query_as(&format!(
        "SELECT \
            COUNT(*) FILTER (WHERE kind = 'like'), \
            COUNT(*) FILTER (WHERE kind = 'dislike') \
         FROM {table} WHERE {target_column} = $1"
    ))
    .bind(target_id)
    .fetch_one(executor)
    .await?;
    Ok(ReactionCounts { likes, dislikes })
}
