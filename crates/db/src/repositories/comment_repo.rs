//! Repository for the `comments` table.

use sqlx::PgPool;
use vidshare_core::error::CoreError;
use vidshare_core::text::validate_comment_text;
use vidshare_core::types::DbId;

use crate::error::DbResult;
use crate::models::comment::{Comment, CreateComment};

/// Column list for `comments` queries.
const COLUMNS: &str = "id, author_id, video_id, parent_id, text, created_at";

/// Provides CRUD operations for comments and replies.
pub struct CommentRepo;

impl CommentRepo {
    /// Post a comment, or a reply when `parent_id` is set.
    ///
    /// Surrounding whitespace is trimmed before storing; escape the text with
    /// [`Comment::sanitized_text`] for display. A reply must point at a
    /// comment on the same video.
    pub async fn create(pool: &PgPool, input: &CreateComment) -> DbResult<Comment> {
        let text = input.text.trim();
        validate_comment_text(text)?;

        if let Some(parent_id) = input.parent_id {
            let parent = Self::find_by_id(pool, parent_id).await?.ok_or(CoreError::NotFound {
                entity: "comment",
                id: parent_id,
            })?;
            if parent.video_id != input.video_id {
                return Err(CoreError::Validation(
                    "A reply must belong to the same video as its parent".into(),
                )
                .into());
            }
        }

        let query = format!(
            "INSERT INTO comments (author_id, video_id, parent_id, text) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        let comment = sqlx::query_as::<_, Comment>(&query)
            .bind(input.author_id)
            .bind(input.video_id)
            .bind(input.parent_id)
            .bind(text)
            .fetch_one(pool)
            .await?;
        Ok(comment)
    }

    /// Find a comment by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Top-level comments on a video, newest first.
    pub async fn list_for_video(pool: &PgPool, video_id: DbId) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments \
             WHERE video_id = $1 AND parent_id IS NULL \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(video_id)
            .fetch_all(pool)
            .await
    }

    /// Replies to a comment, oldest first.
    pub async fn list_replies(pool: &PgPool, parent_id: DbId) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments \
             WHERE parent_id = $1 \
             ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(parent_id)
            .fetch_all(pool)
            .await
    }

    /// Number of comments on a video, replies included.
    pub async fn count_for_video(pool: &PgPool, video_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE video_id = $1")
            .bind(video_id)
            .fetch_one(pool)
            .await
    }

    /// Delete a comment and its replies. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
