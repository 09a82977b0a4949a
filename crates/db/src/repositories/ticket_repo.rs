//! Repository for the `video_tickets` and `comment_tickets` tables.

use sqlx::PgPool;
use vidshare_core::moderation::{validate_ticket_body, TicketStatus};
use vidshare_core::types::DbId;

use crate::error::DbResult;
use crate::models::moderation::{CommentTicket, CreateTicket, VideoTicket};

/// Columns shared by both ticket tables, after the target column.
const DETAIL_COLUMNS: &str = "status, reason, reporter_channel_id, body, created_at";

/// Provides report filing and review operations.
pub struct TicketRepo;

impl TicketRepo {
    /// File a report against a video. Tickets start open.
    pub async fn open_for_video(
        pool: &PgPool,
        video_id: DbId,
        input: &CreateTicket,
    ) -> DbResult<VideoTicket> {
        let body = input.body.as_deref().unwrap_or_default();
        validate_ticket_body(body)?;

        let query = format!(
            "INSERT INTO video_tickets (video_id, reason, reporter_channel_id, body) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, video_id, {DETAIL_COLUMNS}"
        );
        let ticket = sqlx::query_as::<_, VideoTicket>(&query)
            .bind(video_id)
            .bind(input.reason.as_str())
            .bind(input.reporter_channel_id)
            .bind(body)
            .fetch_one(pool)
            .await?;

        tracing::info!(ticket_id = ticket.id, video_id, reason = %input.reason, "Video reported");
        Ok(ticket)
    }

    /// File a report against a comment. Tickets start open.
    pub async fn open_for_comment(
        pool: &PgPool,
        comment_id: DbId,
        input: &CreateTicket,
    ) -> DbResult<CommentTicket> {
        let body = input.body.as_deref().unwrap_or_default();
        validate_ticket_body(body)?;

        let query = format!(
            "INSERT INTO comment_tickets (comment_id, reason, reporter_channel_id, body) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, comment_id, {DETAIL_COLUMNS}"
        );
        let ticket = sqlx::query_as::<_, CommentTicket>(&query)
            .bind(comment_id)
            .bind(input.reason.as_str())
            .bind(input.reporter_channel_id)
            .bind(body)
            .fetch_one(pool)
            .await?;

        tracing::info!(ticket_id = ticket.id, comment_id, reason = %input.reason, "Comment reported");
        Ok(ticket)
    }

    /// Video tickets with the given status, oldest first.
    pub async fn list_video_tickets(
        pool: &PgPool,
        status: TicketStatus,
    ) -> Result<Vec<VideoTicket>, sqlx::Error> {
        let query = format!(
            "SELECT id, video_id, {DETAIL_COLUMNS} FROM video_tickets \
             WHERE status = $1 \
             ORDER BY created_at, id"
        );
        sqlx::query_as::<_, VideoTicket>(&query)
            .bind(status.as_str())
            .fetch_all(pool)
            .await
    }

    /// Comment tickets with the given status, oldest first.
    pub async fn list_comment_tickets(
        pool: &PgPool,
        status: TicketStatus,
    ) -> Result<Vec<CommentTicket>, sqlx::Error> {
        let query = format!(
            "SELECT id, comment_id, {DETAIL_COLUMNS} FROM comment_tickets \
             WHERE status = $1 \
             ORDER BY created_at, id"
        );
        sqlx::query_as::<_, CommentTicket>(&query)
            .bind(status.as_str())
            .fetch_all(pool)
            .await
    }

    /// Open video tickets awaiting review.
    pub async fn list_open_video_tickets(pool: &PgPool) -> Result<Vec<VideoTicket>, sqlx::Error> {
        Self::list_video_tickets(pool, TicketStatus::Open).await
    }

    /// Video tickets that have been reviewed.
    pub async fn list_closed_video_tickets(
        pool: &PgPool,
    ) -> Result<Vec<VideoTicket>, sqlx::Error> {
        Self::list_video_tickets(pool, TicketStatus::Closed).await
    }

    /// Open comment tickets awaiting review.
    pub async fn list_open_comment_tickets(
        pool: &PgPool,
    ) -> Result<Vec<CommentTicket>, sqlx::Error> {
        Self::list_comment_tickets(pool, TicketStatus::Open).await
    }

    /// Comment tickets that have been reviewed.
    pub async fn list_closed_comment_tickets(
        pool: &PgPool,
    ) -> Result<Vec<CommentTicket>, sqlx::Error> {
        Self::list_comment_tickets(pool, TicketStatus::Closed).await
    }

    /// Close an open video ticket.
    ///
    /// Returns `true` if the ticket existed and was open.
    pub async fn close_video_ticket(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        close(pool, "video_tickets", id).await
    }

    /// Close an open comment ticket.
    ///
    /// Returns `true` if the ticket existed and was open.
    pub async fn close_comment_ticket(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        close(pool, "comment_tickets", id).await
    }
}

async fn close(pool: &PgPool, table: &str, id: DbId) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(&format!(
        "UPDATE {table} SET status = $2 WHERE id = $1 AND status = $3"
    ))
    .bind(id)
    .bind(TicketStatus::Closed.as_str())
    .bind(TicketStatus::Open.as_str())
    .execute(pool)
    .await?;

    let closed = result.rows_affected() > 0;
    if closed {
        tracing::info!(table, ticket_id = id, "Ticket closed");
    }
    Ok(closed)
}
