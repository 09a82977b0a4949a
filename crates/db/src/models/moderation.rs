//! Strike and report models.
//!
//! Video and comment variants share their common columns through the
//! embedded [`StrikeDetails`] and [`TicketDetails`] structs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vidshare_core::moderation::{StrikeCategory, TicketReason, TicketStatus};
use vidshare_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Strikes
// ---------------------------------------------------------------------------

/// Columns common to every strike.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StrikeDetails {
    /// The penalised channel.
    pub channel_id: DbId,
    #[sqlx(try_from = "String")]
    pub category: StrikeCategory,
    pub created_at: Timestamp,
}

/// A row from the `video_strikes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VideoStrike {
    pub id: DbId,
    pub video_id: DbId,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub details: StrikeDetails,
}

/// A row from the `comment_strikes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommentStrike {
    pub id: DbId,
    pub comment_id: DbId,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub details: StrikeDetails,
}

// ---------------------------------------------------------------------------
// Tickets
// ---------------------------------------------------------------------------

/// Columns common to every report.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TicketDetails {
    #[sqlx(try_from = "String")]
    pub status: TicketStatus,
    #[sqlx(try_from = "String")]
    pub reason: TicketReason,
    /// The reporting channel; `None` once that channel is deleted.
    pub reporter_channel_id: Option<DbId>,
    pub body: String,
    pub created_at: Timestamp,
}

/// A row from the `video_tickets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VideoTicket {
    pub id: DbId,
    pub video_id: DbId,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub details: TicketDetails,
}

/// A row from the `comment_tickets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommentTicket {
    pub id: DbId,
    pub comment_id: DbId,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub details: TicketDetails,
}

/// DTO for filing a report against a video or a comment.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTicket {
    pub reason: TicketReason,
    pub reporter_channel_id: Option<DbId>,
    pub body: Option<String>,
}
