//! Notification model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vidshare_core::error::CoreError;
use vidshare_core::notification::{ContentRef, NotificationKind};
use vidshare_core::types::{DbId, Timestamp};

/// A notification with its action and target decoded into typed references.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub kind: NotificationKind,
    pub recipient_user_id: DbId,
    pub actor_channel_id: DbId,
    pub action: ContentRef,
    pub target: ContentRef,
    pub unread: bool,
    pub created_at: Timestamp,
}

/// A raw row from the `notifications` table.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct NotificationRow {
    pub id: DbId,
    pub kind: String,
    pub recipient_user_id: DbId,
    pub actor_channel_id: DbId,
    pub action_kind: String,
    pub action_id: DbId,
    pub target_kind: String,
    pub target_id: DbId,
    pub unread: bool,
    pub created_at: Timestamp,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = CoreError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            kind: NotificationKind::from_str_db(&row.kind)?,
            recipient_user_id: row.recipient_user_id,
            actor_channel_id: row.actor_channel_id,
            action: ContentRef::from_parts(&row.action_kind, row.action_id)?,
            target: ContentRef::from_parts(&row.target_kind, row.target_id)?,
            unread: row.unread,
            created_at: row.created_at,
        })
    }
}

/// DTO for creating a notification.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNotification {
    pub kind: NotificationKind,
    pub recipient_user_id: DbId,
    pub actor_channel_id: DbId,
    pub action: ContentRef,
    pub target: ContentRef,
}
