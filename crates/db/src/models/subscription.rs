//! Channel-to-channel subscription model.

use serde::Serialize;
use sqlx::FromRow;
use vidshare_core::types::{DbId, Timestamp};

/// A row from the `subscriptions` table: `from_channel_id` follows `to_channel_id`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subscription {
    pub id: DbId,
    pub from_channel_id: DbId,
    pub to_channel_id: DbId,
    pub created_at: Timestamp,
}
