//! Channel model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vidshare_core::types::{DbId, Timestamp};

/// Path served when a channel has no avatar.
pub const DEFAULT_AVATAR_PATH: &str = "/static/web/img/avatar.png";

/// A row from the `channels` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Channel {
    pub id: DbId,
    /// The 11-character public channel id used in URLs and storage keys.
    pub public_id: String,
    pub user_id: DbId,
    pub name: String,
    pub description: String,
    pub avatar_path: Option<String>,
    pub verified: bool,
    pub last_login_at: Timestamp,
    pub created_at: Timestamp,
}

impl Channel {
    /// Avatar path, falling back to the default image.
    pub fn avatar(&self) -> &str {
        self.avatar_path.as_deref().unwrap_or(DEFAULT_AVATAR_PATH)
    }
}

/// DTO for creating a channel.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateChannel {
    pub user_id: DbId,
    pub name: String,
    pub description: Option<String>,
}

/// DTO for updating a channel. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateChannel {
    pub name: Option<String>,
    pub description: Option<String>,
    pub avatar_path: Option<String>,
    pub verified: Option<bool>,
}
