//! Comment model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vidshare_core::text::escape_markup;
use vidshare_core::types::{DbId, Timestamp};

/// A row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub author_id: DbId,
    pub video_id: DbId,
    pub parent_id: Option<DbId>,
    pub text: String,
    pub created_at: Timestamp,
}

impl Comment {
    /// Comment text with markup escaped for display.
    pub fn sanitized_text(&self) -> String {
        escape_markup(&self.text)
    }
}

/// DTO for posting a comment or a reply.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateComment {
    pub author_id: DbId,
    pub video_id: DbId,
    pub parent_id: Option<DbId>,
    pub text: String,
}
