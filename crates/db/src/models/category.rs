//! Video category model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vidshare_core::types::DbId;

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategory {
    pub title: String,
    pub slug: String,
    pub icon: Option<String>,
}
