//! User account model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vidshare_core::types::{DbId, Timestamp};

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email_confirmed: bool,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub banned: bool,
    pub banned_at: Option<Timestamp>,
    pub notes: String,
    pub ip_address: Option<String>,
    pub last_login_at: Timestamp,
    pub created_at: Timestamp,
}

/// DTO for creating a new user. The password must already be hashed.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub password_hash: String,
}
