//! Repository for the `users` table.

use sqlx::PgPool;
use vidshare_core::error::CoreError;
use vidshare_core::text::{normalize_email, validate_credentials};
use vidshare_core::types::DbId;

use crate::error::{conflict_on, DbResult};
use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, email_confirmed, is_active, is_staff, \
                       is_superuser, banned, banned_at, notes, ip_address, last_login_at, created_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a regular user, returning the created row.
    ///
    /// The email domain is lower-cased before storage. A duplicate email is a
    /// [`CoreError::Conflict`].
    pub async fn create(pool: &PgPool, input: &CreateUser) -> DbResult<User> {
        Self::insert(pool, input, false, false).await
    }

    /// Insert a staff user.
    pub async fn create_staff(pool: &PgPool, input: &CreateUser) -> DbResult<User> {
        Self::insert(pool, input, true, false).await
    }

    /// Insert a user with both staff and superuser rights.
    pub async fn create_superuser(pool: &PgPool, input: &CreateUser) -> DbResult<User> {
        Self::insert(pool, input, true, true).await
    }

    async fn insert(
        pool: &PgPool,
        input: &CreateUser,
        is_staff: bool,
        is_superuser: bool,
    ) -> DbResult<User> {
        validate_credentials(&input.email, &input.password_hash)?;
        let email = normalize_email(&input.email);

        let query = format!(
            "INSERT INTO users (email, password_hash, is_staff, is_superuser) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&email)
            .bind(&input.password_hash)
            .bind(is_staff)
            .bind(is_superuser)
            .fetch_one(pool)
            .await
            .map_err(|e| conflict_on(e, "uq_users_email", "A user with this email already exists"))
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch a user that must exist.
    pub async fn get(pool: &PgPool, id: DbId) -> DbResult<User> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or(CoreError::NotFound { entity: "user", id }.into())
    }

    /// Find a user by email. The domain part is matched case-insensitively.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(normalize_email(email))
            .fetch_optional(pool)
            .await
    }

    /// Ban a user, hiding every video of every channel they own.
    ///
    /// Returns `true` if the user was not already banned.
    pub async fn ban(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET banned = true, banned_at = NOW() WHERE id = $1 AND banned = false",
        )
        .bind(id)
        .execute(pool)
        .await?;

        let banned = result.rows_affected() > 0;
        if banned {
            tracing::info!(user_id = id, "User banned");
        }
        Ok(banned)
    }

    /// Record a successful login: set `last_login_at` to now and remember the
    /// client address.
    pub async fn record_login(
        pool: &PgPool,
        id: DbId,
        ip_address: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login_at = NOW(), ip_address = $2 WHERE id = $1")
            .bind(id)
            .bind(ip_address)
            .execute(pool)
            .await?;
        Ok(())
    }
}
