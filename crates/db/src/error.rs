use vidshare_core::error::CoreError;

/// PostgreSQL SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Error type for repository operations that validate input before querying.
///
/// Plain lookups and writes return `sqlx::Error` directly.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A domain-level error from `vidshare_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience alias for validating repository methods.
pub type DbResult<T> = Result<T, DbError>;

/// Whether `err` is a unique constraint violation, optionally on a specific
/// constraint.
pub fn is_unique_violation(err: &sqlx::Error, constraint: Option<&str>) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
                && constraint.map_or(true, |name| db_err.constraint() == Some(name))
        }
        _ => false,
    }
}

/// Map a unique violation on `constraint` to [`CoreError::Conflict`].
pub(crate) fn conflict_on(err: sqlx::Error, constraint: &str, message: &str) -> DbError {
    if is_unique_violation(&err, Some(constraint)) {
        DbError::Core(CoreError::Conflict(message.to_string()))
    } else {
        DbError::Database(err)
    }
}
