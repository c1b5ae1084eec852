//! PostgreSQL repository implementations.

pub mod guest;
pub mod post;
pub mod principal;

pub use guest::PgGuestRepository;
pub use post::PgPostRepository;
pub use principal::PgPrincipalRepository;

/// SQLSTATE for `unique_violation`.
pub(crate) const UNIQUE_VIOLATION: &str = "23505";

/// SQLSTATE for `foreign_key_violation`.
pub(crate) const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Return the violated constraint name if `err` is a unique violation.
pub(crate) fn unique_violation(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            Some(db_err.constraint().unwrap_or_default().to_string())
        }
        _ => None,
    }
}

/// Whether `err` is a foreign key violation.
pub(crate) fn foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION)
    )
}
