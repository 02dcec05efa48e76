//! SQLite storage layer.
//!
//! Repository implementations backed by SQLite with WAL mode and split
//! read/write connection pools.

pub mod account;
pub mod pool;
pub mod pronoun;
pub mod pronoun_set;

use chrono::{DateTime, Utc};
use pronouns_types::error::RepositoryError;

pub(crate) fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// Classify a failed INSERT/UPDATE/DELETE by the constraint it tripped.
///
/// `subject` names the value that collided (email, slug, set name) so the
/// service can echo it back.
pub(crate) fn map_write_error(err: sqlx::Error, subject: &str) -> RepositoryError {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            RepositoryError::Conflict(subject.to_string())
        }
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            RepositoryError::ForeignKey(db_err.message().to_string())
        }
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => RepositoryError::Connection,
        e => RepositoryError::Query(e.to_string()),
    }
}

pub(crate) fn map_read_error(err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => RepositoryError::Connection,
        e => RepositoryError::Query(e.to_string()),
    }
}
