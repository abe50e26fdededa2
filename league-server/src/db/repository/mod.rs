//! Repository Module
//!
//! SQLite access for the discipline engine. Functions are free `async fn`s
//! taking any sqlx executor, so the same query runs against the pool (read
//! path) or inside a recalculation transaction (`&mut *tx`).

// Reference data (fixture / roster / match event collaborators)
pub mod card_event;
pub mod fixture;
pub mod roster;
pub mod season;

// Discipline state
pub mod card_summary;
pub mod suspension;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepoError::NotFound("row not found".into()),
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.message().to_string())
            }
            other => RepoError::Database(other.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
