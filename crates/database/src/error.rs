//! Error types for the persistence layer.

use thiserror::Error;

/// Errors that can occur while talking to the store.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The underlying SQLx call failed, whether the connection, the
    /// statement, or row decoding. Callers treat this as the store being
    /// unavailable; no retry happens at this layer.
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Schema migration failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// No row for the requested worker, trade, city, or review. Lookups
    /// by id and by slug both report this; it is distinct from the store
    /// being unreachable.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// An insert collided with an existing row, e.g. a worker id that is
    /// already registered or a seeded catalog entry inserted twice.
    #[error("{entity} already exists: {id}")]
    AlreadyExists { entity: &'static str, id: String },
}

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, DatabaseError>;
