//! Error types for directory operations.

use oficios_database::DatabaseError;
use thiserror::Error;

use crate::associations::LinkKind;
use crate::validation::ValidationError;

/// Errors that can occur during directory operations.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The persistent store could not be reached or failed a query.
    /// Not retried here; retry policy belongs to the calling layer.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(#[source] DatabaseError),

    /// An operation violated a core invariant; rejected before any write
    /// was issued.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A replace-all removal was acknowledged but the reinsertion failed.
    /// Neither the old nor the new link set can be assumed to hold; the
    /// caller should prompt a resubmission.
    #[error("partial {kind} link update for worker {worker_id}: {source}")]
    PartialAssociationUpdate {
        worker_id: String,
        kind: LinkKind,
        #[source]
        source: DatabaseError,
    },

    /// Lookup by id or slug found no matching entity. Distinct from the
    /// store being unreachable.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
}

impl From<DatabaseError> for DirectoryError {
    fn from(e: DatabaseError) -> Self {
        match e {
            DatabaseError::NotFound { entity, id } => DirectoryError::NotFound { entity, id },
            other => DirectoryError::ServiceUnavailable(other),
        }
    }
}

/// Result type for directory operations.
pub type Result<T> = std::result::Result<T, DirectoryError>;
