//! Error types for thesis-db.
//!
//! [`DatabaseError`] covers storage failures. [`WorkflowError`] is what every
//! service operation returns: the taxonomy the boundary layer maps to
//! protocol responses (404 / 409 / 400).

use thesis_core::checklist::Checklist;
use thesis_core::errors::CoreError;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or returned unparseable data.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    /// Whether the error is a UNIQUE constraint violation.
    #[must_use]
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::LibSql(e) => e.to_string().contains("UNIQUE constraint failed"),
            _ => false,
        }
    }
}

/// Errors returned by workflow operations.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Thesis, jury seat, author, advisor or document absent.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The thesis is not in a status that allows the operation, or is deleted.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The requirement checklist failed. Carries every item for display.
    #[error("Requirements not met for {}: {}", checklist.kind, checklist.unmet_summary())]
    RequirementsNotMet { checklist: Checklist },

    /// A uniqueness rule would be violated, or a concurrent writer won.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Malformed input.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Database(DatabaseError),
}

impl WorkflowError {
    pub(crate) fn not_found(entity: &str, id: &str) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }
}

impl From<DatabaseError> for WorkflowError {
    fn from(err: DatabaseError) -> Self {
        if err.is_unique_violation() {
            return Self::Conflict(err.to_string());
        }
        Self::Database(err)
    }
}

impl From<libsql::Error> for WorkflowError {
    fn from(err: libsql::Error) -> Self {
        DatabaseError::from(err).into()
    }
}

impl From<CoreError> for WorkflowError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { entity_type, id } => Self::NotFound {
                entity: entity_type,
                id,
            },
            CoreError::InvalidTransition { .. } => Self::InvalidState(err.to_string()),
            CoreError::Conflict(msg) => Self::Conflict(msg),
            CoreError::Validation(msg) => Self::Validation(msg),
        }
    }
}
