//! Cross-cutting error types for the thesis workflow.
//!
//! Storage-specific errors live in `thesis-db`. The workflow taxonomy that the
//! boundary layer renders (`NotFound`, `InvalidState`, `RequirementsNotMet`,
//! `Conflict`, `Validation`) is `thesis_db::error::WorkflowError`, which
//! absorbs these via `From`.

use thiserror::Error;

/// Errors raised by the pure workflow rules.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A transition was attempted from a status that does not allow it.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// A uniqueness rule would be violated (duplicate seat, duplicate role).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Input failed validation (unknown enum value, missing text).
    #[error("Validation error: {0}")]
    Validation(String),
}
