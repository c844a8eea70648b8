use model::pagination::error::TokenError;
use thiserror::Error;

/// Errors raised while building orderings, predicates or cursors.
#[derive(Debug, Error, PartialEq)]
pub enum PlanError {
    /// A field named by the active field list does not exist.
    #[error("There is no such field {field} on '{entity}'")]
    FieldNotFound { entity: String, field: String },

    /// The slot's domain type is itself optional, which cannot be compared.
    #[error("Token does not support nullable type for field {field}")]
    UnsupportedCursorType { field: String },

    /// A required argument was missing.
    #[error("{0}")]
    Argument(String),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}
