use crate::core::data_type::DataType;
use thiserror::Error;

/// Errors raised while declaring or populating a keyset token.
#[derive(Debug, Error, PartialEq)]
pub enum TokenError {
    /// The token type declares a field that is not a key slot, or no slot at all.
    #[error("Invalid token shape for '{token}': {reason}")]
    Shape { token: String, reason: String },

    /// No slot with this name is declared on the token type.
    #[error("There is no such field {field} on token '{token}'")]
    FieldNotFound { token: String, field: String },

    /// The value does not belong to the slot's domain type.
    #[error("Field {field} expects a value of type {expected}, got {got}")]
    TypeMismatch {
        field: String,
        expected: DataType,
        got: String,
    },
}

/// Errors raised when validating paging configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Page size {size} is out of range ({min}..={max})")]
    PageSizeOutOfRange { size: usize, min: usize, max: usize },

    #[error("Invalid sort direction: {0}")]
    InvalidSortDirection(String),
}
