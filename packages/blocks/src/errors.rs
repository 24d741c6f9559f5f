//! Error types for blocks and payload fields

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BlockError {
    #[error("Unknown block kind: {0}")]
    UnknownKind(String),

    #[error("Index {index} out of range for {len} blocks")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Block not found: {0}")]
    BlockNotFound(String),

    #[error("Field error: {0}")]
    Field(#[from] FieldError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("Block kind '{kind}' has no field '{field}'")]
    UnknownField { kind: String, field: String },

    #[error("Field '{field}' expects a {expected} value")]
    TypeMismatch { field: String, expected: &'static str },

    #[error("Field '{field}' must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        value: i64,
    },

    #[error("Field '{field}' does not accept '{value}'")]
    InvalidValue { field: String, value: String },

    #[error("Block of kind '{0}' cannot be edited")]
    NotEditable(String),
}
