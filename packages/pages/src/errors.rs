//! Error types for pages, revisions and storage

use std::path::PathBuf;

use mosaic_blocks::{BlockError, FieldError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("Slug already in use: '{0}'")]
    DuplicateSlug(String),

    #[error("Invalid slug: '{0}'")]
    InvalidSlug(String),

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Revision {revision_id} not found for page {page_id}")]
    RevisionNotFound { page_id: String, revision_id: String },

    #[error("Index {index} out of range for {len} blocks")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Unknown block kind: {0}")]
    UnknownKind(String),

    #[error("Block not found: {0}")]
    BlockNotFound(String),

    #[error("Field error: {0}")]
    Field(#[from] FieldError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<BlockError> for PageError {
    fn from(e: BlockError) -> Self {
        match e {
            BlockError::UnknownKind(kind) => PageError::UnknownKind(kind),
            BlockError::IndexOutOfRange { index, len } => PageError::IndexOutOfRange { index, len },
            BlockError::BlockNotFound(id) => PageError::BlockNotFound(id),
            BlockError::Field(e) => PageError::Field(e),
        }
    }
}

impl PageError {
    /// Caller mistakes, as opposed to storage failures
    pub fn is_validation(&self) -> bool {
        !matches!(self, PageError::Storage(_))
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Corrupt document at {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("Id cannot be used as a file name: '{0}'")]
    InvalidId(String),
}
