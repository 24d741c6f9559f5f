//! Error types for the editing session

use mosaic_blocks::BlockError;
use mosaic_pages::PageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("A save is already in flight")]
    SaveInFlight,

    #[error("No save is in flight")]
    NoSaveInFlight,

    #[error("Invalid slug: '{0}'")]
    InvalidSlug(String),

    #[error("Edit '{edit}' reported an unexpected outcome: {outcome}")]
    UnexpectedOutcome { edit: &'static str, outcome: String },

    #[error("Block edit failed: {0}")]
    Block(#[from] BlockError),

    #[error("Save failed: {0}")]
    Save(#[from] PageError),
}
