//! # Mosaic Blocks
//!
//! Block model for Mosaic pages.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ blocks: kinds, typed payloads, block lists  │
//! │  - Closed registry of block kinds           │
//! │  - One payload type per kind                │
//! │  - Ordered list with order == index         │
//! │  - Serializable edits (insert/move/remove)  │
//! └─────────────────────────────────────────────┘
//!          ↓                          ↓
//! ┌──────────────────────┐  ┌──────────────────────┐
//! │ render: edit/display │  │ pages: aggregate,    │
//! │ dispatch, HTML       │  │ revisions, storage   │
//! └──────────────────────┘  └──────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use mosaic_blocks::{BlockEdit, BlockKind, BlockList, BlockPayload, FieldValue};
//!
//! let mut blocks = BlockList::new();
//! let id = blocks.insert(BlockPayload::heading("Hello", 1), None)?;
//!
//! BlockEdit::InsertDefault { kind: BlockKind::RichText, at: None }.apply(&mut blocks)?;
//! blocks.update_field(&id, "level", FieldValue::Number(2))?;
//!
//! assert_eq!(blocks.orders(), vec![0, 1]);
//! # Ok::<(), mosaic_blocks::BlockError>(())
//! ```

mod block;
mod edits;
mod errors;
mod field;
mod ids;
mod kind;
mod list;
mod payload;
mod registry;

pub use block::{Block, BlockContent};
pub use edits::{BlockEdit, EditOutcome};
pub use errors::{BlockError, FieldError};
pub use field::{is_safe_url, FieldSpec, FieldValue, InputKind};
pub use ids::new_id;
pub use kind::{BlockKind, Category};
pub use list::BlockList;
pub use payload::*;
pub use registry::{catalog, describe, is_known, BlockDescriptor};
