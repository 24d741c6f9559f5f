//! # Mosaic Editor
//!
//! Client-side editing session for one page.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ render: EditView per block                  │
//! └─────────────────────────────────────────────┘
//!                     ↑
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditingSession                      │
//! │  - Working copy of page metadata + blocks   │
//! │  - Dirty tracking                           │
//! │  - Local undo/redo                          │
//! │  - One save in flight at a time             │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ pages: PageService::update_content          │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Principles
//!
//! 1. **Server authority**: a successful save replaces the working copy
//!    with the page the service returns
//! 2. **Whole-copy saves**: every save sends all working fields at once
//! 3. **Failed edits are no-ops**: validation runs before the working copy
//!    changes
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use mosaic_blocks::{BlockKind, FieldValue};
//! use mosaic_editor::EditingSession;
//! use mosaic_pages::{MemoryStore, NewPage, OperatorContext, PageService};
//!
//! let service = PageService::new(Arc::new(MemoryStore::new()));
//! let ctx = OperatorContext::authenticated("admin");
//! let page = service.create(&ctx, NewPage::new("About", "about"))?;
//!
//! let mut session = EditingSession::open(page);
//! let id = session.insert_default(BlockKind::Heading, None)?;
//! session.update_field(&id, "text", FieldValue::text("Hello"))?;
//!
//! let saved = session.publish(&service, &ctx)?;
//! assert!(saved.is_published());
//! assert!(!session.is_dirty());
//! # Ok::<(), mosaic_editor::SessionError>(())
//! ```

mod errors;
mod session;
mod undo_stack;
mod working_copy;

pub use errors::SessionError;
pub use session::{EditingSession, SaveRequest};
pub use undo_stack::UndoStack;
pub use working_copy::WorkingCopy;
