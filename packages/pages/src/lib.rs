//! # Mosaic Pages
//!
//! Page aggregate, revision history and persistence.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │ PageService                                    │
//! │  - slug normalization + uniqueness             │
//! │  - snapshot-before-update                      │
//! │  - publish lifecycle                           │
//! └────────────────────────────────────────────────┘
//!          ↓                          ↓
//! ┌──────────────────────┐  ┌──────────────────────┐
//! │ PageRepository       │  │ RevisionStore        │
//! │                      │  │  → RevisionRepository│
//! └──────────────────────┘  └──────────────────────┘
//!          ↓                          ↓
//! ┌────────────────────────────────────────────────┐
//! │ MemoryStore | JsonFileStore                    │
//! └────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use mosaic_blocks::BlockEdit;
//! use mosaic_blocks::BlockKind;
//! use mosaic_pages::{MemoryStore, NewPage, OperatorContext, PageService, PageStatus};
//!
//! let service = PageService::new(Arc::new(MemoryStore::new()));
//! let ctx = OperatorContext::authenticated("admin");
//!
//! let page = service.create(&ctx, NewPage::new("About", "about"))?;
//! let insert = BlockEdit::InsertDefault { kind: BlockKind::Heading, at: None };
//! service.apply_edit(&ctx, &page.id, &insert)?;
//! let page = service.set_status(&ctx, &page.id, PageStatus::Published)?;
//!
//! assert!(page.published_at.is_some());
//! assert_eq!(service.revisions(&page.id)?.len(), 1);
//! # Ok::<(), mosaic_pages::PageError>(())
//! ```

mod clock;
mod context;
mod errors;
mod file_store;
mod memory;
mod page;
mod repository;
mod revision;
mod revisions;
mod service;
mod slug;

pub use clock::{Clock, ManualClock, SystemClock};
pub use context::OperatorContext;
pub use errors::{PageError, StorageError};
pub use file_store::JsonFileStore;
pub use memory::MemoryStore;
pub use page::{Page, PageStatus, Template};
pub use repository::{PageRepository, RevisionRepository};
pub use revision::{RestoredContent, Revision};
pub use revisions::{RevisionRetention, RevisionStore, Snapshot};
pub use service::{ContentUpdate, NewPage, PageService, PageServiceOptions};
pub use slug::normalize_slug;
