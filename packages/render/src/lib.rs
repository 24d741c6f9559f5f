//! # Mosaic Render
//!
//! Turns blocks into editing forms and display trees, and display trees
//! into HTML.
//!
//! ## Pipeline
//!
//! ```text
//! Block ──render_for_edit──→ EditView (form bound to the typed payload)
//!   │
//!   └──render_for_display──→ VNode ──resolve_modules(provider)──→ VNode ──to_html──→ String
//! ```
//!
//! Rendering never fails: unknown kinds and unavailable module content
//! become visible placeholders for the affected block only.

mod dispatch;
mod html;
mod modules;
mod page;
mod vnode;

pub use dispatch::{
    render_for_display, render_for_edit, BlockForm, EditView, FieldControl, UnknownBlock,
};
pub use html::{escape_html, to_html, to_html_fragment, HtmlOptions};
pub use modules::{
    resolve_modules, ContentItem, ContentProvider, ModuleRequest, NoContent, ProviderError,
};
pub use page::{render_document, render_page, RenderedPage, SiteRenderer, SiteResponse};
pub use vnode::VNode;
