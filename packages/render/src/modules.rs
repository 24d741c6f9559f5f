//! # Module Blocks
//!
//! Module kinds carry configuration only. Their displayed data comes from a
//! [`ContentProvider`] at render time:
//!
//! ```text
//! render_for_display → VNode::Module { request } → resolve_modules(provider) → item list
//!                                                        ↓ (error)
//!                                                  VNode::Placeholder
//! ```
//!
//! A failing provider only affects its own block.

use mosaic_blocks::{is_safe_url, BlockKind, BlockPayload};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::VNode;

/// What a module block asks its content provider for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "kebab-case")]
pub enum ModuleRequest {
    Experiments { limit: u16 },
    CollectionGrid { collection: String, columns: u8 },
    LogList { limit: u16 },
    Guestbook { show_form: bool },
    Portfolio { limit: u16 },
    MediaList { media: String, limit: u16 },
}

impl ModuleRequest {
    /// Request for a module payload; `None` for kinds that carry their own content
    pub fn from_payload(payload: &BlockPayload) -> Option<Self> {
        let request = match payload {
            BlockPayload::Experiments(p) => ModuleRequest::Experiments { limit: p.limit },
            BlockPayload::CollectionGrid(p) => ModuleRequest::CollectionGrid {
                collection: p.collection.clone(),
                columns: p.columns,
            },
            BlockPayload::LogList(p) => ModuleRequest::LogList { limit: p.limit },
            BlockPayload::Guestbook(p) => ModuleRequest::Guestbook {
                show_form: p.show_form,
            },
            BlockPayload::Portfolio(p) => ModuleRequest::Portfolio { limit: p.limit },
            BlockPayload::MediaList(p) => ModuleRequest::MediaList {
                media: p.media.clone(),
                limit: p.limit,
            },
            _ => return None,
        };
        Some(request)
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            ModuleRequest::Experiments { .. } => BlockKind::Experiments,
            ModuleRequest::CollectionGrid { .. } => BlockKind::CollectionGrid,
            ModuleRequest::LogList { .. } => BlockKind::LogList,
            ModuleRequest::Guestbook { .. } => BlockKind::Guestbook,
            ModuleRequest::Portfolio { .. } => BlockKind::Portfolio,
            ModuleRequest::MediaList { .. } => BlockKind::MediaList,
        }
    }

    /// Maximum number of items to display, if the block sets one
    pub fn limit(&self) -> Option<usize> {
        match self {
            ModuleRequest::Experiments { limit }
            | ModuleRequest::LogList { limit }
            | ModuleRequest::Portfolio { limit }
            | ModuleRequest::MediaList { limit, .. } => Some(usize::from(*limit)),
            ModuleRequest::CollectionGrid { .. } | ModuleRequest::Guestbook { .. } => None,
        }
    }
}

/// One entry supplied by a content provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Display date, already formatted by the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl ContentItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("No provider for {0}")]
    Unsupported(BlockKind),

    #[error("Content source unavailable: {0}")]
    Unavailable(String),

    #[error("Unknown collection: {0}")]
    UnknownCollection(String),
}

/// Supplies the data displayed by module blocks
pub trait ContentProvider {
    fn resolve(&self, request: &ModuleRequest) -> Result<Vec<ContentItem>, ProviderError>;
}

/// Provider with nothing to show
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContent;

impl ContentProvider for NoContent {
    fn resolve(&self, _request: &ModuleRequest) -> Result<Vec<ContentItem>, ProviderError> {
        Ok(Vec::new())
    }
}

/// Replace every module slot in `node` with provider content
pub fn resolve_modules(node: VNode, provider: &dyn ContentProvider) -> VNode {
    match node {
        VNode::Module { request, block_id } => match provider.resolve(&request) {
            Ok(items) => module_content(&request, items),
            Err(e) => {
                tracing::warn!(
                    block_id = %block_id,
                    module = %request.kind(),
                    error = %e,
                    "content provider failed"
                );
                VNode::placeholder(request.kind().as_str(), "This content is unavailable right now.")
            }
        },
        VNode::Element {
            tag,
            attributes,
            children,
        } => VNode::Element {
            tag,
            attributes,
            children: children
                .into_iter()
                .map(|child| resolve_modules(child, provider))
                .collect(),
        },
        other => other,
    }
}

fn module_content(request: &ModuleRequest, mut items: Vec<ContentItem>) -> VNode {
    if let Some(limit) = request.limit() {
        items.truncate(limit);
    }

    let body = match request {
        ModuleRequest::CollectionGrid { columns, .. } => VNode::element("div")
            .with_class("collection-grid")
            .with_attr("style", format!("--columns: {}", (*columns).clamp(1, 6)))
            .with_children(items.iter().map(card)),
        ModuleRequest::Portfolio { .. } | ModuleRequest::MediaList { .. } => {
            VNode::element("div")
                .with_class("card-list")
                .with_children(items.iter().map(card))
        }
        ModuleRequest::Experiments { .. }
        | ModuleRequest::LogList { .. }
        | ModuleRequest::Guestbook { .. } => VNode::element("ul")
            .with_class("entry-list")
            .with_children(items.iter().map(entry)),
    };

    let mut children = Vec::new();
    if items.is_empty() {
        children.push(
            VNode::element("p")
                .with_class("module-empty")
                .with_child(VNode::text("Nothing here yet.")),
        );
    } else {
        children.push(body);
    }
    if let ModuleRequest::Guestbook { show_form: true } = request {
        children.push(guestbook_form());
    }

    VNode::element("div")
        .with_class(format!("module module-{}", request.kind()))
        .with_children(children)
}

fn entry(item: &ContentItem) -> VNode {
    let mut li = VNode::element("li").with_child(title_node(item));
    if let Some(date) = &item.date {
        li = li.with_child(
            VNode::element("time")
                .with_attr("datetime", date.clone())
                .with_child(VNode::text(date.clone())),
        );
    }
    if let Some(summary) = &item.summary {
        li = li.with_child(VNode::element("p").with_child(VNode::text(summary.clone())));
    }
    li
}

fn card(item: &ContentItem) -> VNode {
    let mut card = VNode::element("article").with_class("card");
    if let Some(image) = item.image.as_deref().filter(|src| is_linkable(src)) {
        card = card.with_child(
            VNode::element("img")
                .with_attr("src", image)
                .with_attr("alt", item.title.clone())
                .with_attr("loading", "lazy"),
        );
    }
    card = card.with_child(VNode::element("h3").with_child(title_node(item)));
    if let Some(summary) = &item.summary {
        card = card.with_child(VNode::element("p").with_child(VNode::text(summary.clone())));
    }
    card
}

fn title_node(item: &ContentItem) -> VNode {
    match item.href.as_deref().filter(|href| is_linkable(href)) {
        Some(href) => VNode::element("a")
            .with_attr("href", href)
            .with_child(VNode::text(item.title.clone())),
        None => VNode::element("span").with_child(VNode::text(item.title.clone())),
    }
}

fn is_linkable(url: &str) -> bool {
    !url.is_empty() && is_safe_url(url)
}

fn guestbook_form() -> VNode {
    VNode::element("form")
        .with_class("guestbook-form")
        .with_attr("method", "post")
        .with_attr("action", "/guestbook")
        .with_child(
            VNode::element("input")
                .with_attr("type", "text")
                .with_attr("name", "name")
                .with_attr("placeholder", "Your name"),
        )
        .with_child(
            VNode::element("textarea")
                .with_attr("name", "message")
                .with_attr("placeholder", "Say hello"),
        )
        .with_child(
            VNode::element("button")
                .with_attr("type", "submit")
                .with_child(VNode::text("Sign")),
        )
}
