//! # Block Dispatch
//!
//! Turns one block into either its display tree or its editing form.
//!
//! Both directions are exhaustive matches over [`BlockPayload`], so a new
//! kind does not compile until it renders both ways. Blocks stored under a
//! kind the registry no longer knows render as a visible placeholder in
//! display mode and as a raw, deletable entry in edit mode.

use mosaic_blocks::{
    is_safe_url, Block, BlockContent, BlockKind, BlockPayload, Category, FieldSpec, FieldValue,
    GalleryImage,
};
use serde::Serialize;

use crate::{ModuleRequest, VNode};

/// Editing representation of one block
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum EditView {
    Form(BlockForm),
    Unknown(UnknownBlock),
}

/// Fixed form for a known block kind
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockForm {
    pub block_id: String,
    pub kind: BlockKind,
    pub label: &'static str,
    pub category: Category,
    pub order: u32,
    pub fields: Vec<FieldControl>,
    /// Display rendering shown next to the form
    pub preview: VNode,
}

/// One form input bound to the block's current value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldControl {
    pub spec: FieldSpec,
    pub value: FieldValue,
}

/// Block the registry cannot interpret; kept inspectable and deletable
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnknownBlock {
    pub block_id: String,
    pub kind: String,
    pub order: u32,
    pub payload: serde_json::Value,
    pub message: String,
}

impl EditView {
    pub fn block_id(&self) -> &str {
        match self {
            EditView::Form(form) => &form.block_id,
            EditView::Unknown(unknown) => &unknown.block_id,
        }
    }
}

impl BlockForm {
    pub fn field(&self, name: &str) -> Option<&FieldControl> {
        self.fields.iter().find(|control| control.spec.name == name)
    }
}

/// Display tree for one block, wrapped in its `<section>`
pub fn render_for_display(block: &Block) -> VNode {
    let body = match &block.content {
        BlockContent::Known(payload) => display_payload(payload, &block.id),
        BlockContent::Unknown { kind, .. } => {
            tracing::warn!(block_id = %block.id, kind = %kind, "unknown block kind");
            VNode::placeholder(kind.clone(), format!("Unknown block kind \"{}\"", kind))
        }
    };

    VNode::element("section")
        .with_class(format!("block block-{}", css_ident(block.kind_name())))
        .with_attr("data-block-id", block.id.clone())
        .with_child(body)
}

/// Editing form for one block
pub fn render_for_edit(block: &Block) -> EditView {
    match &block.content {
        BlockContent::Known(payload) => {
            let kind = payload.kind();
            let fields = kind
                .fields()
                .iter()
                .map(|spec| FieldControl {
                    spec: *spec,
                    value: payload
                        .field_value(spec.name)
                        .unwrap_or_else(|| FieldValue::text("")),
                })
                .collect();

            EditView::Form(BlockForm {
                block_id: block.id.clone(),
                kind,
                label: kind.label(),
                category: kind.category(),
                order: block.order,
                fields,
                preview: render_for_display(block),
            })
        }
        BlockContent::Unknown { kind, payload } => EditView::Unknown(UnknownBlock {
            block_id: block.id.clone(),
            kind: kind.clone(),
            order: block.order,
            payload: payload.clone(),
            message: format!(
                "\"{}\" is not a known block kind. It can be removed but not edited.",
                kind
            ),
        }),
    }
}

fn display_payload(payload: &BlockPayload, block_id: &str) -> VNode {
    match payload {
        BlockPayload::Heading(p) => VNode::element(format!("h{}", p.level.clamp(1, 6)))
            .with_child(VNode::text(p.text.clone())),

        BlockPayload::RichText(p) => VNode::element("div")
            .with_class("rich-text")
            .with_child(VNode::html(p.html.clone())),

        BlockPayload::Image(p) => {
            if !is_safe_url(&p.src) || p.src.is_empty() {
                return VNode::placeholder("image", "Image has no valid source");
            }
            let image = GalleryImage {
                src: p.src.clone(),
                alt: p.alt.clone(),
                caption: p.caption.clone(),
            };
            figure(&image).with_class("image")
        }

        BlockPayload::Quote(p) => {
            let mut quote = VNode::element("blockquote")
                .with_child(VNode::element("p").with_child(VNode::text(p.text.clone())));
            if let Some(attribution) = &p.attribution {
                quote = quote.with_child(
                    VNode::element("footer")
                        .with_child(VNode::element("cite").with_child(VNode::text(attribution.clone()))),
                );
            }
            quote
        }

        BlockPayload::Code(p) => {
            let mut code = VNode::element("code").with_child(VNode::text(p.code.clone()));
            if !p.language.is_empty() {
                code = code.with_class(format!("language-{}", css_ident(&p.language)));
            }
            VNode::element("pre").with_child(code)
        }

        BlockPayload::Gallery(p) => VNode::element("div").with_class("gallery").with_children(
            p.images
                .iter()
                .filter(|image| !image.src.is_empty() && is_safe_url(&image.src))
                .map(figure),
        ),

        BlockPayload::Button(p) => {
            let href = if is_safe_url(&p.href) { p.href.as_str() } else { "#" };
            VNode::element("a")
                .with_class("button")
                .with_attr("href", href)
                .with_child(VNode::text(p.label.clone()))
        }

        BlockPayload::Embed(p) => {
            if p.url.is_empty() || !is_safe_url(&p.url) {
                return VNode::placeholder("embed", "Embed has no valid URL");
            }
            let mut frame = VNode::element("iframe")
                .with_attr("src", p.url.clone())
                .with_attr("loading", "lazy")
                .with_attr("allowfullscreen", "true");
            if let Some(title) = &p.title {
                frame = frame.with_attr("title", title.clone());
            }
            VNode::element("div").with_class("embed").with_child(frame)
        }

        BlockPayload::Divider(_) => VNode::element("hr"),

        BlockPayload::Spacer(p) => VNode::element("div")
            .with_class("spacer")
            .with_attr("aria-hidden", "true")
            .with_attr("style", format!("height: {}px", p.height)),

        BlockPayload::Columns(p) => VNode::element("div")
            .with_class("columns")
            .with_child(
                VNode::element("div")
                    .with_class("column")
                    .with_child(VNode::html(p.left.clone())),
            )
            .with_child(
                VNode::element("div")
                    .with_class("column")
                    .with_child(VNode::html(p.right.clone())),
            ),

        BlockPayload::Callout(p) => VNode::element("aside")
            .with_class(format!("callout callout-{}", p.tone.as_str()))
            .with_attr("role", "note")
            .with_child(VNode::element("p").with_child(VNode::text(p.text.clone()))),

        BlockPayload::Experiments(_)
        | BlockPayload::CollectionGrid(_)
        | BlockPayload::LogList(_)
        | BlockPayload::Guestbook(_)
        | BlockPayload::Portfolio(_)
        | BlockPayload::MediaList(_) => match ModuleRequest::from_payload(payload) {
            Some(request) => VNode::Module {
                request,
                block_id: block_id.to_string(),
            },
            None => VNode::placeholder(payload.kind().as_str(), "Module is not configured"),
        },
    }
}

fn figure(image: &GalleryImage) -> VNode {
    let mut figure = VNode::element("figure").with_child(
        VNode::element("img")
            .with_attr("src", image.src.clone())
            .with_attr("alt", image.alt.clone())
            .with_attr("loading", "lazy"),
    );
    if let Some(caption) = &image.caption {
        figure = figure.with_child(VNode::element("figcaption").with_child(VNode::text(caption.clone())));
    }
    figure
}

/// Class-safe form of a kind or language name
fn css_ident(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}
