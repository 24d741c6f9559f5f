//! # Block Registry
//!
//! Static description of every block kind: label, description, category,
//! editing form and the payload a freshly inserted block starts with.
//! The set is fixed at build time; there is no runtime registration.

use serde::Serialize;

use crate::field::{FieldSpec, InputKind};
use crate::payload::*;
use crate::{BlockError, BlockKind, BlockPayload, Category};

/// Everything the authoring surface needs to know about a kind
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockDescriptor {
    pub kind: BlockKind,
    pub label: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub fields: &'static [FieldSpec],
    pub default_payload: BlockPayload,
}

const fn field(name: &'static str, label: &'static str, input: InputKind) -> FieldSpec {
    FieldSpec {
        name,
        label,
        input,
        optional: false,
    }
}

const fn optional(name: &'static str, label: &'static str, input: InputKind) -> FieldSpec {
    FieldSpec {
        name,
        label,
        input,
        optional: true,
    }
}

const LIMIT: InputKind = InputKind::Number { min: 1, max: 50 };

const HEADING_FIELDS: &[FieldSpec] = &[
    field("text", "Text", InputKind::Text),
    field("level", "Level", InputKind::Number { min: 1, max: 6 }),
];
const RICH_TEXT_FIELDS: &[FieldSpec] = &[field("html", "Content", InputKind::Html)];
const IMAGE_FIELDS: &[FieldSpec] = &[
    field("src", "Image", InputKind::Url),
    field("alt", "Alt text", InputKind::Text),
    optional("caption", "Caption", InputKind::Text),
];
const QUOTE_FIELDS: &[FieldSpec] = &[
    field("text", "Quote", InputKind::Multiline),
    optional("attribution", "Attribution", InputKind::Text),
];
const CODE_FIELDS: &[FieldSpec] = &[
    field("language", "Language", InputKind::Text),
    field("code", "Code", InputKind::Multiline),
];
const GALLERY_FIELDS: &[FieldSpec] = &[field("images", "Images", InputKind::Images)];
const BUTTON_FIELDS: &[FieldSpec] = &[
    field("label", "Label", InputKind::Text),
    field("href", "Link", InputKind::Url),
];
const EMBED_FIELDS: &[FieldSpec] = &[
    field("url", "URL", InputKind::Url),
    optional("title", "Title", InputKind::Text),
];
const SPACER_FIELDS: &[FieldSpec] = &[field(
    "height",
    "Height (px)",
    InputKind::Number { min: 0, max: 512 },
)];
const COLUMNS_FIELDS: &[FieldSpec] = &[
    field("left", "Left column", InputKind::Html),
    field("right", "Right column", InputKind::Html),
];
const CALLOUT_FIELDS: &[FieldSpec] = &[
    field(
        "tone",
        "Tone",
        InputKind::Choice {
            options: CalloutTone::OPTIONS,
        },
    ),
    field("text", "Text", InputKind::Multiline),
];
const LIMIT_FIELDS: &[FieldSpec] = &[field("limit", "Items shown", LIMIT)];
const COLLECTION_GRID_FIELDS: &[FieldSpec] = &[
    field("collection", "Collection", InputKind::Text),
    field("columns", "Columns", InputKind::Number { min: 1, max: 6 }),
];
const GUESTBOOK_FIELDS: &[FieldSpec] = &[field("show_form", "Show entry form", InputKind::Toggle)];
const MEDIA_LIST_FIELDS: &[FieldSpec] = &[
    field(
        "media",
        "Media type",
        InputKind::Choice {
            options: &["all", "photo", "video", "audio"],
        },
    ),
    field("limit", "Items shown", LIMIT),
];

impl BlockKind {
    /// Editing form for this kind
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            BlockKind::Heading => HEADING_FIELDS,
            BlockKind::RichText => RICH_TEXT_FIELDS,
            BlockKind::Image => IMAGE_FIELDS,
            BlockKind::Quote => QUOTE_FIELDS,
            BlockKind::Code => CODE_FIELDS,
            BlockKind::Gallery => GALLERY_FIELDS,
            BlockKind::Button => BUTTON_FIELDS,
            BlockKind::Embed => EMBED_FIELDS,
            BlockKind::Divider => &[],
            BlockKind::Spacer => SPACER_FIELDS,
            BlockKind::Columns => COLUMNS_FIELDS,
            BlockKind::Callout => CALLOUT_FIELDS,
            BlockKind::Experiments | BlockKind::LogList | BlockKind::Portfolio => LIMIT_FIELDS,
            BlockKind::CollectionGrid => COLLECTION_GRID_FIELDS,
            BlockKind::Guestbook => GUESTBOOK_FIELDS,
            BlockKind::MediaList => MEDIA_LIST_FIELDS,
        }
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|f| f.name == name)
    }

    /// Payload used when a block of this kind is freshly inserted
    pub fn default_payload(&self) -> BlockPayload {
        match self {
            BlockKind::Heading => BlockPayload::heading("Heading", 2),
            BlockKind::RichText => BlockPayload::rich_text("<p></p>"),
            BlockKind::Image => BlockPayload::Image(ImagePayload {
                src: String::new(),
                alt: String::new(),
                caption: None,
            }),
            BlockKind::Quote => BlockPayload::Quote(QuotePayload {
                text: String::new(),
                attribution: None,
            }),
            BlockKind::Code => BlockPayload::Code(CodePayload {
                language: "text".to_string(),
                code: String::new(),
            }),
            BlockKind::Gallery => BlockPayload::Gallery(GalleryPayload { images: Vec::new() }),
            BlockKind::Button => BlockPayload::Button(ButtonPayload {
                label: "Learn more".to_string(),
                href: "/".to_string(),
            }),
            BlockKind::Embed => BlockPayload::Embed(EmbedPayload {
                url: String::new(),
                title: None,
            }),
            BlockKind::Divider => BlockPayload::Divider(DividerPayload {}),
            BlockKind::Spacer => BlockPayload::Spacer(SpacerPayload { height: 32 }),
            BlockKind::Columns => BlockPayload::Columns(ColumnsPayload {
                left: "<p></p>".to_string(),
                right: "<p></p>".to_string(),
            }),
            BlockKind::Callout => BlockPayload::Callout(CalloutPayload {
                tone: CalloutTone::Info,
                text: String::new(),
            }),
            BlockKind::Experiments => BlockPayload::Experiments(ExperimentsPayload { limit: 6 }),
            BlockKind::CollectionGrid => BlockPayload::CollectionGrid(CollectionGridPayload {
                collection: String::new(),
                columns: 3,
            }),
            BlockKind::LogList => BlockPayload::LogList(LogListPayload { limit: 10 }),
            BlockKind::Guestbook => BlockPayload::Guestbook(GuestbookPayload { show_form: true }),
            BlockKind::Portfolio => BlockPayload::Portfolio(PortfolioPayload { limit: 6 }),
            BlockKind::MediaList => BlockPayload::MediaList(MediaListPayload {
                media: "all".to_string(),
                limit: 12,
            }),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BlockKind::Heading => "Heading",
            BlockKind::RichText => "Rich text",
            BlockKind::Image => "Image",
            BlockKind::Quote => "Quote",
            BlockKind::Code => "Code",
            BlockKind::Gallery => "Gallery",
            BlockKind::Button => "Button",
            BlockKind::Embed => "Embed",
            BlockKind::Divider => "Divider",
            BlockKind::Spacer => "Spacer",
            BlockKind::Columns => "Two columns",
            BlockKind::Callout => "Callout",
            BlockKind::Experiments => "Experiments",
            BlockKind::CollectionGrid => "Collection grid",
            BlockKind::LogList => "Log entries",
            BlockKind::Guestbook => "Guestbook",
            BlockKind::Portfolio => "Portfolio",
            BlockKind::MediaList => "Media list",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BlockKind::Heading => "Section title, levels 1 to 6",
            BlockKind::RichText => "Formatted paragraphs, lists and links",
            BlockKind::Image => "Single image with alt text and optional caption",
            BlockKind::Quote => "Pull quote with optional attribution",
            BlockKind::Code => "Preformatted code listing",
            BlockKind::Gallery => "Grid of images",
            BlockKind::Button => "Call-to-action link styled as a button",
            BlockKind::Embed => "External content shown in a frame",
            BlockKind::Divider => "Horizontal rule between sections",
            BlockKind::Spacer => "Vertical whitespace",
            BlockKind::Columns => "Two side-by-side rich text columns",
            BlockKind::Callout => "Highlighted note",
            BlockKind::Experiments => "Latest experiments",
            BlockKind::CollectionGrid => "Items from a collection, as a grid",
            BlockKind::LogList => "Recent log entries",
            BlockKind::Guestbook => "Approved guestbook entries and the signing form",
            BlockKind::Portfolio => "Portfolio projects",
            BlockKind::MediaList => "Recent uploaded media",
        }
    }

    pub fn descriptor(&self) -> BlockDescriptor {
        BlockDescriptor {
            kind: *self,
            label: self.label(),
            description: self.description(),
            category: self.category(),
            fields: self.fields(),
            default_payload: self.default_payload(),
        }
    }
}

/// Describe a kind by its wire name
///
/// Callers holding a name from storage or a request should check
/// [`is_known`] first; unknown names fail with [`BlockError::UnknownKind`].
pub fn describe(kind: &str) -> Result<BlockDescriptor, BlockError> {
    let kind: BlockKind = kind.parse()?;
    Ok(kind.descriptor())
}

pub fn is_known(kind: &str) -> bool {
    kind.parse::<BlockKind>().is_ok()
}

/// All descriptors for the "add block" picker: content, then layout, then modules
pub fn catalog() -> Vec<BlockDescriptor> {
    let mut all: Vec<BlockDescriptor> = BlockKind::ALL.iter().map(|k| k.descriptor()).collect();
    // Stable sort keeps ALL order inside each category
    all.sort_by_key(|d| d.category);
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldValue;

    #[test]
    fn test_describe_known_kind() {
        let descriptor = describe("heading").unwrap();
        assert_eq!(descriptor.kind, BlockKind::Heading);
        assert_eq!(descriptor.label, "Heading");
        assert_eq!(descriptor.category, Category::Content);
        assert_eq!(descriptor.default_payload.kind(), BlockKind::Heading);
    }

    #[test]
    fn test_describe_unknown_kind() {
        assert_eq!(
            describe("carousel"),
            Err(BlockError::UnknownKind("carousel".to_string()))
        );
        assert!(!is_known("carousel"));
        assert!(is_known("rich-text"));
    }

    #[test]
    fn test_default_payload_matches_kind() {
        for kind in BlockKind::ALL {
            assert_eq!(kind.default_payload().kind(), kind);
        }
    }

    #[test]
    fn test_every_form_field_round_trips_through_payload() {
        // Submitting a field's current value must be accepted and change nothing
        for kind in BlockKind::ALL {
            let original = kind.default_payload();
            let mut payload = original.clone();

            for spec in kind.fields() {
                let current = original
                    .field_value(spec.name)
                    .unwrap_or_else(|| panic!("{} has no value for {}", kind, spec.name));
                payload
                    .update_field(spec.name, current)
                    .unwrap_or_else(|e| panic!("{}.{}: {}", kind, spec.name, e));
            }

            assert_eq!(payload, original, "{} changed on identity edit", kind);
        }
    }

    #[test]
    fn test_catalog_grouped_by_category() {
        let catalog = catalog();
        assert_eq!(catalog.len(), BlockKind::ALL.len());

        let categories: Vec<Category> = catalog.iter().map(|d| d.category).collect();
        let mut sorted = categories.clone();
        sorted.sort();
        assert_eq!(categories, sorted);
        assert_eq!(catalog[0].kind, BlockKind::Heading);
    }

    #[test]
    fn test_divider_has_no_fields() {
        let mut payload = BlockKind::Divider.default_payload();
        assert!(payload
            .update_field("style", FieldValue::text("dashed"))
            .is_err());
    }
}
