//! # Block Payloads
//!
//! One strongly-typed payload struct per [`BlockKind`], gathered into the
//! [`BlockPayload`] sum type. The kind of a payload is its variant, so a
//! payload can never disagree with its declared kind.
//!
//! Stored form is adjacently tagged:
//!
//! ```json
//! { "kind": "heading", "payload": { "text": "Hi", "level": 1 } }
//! ```

use serde::{Deserialize, Serialize};

use crate::{BlockKind, FieldError, FieldValue};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingPayload {
    pub text: String,
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichTextPayload {
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePayload {
    pub src: String,
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotePayload {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodePayload {
    pub language: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub src: String,
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryPayload {
    pub images: Vec<GalleryImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonPayload {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedPayload {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DividerPayload {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpacerPayload {
    /// Pixels
    pub height: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnsPayload {
    pub left: String,
    pub right: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalloutTone {
    Info,
    Warning,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalloutPayload {
    pub tone: CalloutTone,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentsPayload {
    pub limit: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionGridPayload {
    pub collection: String,
    pub columns: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogListPayload {
    pub limit: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestbookPayload {
    pub show_form: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioPayload {
    pub limit: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaListPayload {
    pub media: String,
    pub limit: u16,
}

/// Typed payload of a block; the variant is the block's kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "kebab-case")]
pub enum BlockPayload {
    Heading(HeadingPayload),
    RichText(RichTextPayload),
    Image(ImagePayload),
    Quote(QuotePayload),
    Code(CodePayload),
    Gallery(GalleryPayload),
    Button(ButtonPayload),
    Embed(EmbedPayload),
    Divider(DividerPayload),
    Spacer(SpacerPayload),
    Columns(ColumnsPayload),
    Callout(CalloutPayload),
    Experiments(ExperimentsPayload),
    CollectionGrid(CollectionGridPayload),
    LogList(LogListPayload),
    Guestbook(GuestbookPayload),
    Portfolio(PortfolioPayload),
    MediaList(MediaListPayload),
}

impl CalloutTone {
    pub const OPTIONS: &'static [&'static str] = &["info", "warning", "success"];

    pub fn as_str(&self) -> &'static str {
        match self {
            CalloutTone::Info => "info",
            CalloutTone::Warning => "warning",
            CalloutTone::Success => "success",
        }
    }

    fn from_choice(choice: &str) -> Self {
        match choice {
            "warning" => CalloutTone::Warning,
            "success" => CalloutTone::Success,
            _ => CalloutTone::Info,
        }
    }
}

impl BlockPayload {
    pub fn kind(&self) -> BlockKind {
        match self {
            BlockPayload::Heading(_) => BlockKind::Heading,
            BlockPayload::RichText(_) => BlockKind::RichText,
            BlockPayload::Image(_) => BlockKind::Image,
            BlockPayload::Quote(_) => BlockKind::Quote,
            BlockPayload::Code(_) => BlockKind::Code,
            BlockPayload::Gallery(_) => BlockKind::Gallery,
            BlockPayload::Button(_) => BlockKind::Button,
            BlockPayload::Embed(_) => BlockKind::Embed,
            BlockPayload::Divider(_) => BlockKind::Divider,
            BlockPayload::Spacer(_) => BlockKind::Spacer,
            BlockPayload::Columns(_) => BlockKind::Columns,
            BlockPayload::Callout(_) => BlockKind::Callout,
            BlockPayload::Experiments(_) => BlockKind::Experiments,
            BlockPayload::CollectionGrid(_) => BlockKind::CollectionGrid,
            BlockPayload::LogList(_) => BlockKind::LogList,
            BlockPayload::Guestbook(_) => BlockKind::Guestbook,
            BlockPayload::Portfolio(_) => BlockKind::Portfolio,
            BlockPayload::MediaList(_) => BlockKind::MediaList,
        }
    }

    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        BlockPayload::Heading(HeadingPayload {
            text: text.into(),
            level,
        })
    }

    pub fn rich_text(html: impl Into<String>) -> Self {
        BlockPayload::RichText(RichTextPayload { html: html.into() })
    }

    /// Replace one field of this payload, leaving every other field untouched
    pub fn update_field(&mut self, name: &str, value: FieldValue) -> Result<(), FieldError> {
        let kind = self.kind();
        let spec = kind.field(name).ok_or_else(|| unknown_field(kind, name))?;
        let value = spec.check(value)?;

        match self {
            BlockPayload::Heading(p) => match name {
                "text" => p.text = value.into_text(),
                "level" => p.level = value.into_u8(),
                _ => return Err(unknown_field(kind, name)),
            },
            BlockPayload::RichText(p) => match name {
                "html" => p.html = value.into_text(),
                _ => return Err(unknown_field(kind, name)),
            },
            BlockPayload::Image(p) => match name {
                "src" => p.src = value.into_text(),
                "alt" => p.alt = value.into_text(),
                "caption" => p.caption = value.into_optional_text(),
                _ => return Err(unknown_field(kind, name)),
            },
            BlockPayload::Quote(p) => match name {
                "text" => p.text = value.into_text(),
                "attribution" => p.attribution = value.into_optional_text(),
                _ => return Err(unknown_field(kind, name)),
            },
            BlockPayload::Code(p) => match name {
                "language" => p.language = value.into_text(),
                "code" => p.code = value.into_text(),
                _ => return Err(unknown_field(kind, name)),
            },
            BlockPayload::Gallery(p) => match name {
                "images" => p.images = value.into_images(),
                _ => return Err(unknown_field(kind, name)),
            },
            BlockPayload::Button(p) => match name {
                "label" => p.label = value.into_text(),
                "href" => p.href = value.into_text(),
                _ => return Err(unknown_field(kind, name)),
            },
            BlockPayload::Embed(p) => match name {
                "url" => p.url = value.into_text(),
                "title" => p.title = value.into_optional_text(),
                _ => return Err(unknown_field(kind, name)),
            },
            BlockPayload::Divider(_) => return Err(unknown_field(kind, name)),
            BlockPayload::Spacer(p) => match name {
                "height" => p.height = value.into_u16(),
                _ => return Err(unknown_field(kind, name)),
            },
            BlockPayload::Columns(p) => match name {
                "left" => p.left = value.into_text(),
                "right" => p.right = value.into_text(),
                _ => return Err(unknown_field(kind, name)),
            },
            BlockPayload::Callout(p) => match name {
                "tone" => p.tone = CalloutTone::from_choice(&value.into_text()),
                "text" => p.text = value.into_text(),
                _ => return Err(unknown_field(kind, name)),
            },
            BlockPayload::Experiments(p) => match name {
                "limit" => p.limit = value.into_u16(),
                _ => return Err(unknown_field(kind, name)),
            },
            BlockPayload::CollectionGrid(p) => match name {
                "collection" => p.collection = value.into_text(),
                "columns" => p.columns = value.into_u8(),
                _ => return Err(unknown_field(kind, name)),
            },
            BlockPayload::LogList(p) => match name {
                "limit" => p.limit = value.into_u16(),
                _ => return Err(unknown_field(kind, name)),
            },
            BlockPayload::Guestbook(p) => match name {
                "show_form" => p.show_form = value.into_bool(),
                _ => return Err(unknown_field(kind, name)),
            },
            BlockPayload::Portfolio(p) => match name {
                "limit" => p.limit = value.into_u16(),
                _ => return Err(unknown_field(kind, name)),
            },
            BlockPayload::MediaList(p) => match name {
                "media" => p.media = value.into_text(),
                "limit" => p.limit = value.into_u16(),
                _ => return Err(unknown_field(kind, name)),
            },
        }

        Ok(())
    }

    /// Check every field of a whole payload against its kind's form
    pub fn validate(&self) -> Result<(), FieldError> {
        let kind = self.kind();
        for spec in kind.fields() {
            let value = self
                .field_value(spec.name)
                .ok_or_else(|| unknown_field(kind, spec.name))?;
            spec.check(value)?;
        }
        Ok(())
    }

    /// Current value of one field, in the shape the editor form submits it
    pub fn field_value(&self, name: &str) -> Option<FieldValue> {
        let text = |s: &str| Some(FieldValue::text(s));
        let optional = |s: &Option<String>| Some(FieldValue::optional_text(s.as_deref()));
        let number = |n: i64| Some(FieldValue::Number(n));

        match (self, name) {
            (BlockPayload::Heading(p), "text") => text(&p.text),
            (BlockPayload::Heading(p), "level") => number(p.level.into()),
            (BlockPayload::RichText(p), "html") => text(&p.html),
            (BlockPayload::Image(p), "src") => text(&p.src),
            (BlockPayload::Image(p), "alt") => text(&p.alt),
            (BlockPayload::Image(p), "caption") => optional(&p.caption),
            (BlockPayload::Quote(p), "text") => text(&p.text),
            (BlockPayload::Quote(p), "attribution") => optional(&p.attribution),
            (BlockPayload::Code(p), "language") => text(&p.language),
            (BlockPayload::Code(p), "code") => text(&p.code),
            (BlockPayload::Gallery(p), "images") => Some(FieldValue::Images(p.images.clone())),
            (BlockPayload::Button(p), "label") => text(&p.label),
            (BlockPayload::Button(p), "href") => text(&p.href),
            (BlockPayload::Embed(p), "url") => text(&p.url),
            (BlockPayload::Embed(p), "title") => optional(&p.title),
            (BlockPayload::Spacer(p), "height") => number(p.height.into()),
            (BlockPayload::Columns(p), "left") => text(&p.left),
            (BlockPayload::Columns(p), "right") => text(&p.right),
            (BlockPayload::Callout(p), "tone") => text(p.tone.as_str()),
            (BlockPayload::Callout(p), "text") => text(&p.text),
            (BlockPayload::Experiments(p), "limit") => number(p.limit.into()),
            (BlockPayload::CollectionGrid(p), "collection") => text(&p.collection),
            (BlockPayload::CollectionGrid(p), "columns") => number(p.columns.into()),
            (BlockPayload::LogList(p), "limit") => number(p.limit.into()),
            (BlockPayload::Guestbook(p), "show_form") => Some(FieldValue::Toggle(p.show_form)),
            (BlockPayload::Portfolio(p), "limit") => number(p.limit.into()),
            (BlockPayload::MediaList(p), "media") => text(&p.media),
            (BlockPayload::MediaList(p), "limit") => number(p.limit.into()),
            _ => None,
        }
    }
}

fn unknown_field(kind: BlockKind, name: &str) -> FieldError {
    FieldError::UnknownField {
        kind: kind.as_str().to_string(),
        field: name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacent_tagging() {
        let payload = BlockPayload::heading("Hi", 1);
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"kind": "heading", "payload": {"text": "Hi", "level": 1}})
        );

        let back: BlockPayload = serde_json::from_value(json).unwrap();
        assert_eq!(back, payload);
    }

    #[test]
    fn test_update_leaves_other_fields_untouched() {
        let mut payload = BlockPayload::Image(ImagePayload {
            src: "/media/cat.jpg".to_string(),
            alt: "A cat".to_string(),
            caption: Some("Whiskers".to_string()),
        });

        payload
            .update_field("alt", FieldValue::text("A sleeping cat"))
            .unwrap();

        assert_eq!(
            payload,
            BlockPayload::Image(ImagePayload {
                src: "/media/cat.jpg".to_string(),
                alt: "A sleeping cat".to_string(),
                caption: Some("Whiskers".to_string()),
            })
        );
    }

    #[test]
    fn test_update_rejects_unknown_field() {
        let mut payload = BlockPayload::heading("Hi", 1);
        let err = payload
            .update_field("color", FieldValue::text("red"))
            .unwrap_err();

        assert!(matches!(err, FieldError::UnknownField { .. }));
        assert_eq!(payload, BlockPayload::heading("Hi", 1));
    }

    #[test]
    fn test_failed_update_changes_nothing() {
        let mut payload = BlockPayload::heading("Hi", 1);
        assert!(payload.update_field("level", FieldValue::Number(7)).is_err());
        assert_eq!(payload, BlockPayload::heading("Hi", 1));
    }

    #[test]
    fn test_callout_tone_choice() {
        let mut payload = BlockPayload::Callout(CalloutPayload {
            tone: CalloutTone::Info,
            text: "Heads up".to_string(),
        });

        payload
            .update_field("tone", FieldValue::text("warning"))
            .unwrap();
        assert_eq!(payload.field_value("tone"), Some(FieldValue::text("warning")));

        assert!(payload
            .update_field("tone", FieldValue::text("danger"))
            .is_err());
    }

    #[test]
    fn test_clearing_optional_field() {
        let mut payload = BlockPayload::Quote(QuotePayload {
            text: "Stay hungry".to_string(),
            attribution: Some("Someone".to_string()),
        });

        payload
            .update_field("attribution", FieldValue::text(""))
            .unwrap();

        match payload {
            BlockPayload::Quote(q) => assert_eq!(q.attribution, None),
            other => panic!("Expected quote, got {:?}", other),
        }
    }

    #[test]
    fn test_every_default_payload_is_valid() {
        for kind in BlockKind::ALL {
            assert_eq!(kind.default_payload().validate(), Ok(()), "{:?}", kind);
        }
    }

    #[test]
    fn test_validate_checks_whole_payload() {
        let err = BlockPayload::heading("Deep", 9).validate().unwrap_err();
        assert!(matches!(err, FieldError::OutOfRange { value: 9, .. }));

        let button = BlockPayload::Button(ButtonPayload {
            label: "Click".to_string(),
            href: "javascript:alert(1)".to_string(),
        });
        assert!(matches!(
            button.validate(),
            Err(FieldError::InvalidValue { ref field, .. }) if field == "href"
        ));

        let grid = BlockPayload::CollectionGrid(CollectionGridPayload {
            collection: "books".to_string(),
            columns: 0,
        });
        assert!(matches!(
            grid.validate(),
            Err(FieldError::OutOfRange { value: 0, .. })
        ));
    }
}
