//! # Payload Fields
//!
//! Each block kind exposes a small, fixed form. A [`FieldSpec`] names one
//! field of the kind's payload and the input it is edited with; a
//! [`FieldValue`] is what the form submits for that one field.
//!
//! Edits replace a single field wholesale. There is no generic key/value
//! merge: the payload types decide which names exist.

use serde::{Deserialize, Serialize};

use crate::payload::GalleryImage;
use crate::FieldError;

/// Input control used to edit a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputKind {
    /// Single line of text
    Text,
    /// Multi-line plain text
    Multiline,
    /// Author-supplied HTML fragment
    Html,
    /// Link or asset location
    Url,
    /// Bounded integer
    Number { min: i64, max: i64 },
    Toggle,
    /// One of a fixed set of values
    Choice { options: &'static [&'static str] },
    /// Ordered list of images
    Images,
}

/// One field of a kind's editing form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub input: InputKind,
    /// Empty text clears the field instead of storing ""
    pub optional: bool,
}

/// Value submitted for a single field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    Number(i64),
    Toggle(bool),
    Images(Vec<GalleryImage>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn optional_text(value: Option<&str>) -> Self {
        FieldValue::Text(value.unwrap_or_default().to_string())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Number(_) => "number",
            FieldValue::Toggle(_) => "toggle",
            FieldValue::Images(_) => "images",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_toggle(&self) -> Option<bool> {
        match self {
            FieldValue::Toggle(b) => Some(*b),
            _ => None,
        }
    }
}

/// A field value that has passed its spec's checks
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Checked {
    Text(String),
    OptionalText(Option<String>),
    Number(i64),
    Toggle(bool),
    Images(Vec<GalleryImage>),
}

impl FieldSpec {
    /// Validate and normalize a submitted value against this field
    pub(crate) fn check(&self, value: FieldValue) -> Result<Checked, FieldError> {
        match (self.input, value) {
            (InputKind::Text | InputKind::Multiline | InputKind::Html, FieldValue::Text(text)) => {
                Ok(self.text_value(text))
            }

            (InputKind::Url, FieldValue::Text(url)) => {
                let url = url.trim().to_string();
                if !is_safe_url(&url) {
                    return Err(FieldError::InvalidValue {
                        field: self.name.to_string(),
                        value: url,
                    });
                }
                Ok(self.text_value(url))
            }

            (InputKind::Choice { options }, FieldValue::Text(choice)) => {
                if options.contains(&choice.as_str()) {
                    Ok(Checked::Text(choice))
                } else {
                    Err(FieldError::InvalidValue {
                        field: self.name.to_string(),
                        value: choice,
                    })
                }
            }

            (InputKind::Number { min, max }, FieldValue::Number(n)) => {
                if n < min || n > max {
                    Err(FieldError::OutOfRange {
                        field: self.name.to_string(),
                        min,
                        max,
                        value: n,
                    })
                } else {
                    Ok(Checked::Number(n))
                }
            }

            (InputKind::Toggle, FieldValue::Toggle(b)) => Ok(Checked::Toggle(b)),

            (InputKind::Images, FieldValue::Images(images)) => {
                if let Some(bad) = images.iter().find(|img| !is_safe_url(img.src.trim())) {
                    return Err(FieldError::InvalidValue {
                        field: self.name.to_string(),
                        value: bad.src.clone(),
                    });
                }
                Ok(Checked::Images(images))
            }

            (input, _) => Err(FieldError::TypeMismatch {
                field: self.name.to_string(),
                expected: input.expected(),
            }),
        }
    }

    fn text_value(&self, text: String) -> Checked {
        if self.optional {
            if text.trim().is_empty() {
                Checked::OptionalText(None)
            } else {
                Checked::OptionalText(Some(text))
            }
        } else {
            Checked::Text(text)
        }
    }
}

impl InputKind {
    fn expected(&self) -> &'static str {
        match self {
            InputKind::Text
            | InputKind::Multiline
            | InputKind::Html
            | InputKind::Url
            | InputKind::Choice { .. } => "text",
            InputKind::Number { .. } => "number",
            InputKind::Toggle => "toggle",
            InputKind::Images => "images",
        }
    }
}

impl Checked {
    pub(crate) fn into_text(self) -> String {
        match self {
            Checked::Text(s) => s,
            Checked::OptionalText(s) => s.unwrap_or_default(),
            _ => String::new(),
        }
    }

    pub(crate) fn into_optional_text(self) -> Option<String> {
        match self {
            Checked::OptionalText(s) => s,
            Checked::Text(s) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    // Range checks happen before this, so narrowing casts cannot truncate.
    pub(crate) fn into_u8(self) -> u8 {
        match self {
            Checked::Number(n) => n as u8,
            _ => 0,
        }
    }

    pub(crate) fn into_u16(self) -> u16 {
        match self {
            Checked::Number(n) => n as u16,
            _ => 0,
        }
    }

    pub(crate) fn into_bool(self) -> bool {
        matches!(self, Checked::Toggle(true))
    }

    pub(crate) fn into_images(self) -> Vec<GalleryImage> {
        match self {
            Checked::Images(images) => images,
            _ => Vec::new(),
        }
    }
}

/// Links must be relative, fragment, http(s) or mailto. Empty is allowed so a
/// freshly inserted block can be saved before it is filled in.
pub fn is_safe_url(url: &str) -> bool {
    url.is_empty()
        || url.starts_with('/')
        || url.starts_with('#')
        || url.starts_with("https://")
        || url.starts_with("http://")
        || url.starts_with("mailto:")
}
