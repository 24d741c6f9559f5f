//! # Block Kinds
//!
//! The closed set of block kinds. Adding a kind means adding a variant here,
//! a payload variant in [`crate::BlockPayload`], a descriptor in the registry
//! and a case in both renderer dispatch functions. The compiler reports every
//! place that still needs the new case.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::BlockError;

/// Discriminant of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    Heading,
    RichText,
    Image,
    Quote,
    Code,
    Gallery,
    Button,
    Embed,
    Divider,
    Spacer,
    Columns,
    Callout,
    Experiments,
    CollectionGrid,
    LogList,
    Guestbook,
    Portfolio,
    MediaList,
}

/// Picker grouping for block kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Carries its own content in the payload
    Content,
    /// Structures or decorates the page
    Layout,
    /// Displays content resolved from an external collaborator at render time
    Module,
}

impl BlockKind {
    /// Every kind, in picker order
    pub const ALL: [BlockKind; 18] = [
        BlockKind::Heading,
        BlockKind::RichText,
        BlockKind::Image,
        BlockKind::Quote,
        BlockKind::Code,
        BlockKind::Gallery,
        BlockKind::Button,
        BlockKind::Embed,
        BlockKind::Divider,
        BlockKind::Spacer,
        BlockKind::Columns,
        BlockKind::Callout,
        BlockKind::Experiments,
        BlockKind::CollectionGrid,
        BlockKind::LogList,
        BlockKind::Guestbook,
        BlockKind::Portfolio,
        BlockKind::MediaList,
    ];

    /// Wire name, as stored in page documents
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Heading => "heading",
            BlockKind::RichText => "rich-text",
            BlockKind::Image => "image",
            BlockKind::Quote => "quote",
            BlockKind::Code => "code",
            BlockKind::Gallery => "gallery",
            BlockKind::Button => "button",
            BlockKind::Embed => "embed",
            BlockKind::Divider => "divider",
            BlockKind::Spacer => "spacer",
            BlockKind::Columns => "columns",
            BlockKind::Callout => "callout",
            BlockKind::Experiments => "experiments",
            BlockKind::CollectionGrid => "collection-grid",
            BlockKind::LogList => "log-list",
            BlockKind::Guestbook => "guestbook",
            BlockKind::Portfolio => "portfolio",
            BlockKind::MediaList => "media-list",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            BlockKind::Heading
            | BlockKind::RichText
            | BlockKind::Image
            | BlockKind::Quote
            | BlockKind::Code
            | BlockKind::Gallery
            | BlockKind::Button
            | BlockKind::Embed => Category::Content,

            BlockKind::Divider | BlockKind::Spacer | BlockKind::Columns | BlockKind::Callout => {
                Category::Layout
            }

            BlockKind::Experiments
            | BlockKind::CollectionGrid
            | BlockKind::LogList
            | BlockKind::Guestbook
            | BlockKind::Portfolio
            | BlockKind::MediaList => Category::Module,
        }
    }

    pub fn is_module(&self) -> bool {
        self.category() == Category::Module
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockKind {
    type Err = BlockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| BlockError::UnknownKind(s.to_string()))
    }
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Content => "content",
            Category::Layout => "layout",
            Category::Module => "module",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
