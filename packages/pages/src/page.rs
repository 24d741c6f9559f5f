//! # Page Aggregate
//!
//! A page is a sluggable, templated document made of an ordered block list.
//!
//! ## Lifecycle
//!
//! ```text
//! create (draft, no blocks) → edit blocks/metadata → publish ⇄ unpublish → delete
//! ```
//!
//! `published_at` is stamped on the first transition to published and is
//! never cleared afterwards. `updated_at` strictly increases with every
//! mutation.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use mosaic_blocks::{BlockEdit, BlockList, BlockPayload, EditOutcome};
use serde::{Deserialize, Serialize};

use crate::PageError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Template {
    #[default]
    Default,
    FullWidth,
    Narrow,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    #[default]
    Draft,
    Published,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,

    /// Normalized; empty for the site root
    pub slug: String,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,

    #[serde(default)]
    pub template: Template,

    pub status: PageStatus,

    #[serde(default)]
    pub blocks: BlockList,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// First publication; kept when the page is unpublished
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

impl Page {
    /// Fresh page with no blocks
    pub(crate) fn new(
        id: String,
        title: String,
        slug: String,
        template: Template,
        status: PageStatus,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            slug,
            title,
            seo_title: None,
            seo_description: None,
            template,
            status,
            blocks: BlockList::new(),
            created_at: now,
            updated_at: now,
            published_at: (status == PageStatus::Published).then_some(now),
        }
    }

    pub fn is_published(&self) -> bool {
        self.status == PageStatus::Published
    }

    pub fn is_root(&self) -> bool {
        self.slug.is_empty()
    }

    /// Title for `<title>`: SEO title when set, page title otherwise
    pub fn display_title(&self) -> &str {
        self.seo_title.as_deref().unwrap_or(&self.title)
    }

    /// Insert a block with a fresh id; `at` of `None` appends
    pub fn insert_block(
        &mut self,
        payload: BlockPayload,
        at: Option<usize>,
        now: DateTime<Utc>,
    ) -> Result<String, PageError> {
        let id = self.blocks.insert(payload, at)?;
        self.touch(now);
        Ok(id)
    }

    /// Move the block at `from` to `to`
    pub fn reorder_blocks(
        &mut self,
        from: usize,
        to: usize,
        now: DateTime<Utc>,
    ) -> Result<(), PageError> {
        self.blocks.move_block(from, to)?;
        self.touch(now);
        Ok(())
    }

    /// Remove a block; a missing id changes nothing and returns false
    pub fn delete_block(&mut self, block_id: &str, now: DateTime<Utc>) -> bool {
        let removed = self.blocks.remove(block_id).is_some();
        if removed {
            self.touch(now);
        }
        removed
    }

    pub fn apply_edit(
        &mut self,
        edit: &BlockEdit,
        now: DateTime<Utc>,
    ) -> Result<EditOutcome, PageError> {
        let outcome = edit.apply(&mut self.blocks)?;
        if outcome != (EditOutcome::Removed { existed: false }) {
            self.touch(now);
        }
        Ok(outcome)
    }

    /// Change status; the first publish stamps `published_at`
    pub fn set_status(&mut self, status: PageStatus, now: DateTime<Utc>) {
        if status == PageStatus::Published && self.published_at.is_none() {
            self.published_at = Some(now);
        }
        self.status = status;
        self.touch(now);
    }

    /// Advance `updated_at`, strictly past its previous value
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::milliseconds(1)
        };
    }
}

impl Template {
    pub const ALL: [Template; 3] = [Template::Default, Template::FullWidth, Template::Narrow];

    pub fn as_str(&self) -> &'static str {
        match self {
            Template::Default => "default",
            Template::FullWidth => "full-width",
            Template::Narrow => "narrow",
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Template {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Template::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown template '{}'", s))
    }
}

impl PageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageStatus::Draft => "draft",
            PageStatus::Published => "published",
        }
    }
}

impl fmt::Display for PageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
