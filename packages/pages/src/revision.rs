use chrono::{DateTime, Utc};
use mosaic_blocks::BlockList;
use serde::{Deserialize, Serialize};

/// Immutable point-in-time copy of a page's title and blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Revision {
    pub id: String,
    /// Weak reference; the page may since have been deleted
    pub page_id: String,
    /// Per-page sequence number, starting at 1
    pub number: u32,
    pub title: String,
    pub blocks: BlockList,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

/// Content of a revision handed back for the caller to apply
#[derive(Debug, Clone, PartialEq)]
pub struct RestoredContent {
    pub revision_id: String,
    pub revision_number: u32,
    pub title: String,
    pub blocks: BlockList,
}

impl From<&Revision> for RestoredContent {
    fn from(revision: &Revision) -> Self {
        Self {
            revision_id: revision.id.clone(),
            revision_number: revision.number,
            title: revision.title.clone(),
            blocks: revision.blocks.clone(),
        }
    }
}
