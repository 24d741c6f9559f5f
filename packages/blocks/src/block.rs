//! # Blocks
//!
//! A block is one ordered unit of page content. Its content is either a typed
//! payload of a known kind, or the raw stored form of a block whose kind has
//! since left the registry (or whose payload no longer matches its kind).
//! Unknown content is kept verbatim so saving a page never loses it.

use serde::{Deserialize, Serialize};

use crate::ids::new_id;
use crate::{BlockKind, BlockPayload};

/// A single block owned by a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,

    /// Position within the page; equals the block's index once normalized
    pub order: u32,

    #[serde(flatten)]
    pub content: BlockContent,
}

/// Kind and payload of a block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockContent {
    Known(BlockPayload),

    /// Stored block the registry cannot interpret
    Unknown {
        kind: String,
        #[serde(default)]
        payload: serde_json::Value,
    },
}

impl Block {
    /// New block with a fresh id; order is assigned by the owning list
    pub fn new(payload: BlockPayload) -> Self {
        Self {
            id: new_id(),
            order: 0,
            content: BlockContent::Known(payload),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn kind(&self) -> Option<BlockKind> {
        match &self.content {
            BlockContent::Known(payload) => Some(payload.kind()),
            BlockContent::Unknown { .. } => None,
        }
    }

    /// Wire name of the kind, known or not
    pub fn kind_name(&self) -> &str {
        match &self.content {
            BlockContent::Known(payload) => payload.kind().as_str(),
            BlockContent::Unknown { kind, .. } => kind,
        }
    }

    pub fn payload(&self) -> Option<&BlockPayload> {
        match &self.content {
            BlockContent::Known(payload) => Some(payload),
            BlockContent::Unknown { .. } => None,
        }
    }

    pub fn payload_mut(&mut self) -> Option<&mut BlockPayload> {
        match &mut self.content {
            BlockContent::Known(payload) => Some(payload),
            BlockContent::Unknown { .. } => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self.content, BlockContent::Known(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_block_wire_format() {
        let block = Block::new(BlockPayload::heading("Hi", 1)).with_id("b-1");
        let json = serde_json::to_value(&block).unwrap();

        assert_eq!(
            json,
            json!({
                "id": "b-1",
                "order": 0,
                "kind": "heading",
                "payload": {"text": "Hi", "level": 1}
            })
        );

        let back: Block = serde_json::from_value(json).unwrap();
        assert_eq!(back, block);
    }

    #[test]
    fn test_removed_kind_loads_as_unknown() {
        let json = json!({
            "id": "b-7",
            "order": 3,
            "kind": "carousel",
            "payload": {"slides": [1, 2, 3]}
        });

        let block: Block = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(block.kind(), None);
        assert_eq!(block.kind_name(), "carousel");
        assert!(!block.is_known());

        // Saved back verbatim
        assert_eq!(serde_json::to_value(&block).unwrap(), json);
    }

    #[test]
    fn test_mismatched_payload_loads_as_unknown() {
        let json = json!({
            "id": "b-8",
            "order": 0,
            "kind": "heading",
            "payload": {"html": "<p>not a heading</p>"}
        });

        let block: Block = serde_json::from_value(json).unwrap();
        assert!(!block.is_known());
        assert_eq!(block.kind_name(), "heading");
    }

    #[test]
    fn test_fresh_ids_are_unique() {
        let a = Block::new(BlockPayload::rich_text("<p>a</p>"));
        let b = Block::new(BlockPayload::rich_text("<p>b</p>"));
        assert_ne!(a.id, b.id);
    }
}
