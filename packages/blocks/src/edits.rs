//! # Block Edits
//!
//! Intent-preserving operations on a [`BlockList`].
//!
//! ## Semantics
//!
//! ### Insert / InsertDefault
//! - New block gets a fresh id
//! - `at` within `0..=len`; omitted means append
//! - Every field of an inserted payload must pass its form checks
//!
//! ### Move
//! - Removes the block at `from` and reinserts it at `to`
//! - Both indices must be within `0..len`
//!
//! ### Remove
//! - Idempotent: removing a missing id succeeds and changes nothing
//!
//! ### UpdateField
//! - Replaces exactly one payload field; the rest of the payload is untouched
//! - Fails on unknown blocks, unknown fields and invalid values

use serde::{Deserialize, Serialize};

use crate::{BlockError, BlockKind, BlockList, BlockPayload, FieldValue};

/// One edit to a page's block list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum BlockEdit {
    /// Insert a block with the given payload
    Insert {
        payload: BlockPayload,
        #[serde(default)]
        at: Option<usize>,
    },

    /// Insert a block of `kind` with the registry's default payload
    InsertDefault {
        kind: BlockKind,
        #[serde(default)]
        at: Option<usize>,
    },

    /// Reorder a block
    Move { from: usize, to: usize },

    /// Delete a block
    Remove { block_id: String },

    /// Replace one payload field of a block
    UpdateField {
        block_id: String,
        field: String,
        value: FieldValue,
    },
}

/// What an applied edit did
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    Inserted { block_id: String },
    Moved,
    Removed { existed: bool },
    Updated,
}

impl BlockEdit {
    /// Validate without applying
    pub fn validate(&self, list: &BlockList) -> Result<(), BlockError> {
        match self {
            BlockEdit::Insert { payload, at } => {
                list.validate_insert_index(*at)?;
                payload.validate()?;
                Ok(())
            }

            BlockEdit::InsertDefault { at, .. } => list.validate_insert_index(*at),

            BlockEdit::Move { from, to } => {
                list.validate_index(*from)?;
                list.validate_index(*to)
            }

            BlockEdit::Remove { .. } => Ok(()),

            BlockEdit::UpdateField {
                block_id,
                field,
                value,
            } => {
                let block = list
                    .get(block_id)
                    .ok_or_else(|| BlockError::BlockNotFound(block_id.clone()))?;

                let mut scratch = block.clone();
                let kind_name = scratch.kind_name().to_string();
                let payload = scratch
                    .payload_mut()
                    .ok_or(crate::FieldError::NotEditable(kind_name))?;
                payload.update_field(field, value.clone())?;
                Ok(())
            }
        }
    }

    /// Apply to the list with validation
    pub fn apply(&self, list: &mut BlockList) -> Result<EditOutcome, BlockError> {
        self.validate(list)?;

        match self {
            BlockEdit::Insert { payload, at } => {
                let block_id = list.insert(payload.clone(), *at)?;
                Ok(EditOutcome::Inserted { block_id })
            }

            BlockEdit::InsertDefault { kind, at } => {
                let block_id = list.insert(kind.default_payload(), *at)?;
                Ok(EditOutcome::Inserted { block_id })
            }

            BlockEdit::Move { from, to } => {
                list.move_block(*from, *to)?;
                Ok(EditOutcome::Moved)
            }

            BlockEdit::Remove { block_id } => Ok(EditOutcome::Removed {
                existed: list.remove(block_id).is_some(),
            }),

            BlockEdit::UpdateField {
                block_id,
                field,
                value,
            } => {
                list.update_field(block_id, field, value.clone())?;
                Ok(EditOutcome::Updated)
            }
        }
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            BlockEdit::Insert { .. } => "insert",
            BlockEdit::InsertDefault { .. } => "insert_default",
            BlockEdit::Move { .. } => "move",
            BlockEdit::Remove { .. } => "remove",
            BlockEdit::UpdateField { .. } => "update_field",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_serialization() {
        let edit = BlockEdit::UpdateField {
            block_id: "b-1".to_string(),
            field: "text".to_string(),
            value: FieldValue::text("Hello"),
        };

        let json = serde_json::to_string(&edit).unwrap();
        let back: BlockEdit = serde_json::from_str(&json).unwrap();
        assert_eq!(edit, back);
    }

    #[test]
    fn test_insert_default_uses_registry_payload() {
        let mut list = BlockList::new();
        let outcome = BlockEdit::InsertDefault {
            kind: BlockKind::Spacer,
            at: None,
        }
        .apply(&mut list)
        .unwrap();

        let EditOutcome::Inserted { block_id } = outcome else {
            panic!("Expected insert outcome");
        };
        assert_eq!(
            list.get(&block_id).and_then(|b| b.payload()),
            Some(&BlockKind::Spacer.default_payload())
        );
    }

    #[test]
    fn test_invalid_update_is_rejected_before_apply() {
        let mut list = BlockList::new();
        let id = list.insert(BlockPayload::heading("Hi", 1), None).unwrap();
        let before = list.clone();

        let edit = BlockEdit::UpdateField {
            block_id: id,
            field: "level".to_string(),
            value: FieldValue::Number(0),
        };

        assert!(edit.validate(&list).is_err());
        assert!(edit.apply(&mut list).is_err());
        assert_eq!(list, before);
    }

    #[test]
    fn test_remove_missing_block_reports_no_change() {
        let mut list = BlockList::new();
        let outcome = BlockEdit::Remove {
            block_id: "ghost".to_string(),
        }
        .apply(&mut list)
        .unwrap();

        assert_eq!(outcome, EditOutcome::Removed { existed: false });
    }
}
