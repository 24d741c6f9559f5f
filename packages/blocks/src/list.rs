//! # Block List
//!
//! Ordered blocks of one page. After every operation the `order` of each
//! block equals its index, so orders are always exactly `0..len`.
//!
//! All operations validate before touching the list: a failing call leaves
//! it exactly as it was.

use serde::{Deserialize, Deserializer, Serialize};

use crate::{Block, BlockError, BlockPayload, FieldError, FieldValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BlockList {
    blocks: Vec<Block>,
}

impl BlockList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored blocks, repairing their order
    ///
    /// Blocks are sorted by their stored `order`; ties keep their stored
    /// sequence. Orders are then renumbered to `0..len`.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        let mut list = Self { blocks };
        list.normalize();
        list
    }

    /// Re-sort by `(order, current index)` and renumber to `0..len`
    pub fn normalize(&mut self) {
        // sort_by_key is stable, so equal orders keep their sequence
        self.blocks.sort_by_key(|b| b.order);
        self.renumber();
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    pub fn as_slice(&self) -> &[Block] {
        &self.blocks
    }

    pub fn get(&self, block_id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == block_id)
    }

    pub fn position(&self, block_id: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == block_id)
    }

    pub fn orders(&self) -> Vec<u32> {
        self.blocks.iter().map(|b| b.order).collect()
    }

    /// Insert a new block with a fresh id
    ///
    /// `at` may equal `len` (append); `None` also appends. Returns the new
    /// block's id.
    pub fn insert(&mut self, payload: BlockPayload, at: Option<usize>) -> Result<String, BlockError> {
        payload.validate()?;
        self.insert_block(Block::new(payload), at)
    }

    /// Insert an existing block value (used when replaying stored content)
    pub fn insert_block(&mut self, block: Block, at: Option<usize>) -> Result<String, BlockError> {
        let index = at.unwrap_or(self.blocks.len());
        self.check_insert_index(index)?;

        let id = block.id.clone();
        self.blocks.insert(index, block);
        self.renumber();
        Ok(id)
    }

    /// Move the block at `from` so that it ends up at index `to`
    pub fn move_block(&mut self, from: usize, to: usize) -> Result<(), BlockError> {
        self.check_index(from)?;
        self.check_index(to)?;

        if from != to {
            let block = self.blocks.remove(from);
            self.blocks.insert(to, block);
            self.renumber();
        }
        Ok(())
    }

    /// Remove a block by id; removing a missing id is a no-op
    pub fn remove(&mut self, block_id: &str) -> Option<Block> {
        let index = self.position(block_id)?;
        let block = self.blocks.remove(index);
        self.renumber();
        Some(block)
    }

    /// Replace one payload field of one block
    pub fn update_field(
        &mut self,
        block_id: &str,
        field: &str,
        value: FieldValue,
    ) -> Result<(), BlockError> {
        let block = self
            .blocks
            .iter_mut()
            .find(|b| b.id == block_id)
            .ok_or_else(|| BlockError::BlockNotFound(block_id.to_string()))?;

        let kind_name = block.kind_name().to_string();
        let payload = block
            .payload_mut()
            .ok_or(FieldError::NotEditable(kind_name))?;

        // update_field checks the value before assigning, so an error
        // leaves the payload untouched
        payload.update_field(field, value)?;
        Ok(())
    }

    pub fn validate_insert_index(&self, at: Option<usize>) -> Result<(), BlockError> {
        self.check_insert_index(at.unwrap_or(self.blocks.len()))
    }

    pub fn validate_index(&self, index: usize) -> Result<(), BlockError> {
        self.check_index(index)
    }

    pub fn into_vec(self) -> Vec<Block> {
        self.blocks
    }

    fn check_index(&self, index: usize) -> Result<(), BlockError> {
        if index < self.blocks.len() {
            Ok(())
        } else {
            Err(BlockError::IndexOutOfRange {
                index,
                len: self.blocks.len(),
            })
        }
    }

    fn check_insert_index(&self, index: usize) -> Result<(), BlockError> {
        if index <= self.blocks.len() {
            Ok(())
        } else {
            Err(BlockError::IndexOutOfRange {
                index,
                len: self.blocks.len(),
            })
        }
    }

    fn renumber(&mut self) {
        for (index, block) in self.blocks.iter_mut().enumerate() {
            block.order = index as u32;
        }
    }
}

impl<'de> Deserialize<'de> for BlockList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let blocks = Vec::<Block>::deserialize(deserializer)?;
        Ok(BlockList::from_blocks(blocks))
    }
}

impl From<Vec<Block>> for BlockList {
    fn from(blocks: Vec<Block>) -> Self {
        BlockList::from_blocks(blocks)
    }
}

impl<'a> IntoIterator for &'a BlockList {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
