//! # Undo/Redo Stack
//!
//! Local history of working-copy states for one editing session.
//!
//! ## Design
//!
//! - Each edit records the state it replaced
//! - Undo swaps the current state with the most recent recorded one
//! - Redo swaps it back
//! - New edits clear the redo stack
//! - Batches group several edits into one undo step
//! - History is local: a successful save clears it

use crate::WorkingCopy;

/// One undo step
#[derive(Debug, Clone)]
struct HistoryEntry {
    /// State before the step
    state: WorkingCopy,

    /// Optional description of this step
    description: Option<String>,
}

#[derive(Debug)]
pub struct UndoStack {
    /// Most recent last
    undo_stack: Vec<HistoryEntry>,

    /// Most recent last
    redo_stack: Vec<HistoryEntry>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Open batch, already recorded on `undo_stack`
    batching: bool,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            batching: false,
        }
    }

    /// Record the state an edit is about to replace
    pub fn record(&mut self, before: &WorkingCopy, description: &str) {
        if self.batching {
            return;
        }
        self.push(HistoryEntry {
            state: before.clone(),
            description: Some(description.to_string()),
        });
    }

    /// Group following edits into one step until `end_batch`
    pub fn begin_batch(&mut self, before: &WorkingCopy, description: &str) {
        self.end_batch();
        self.record(before, description);
        self.batching = true;
    }

    pub fn end_batch(&mut self) {
        self.batching = false;
    }

    /// Undo the most recent step; returns the state to restore
    pub fn undo(&mut self, current: &WorkingCopy) -> Option<WorkingCopy> {
        self.end_batch();
        let entry = self.undo_stack.pop()?;
        self.redo_stack.push(HistoryEntry {
            state: current.clone(),
            description: entry.description.clone(),
        });
        Some(entry.state)
    }

    /// Redo the most recently undone step; returns the state to restore
    pub fn redo(&mut self, current: &WorkingCopy) -> Option<WorkingCopy> {
        let entry = self.redo_stack.pop()?;
        self.undo_stack.push(HistoryEntry {
            state: current.clone(),
            description: entry.description.clone(),
        });
        Some(entry.state)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.batching = false;
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }

    fn push(&mut self, entry: HistoryEntry) {
        self.undo_stack.push(entry);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // New action invalidates the redo future
        self.redo_stack.clear();
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_blocks::BlockList;
    use mosaic_pages::Template;

    fn copy(title: &str) -> WorkingCopy {
        WorkingCopy {
            title: title.to_string(),
            slug: "page".to_string(),
            template: Template::Default,
            seo_title: None,
            seo_description: None,
            blocks: BlockList::new(),
        }
    }

    #[test]
    fn test_undo_stack_creation() {
        let stack = UndoStack::new();
        assert_eq!(stack.undo_levels(), 0);
        assert_eq!(stack.redo_levels(), 0);
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_undo_then_redo() {
        let mut stack = UndoStack::new();
        stack.record(&copy("a"), "set title");

        let restored = stack.undo(&copy("b")).unwrap();
        assert_eq!(restored.title, "a");
        assert_eq!(stack.redo_description(), Some("set title"));

        let redone = stack.redo(&restored).unwrap();
        assert_eq!(redone.title, "b");
        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.redo_levels(), 0);
    }

    #[test]
    fn test_batch_is_one_step() {
        let mut stack = UndoStack::new();
        stack.begin_batch(&copy("a"), "rename");
        stack.record(&copy("b"), "ignored");
        stack.record(&copy("c"), "ignored");
        stack.end_batch();

        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.undo_description(), Some("rename"));
        assert_eq!(stack.undo(&copy("d")).unwrap().title, "a");
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut stack = UndoStack::new();
        stack.record(&copy("a"), "one");
        stack.undo(&copy("b"));
        assert_eq!(stack.redo_levels(), 1);

        stack.record(&copy("a"), "two");
        assert_eq!(stack.redo_levels(), 0);
    }

    #[test]
    fn test_max_levels_enforced() {
        let mut stack = UndoStack::with_max_levels(2);
        for title in ["a", "b", "c"] {
            stack.record(&copy(title), "edit");
        }

        assert_eq!(stack.undo_levels(), 2);
        assert_eq!(stack.undo(&copy("d")).unwrap().title, "c");
        assert_eq!(stack.undo(&copy("c")).unwrap().title, "b");
        assert!(stack.undo(&copy("b")).is_none());
    }
}
