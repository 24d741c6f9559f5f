//! # Revision Store
//!
//! Snapshots of a page's title and blocks, taken before each update of a
//! page that already has blocks.
//!
//! Revisions are immutable once appended. Restoring hands the stored
//! content back to the caller; it never writes a page or a revision itself.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mosaic_blocks::{new_id, BlockList};
use serde::{Deserialize, Serialize};

use crate::{PageError, RestoredContent, Revision, RevisionRepository, StorageError};

/// What happens to a page's revisions when the page is deleted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevisionRetention {
    /// Keep them as orphans for audit and undo-delete
    #[default]
    Retain,
    /// Delete them with the page
    Cascade,
}

/// Input to [`RevisionStore::snapshot`]
#[derive(Debug, Clone)]
pub struct Snapshot<'a> {
    pub page_id: &'a str,
    pub title: &'a str,
    pub blocks: &'a BlockList,
    pub editor_note: Option<String>,
    pub author: Option<String>,
    pub taken_at: DateTime<Utc>,
}

pub struct RevisionStore<R> {
    repo: Arc<R>,
    keep_last: Option<usize>,
}

impl<R: RevisionRepository> RevisionStore<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            keep_last: None,
        }
    }

    /// Cap revisions per page; the oldest are pruned after each snapshot
    ///
    /// The newest revision is always kept, so `Some(0)` acts as `Some(1)`.
    pub fn with_keep_last(mut self, keep_last: Option<usize>) -> Self {
        self.keep_last = keep_last.map(|keep| keep.max(1));
        self
    }

    /// Append a new revision numbered after the page's latest one
    pub fn snapshot(&self, snapshot: Snapshot<'_>) -> Result<Revision, StorageError> {
        let existing = self.list_for(snapshot.page_id)?;
        let number = existing.first().map_or(1, |latest| latest.number + 1);

        let revision = Revision {
            id: new_id(),
            page_id: snapshot.page_id.to_string(),
            number,
            title: snapshot.title.to_string(),
            blocks: snapshot.blocks.clone(),
            created_at: snapshot.taken_at,
            editor_note: snapshot.editor_note,
            author: snapshot.author,
        };
        self.repo.append(&revision)?;

        tracing::info!(
            page_id = %revision.page_id,
            revision_id = %revision.id,
            number = revision.number,
            blocks = revision.blocks.len(),
            "revision snapshot taken"
        );

        if let Some(keep) = self.keep_last {
            // `existing` is newest first and does not include the new revision
            for stale in existing.iter().skip(keep - 1) {
                self.repo.delete_revision(&stale.page_id, &stale.id)?;
                tracing::debug!(
                    page_id = %stale.page_id,
                    revision_id = %stale.id,
                    number = stale.number,
                    "pruned revision"
                );
            }
        }

        Ok(revision)
    }

    /// Revisions of a page, newest first
    pub fn list_for(&self, page_id: &str) -> Result<Vec<Revision>, StorageError> {
        let mut revisions = self.repo.list_for(page_id)?;
        revisions.sort_by(|a, b| {
            b.number
                .cmp(&a.number)
                .then_with(|| b.created_at.cmp(&a.created_at))
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(revisions)
    }

    /// Stored content of one revision, for the caller to apply
    pub fn restore(&self, page_id: &str, revision_id: &str) -> Result<RestoredContent, PageError> {
        let revision = self.repo.get(page_id, revision_id)?.ok_or_else(|| {
            PageError::RevisionNotFound {
                page_id: page_id.to_string(),
                revision_id: revision_id.to_string(),
            }
        })?;
        Ok(RestoredContent::from(&revision))
    }

    /// Drop every revision of a page
    pub fn purge(&self, page_id: &str) -> Result<usize, StorageError> {
        self.repo.delete_for_page(page_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use mosaic_blocks::BlockPayload;

    fn blocks(text: &str) -> BlockList {
        let mut list = BlockList::new();
        list.insert(BlockPayload::heading(text, 1), None).unwrap();
        list
    }

    fn take(store: &RevisionStore<MemoryStore>, page_id: &str, text: &str) -> Revision {
        let list = blocks(text);
        store
            .snapshot(Snapshot {
                page_id,
                title: text,
                blocks: &list,
                editor_note: None,
                author: None,
                taken_at: Utc::now(),
            })
            .unwrap()
    }

    #[test]
    fn test_numbers_increase_and_list_is_newest_first() {
        let store = RevisionStore::new(Arc::new(MemoryStore::new()));
        take(&store, "p", "one");
        take(&store, "p", "two");
        take(&store, "p", "three");

        let titles: Vec<_> = store
            .list_for("p")
            .unwrap()
            .into_iter()
            .map(|r| (r.number, r.title))
            .collect();
        assert_eq!(
            titles,
            vec![
                (3, "three".to_string()),
                (2, "two".to_string()),
                (1, "one".to_string())
            ]
        );
    }

    #[test]
    fn test_keep_last_prunes_oldest() {
        let store = RevisionStore::new(Arc::new(MemoryStore::new())).with_keep_last(Some(2));
        for text in ["a", "b", "c", "d"] {
            take(&store, "p", text);
        }

        let numbers: Vec<_> = store
            .list_for("p")
            .unwrap()
            .into_iter()
            .map(|r| r.number)
            .collect();
        assert_eq!(numbers, vec![4, 3]);
    }

    #[test]
    fn test_keep_last_zero_still_keeps_newest() {
        let store = RevisionStore::new(Arc::new(MemoryStore::new())).with_keep_last(Some(0));
        take(&store, "p", "a");
        let newest = take(&store, "p", "b");

        assert_eq!(store.list_for("p").unwrap(), vec![newest]);
    }

    #[test]
    fn test_restore_requires_matching_page() {
        let store = RevisionStore::new(Arc::new(MemoryStore::new()));
        let revision = take(&store, "p", "kept");

        let restored = store.restore("p", &revision.id).unwrap();
        assert_eq!(restored.title, "kept");
        assert_eq!(restored.blocks, revision.blocks);

        let err = store.restore("other", &revision.id).unwrap_err();
        assert!(matches!(err, PageError::RevisionNotFound { .. }));
    }

    #[test]
    fn test_snapshot_is_a_value_copy() {
        let store = RevisionStore::new(Arc::new(MemoryStore::new()));
        let mut live = blocks("before");
        let revision = store
            .snapshot(Snapshot {
                page_id: "p",
                title: "t",
                blocks: &live,
                editor_note: Some("note".to_string()),
                author: Some("ada".to_string()),
                taken_at: Utc::now(),
            })
            .unwrap();

        live.insert(BlockPayload::rich_text("<p>after</p>"), None)
            .unwrap();

        let stored = store.list_for("p").unwrap();
        assert_eq!(stored[0].blocks.len(), 1);
        assert_eq!(stored[0], revision);
    }
}
