//! In-process store for tests and embedding

use std::collections::HashMap;
use std::sync::RwLock;

use crate::{Page, PageRepository, Revision, RevisionRepository, StorageError};

/// `RwLock<HashMap>` store holding pages and revisions
#[derive(Debug, Default)]
pub struct MemoryStore {
    pages: RwLock<HashMap<String, Page>>,
    revisions: RwLock<HashMap<String, Vec<Revision>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_count(&self) -> usize {
        self.pages.read().expect("pages lock poisoned").len()
    }

    pub fn revision_count(&self) -> usize {
        self.revisions
            .read()
            .expect("revisions lock poisoned")
            .values()
            .map(Vec::len)
            .sum()
    }
}

impl PageRepository for MemoryStore {
    fn get_by_id(&self, id: &str) -> Result<Option<Page>, StorageError> {
        Ok(self.pages.read().expect("pages lock poisoned").get(id).cloned())
    }

    fn get_by_slug(&self, slug: &str) -> Result<Option<Page>, StorageError> {
        Ok(self
            .pages
            .read()
            .expect("pages lock poisoned")
            .values()
            .find(|p| p.slug == slug)
            .cloned())
    }

    fn list_all(&self) -> Result<Vec<Page>, StorageError> {
        Ok(self
            .pages
            .read()
            .expect("pages lock poisoned")
            .values()
            .cloned()
            .collect())
    }

    fn save(&self, page: &Page) -> Result<(), StorageError> {
        self.pages
            .write()
            .expect("pages lock poisoned")
            .insert(page.id.clone(), page.clone());
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<bool, StorageError> {
        Ok(self
            .pages
            .write()
            .expect("pages lock poisoned")
            .remove(id)
            .is_some())
    }
}

impl RevisionRepository for MemoryStore {
    fn append(&self, revision: &Revision) -> Result<(), StorageError> {
        self.revisions
            .write()
            .expect("revisions lock poisoned")
            .entry(revision.page_id.clone())
            .or_default()
            .push(revision.clone());
        Ok(())
    }

    fn list_for(&self, page_id: &str) -> Result<Vec<Revision>, StorageError> {
        Ok(self
            .revisions
            .read()
            .expect("revisions lock poisoned")
            .get(page_id)
            .cloned()
            .unwrap_or_default())
    }

    fn get(&self, page_id: &str, revision_id: &str) -> Result<Option<Revision>, StorageError> {
        Ok(self
            .revisions
            .read()
            .expect("revisions lock poisoned")
            .get(page_id)
            .and_then(|revs| revs.iter().find(|r| r.id == revision_id))
            .cloned())
    }

    fn delete_for_page(&self, page_id: &str) -> Result<usize, StorageError> {
        Ok(self
            .revisions
            .write()
            .expect("revisions lock poisoned")
            .remove(page_id)
            .map_or(0, |revs| revs.len()))
    }

    fn delete_revision(&self, page_id: &str, revision_id: &str) -> Result<bool, StorageError> {
        let mut revisions = self.revisions.write().expect("revisions lock poisoned");
        let Some(revs) = revisions.get_mut(page_id) else {
            return Ok(false);
        };
        let before = revs.len();
        revs.retain(|r| r.id != revision_id);
        Ok(revs.len() != before)
    }
}
