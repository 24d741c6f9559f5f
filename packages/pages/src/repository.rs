//! # Persistence Boundary
//!
//! Keyed stores the page service depends on. Implementations must make
//! each single-document write atomic; nothing here spans documents.
//!
//! Slug uniqueness is checked by the service with a read-then-write, so two
//! concurrent writers creating the same slug can both succeed. A
//! multi-writer backend must enforce uniqueness itself.

use crate::{Page, Revision, StorageError};

pub trait PageRepository: Send + Sync {
    fn get_by_id(&self, id: &str) -> Result<Option<Page>, StorageError>;

    /// Lookup by normalized slug
    fn get_by_slug(&self, slug: &str) -> Result<Option<Page>, StorageError> {
        Ok(self.list_all()?.into_iter().find(|p| p.slug == slug))
    }

    fn list_all(&self) -> Result<Vec<Page>, StorageError>;

    /// Insert or replace by id
    fn save(&self, page: &Page) -> Result<(), StorageError>;

    /// Returns false if there was nothing to delete
    fn delete(&self, id: &str) -> Result<bool, StorageError>;
}

pub trait RevisionRepository: Send + Sync {
    fn append(&self, revision: &Revision) -> Result<(), StorageError>;

    /// All revisions of a page, in no particular order
    fn list_for(&self, page_id: &str) -> Result<Vec<Revision>, StorageError>;

    fn get(&self, page_id: &str, revision_id: &str) -> Result<Option<Revision>, StorageError>;

    /// Returns the number of revisions removed
    fn delete_for_page(&self, page_id: &str) -> Result<usize, StorageError>;

    fn delete_revision(&self, page_id: &str, revision_id: &str) -> Result<bool, StorageError>;
}
