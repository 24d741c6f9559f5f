//! # JSON File Store
//!
//! One JSON document per page and per revision:
//!
//! ```text
//! <root>/pages/<page_id>.json
//! <root>/revisions/<page_id>/<revision_id>.json
//! ```
//!
//! Every write lands in a `.json.tmp` sibling first and is then renamed
//! over the target, so readers see either the old or the new document and
//! never a torn one.
//!
//! Documents that fail to parse are skipped with a warning when listing and
//! reported as [`StorageError::Corrupt`] when fetched directly.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{Page, PageRepository, Revision, RevisionRepository, StorageError};

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `root`, creating its directories
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let store = Self { root: root.into() };
        fs::create_dir_all(store.pages_dir())?;
        fs::create_dir_all(store.revisions_root())?;
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn pages_dir(&self) -> PathBuf {
        self.root.join("pages")
    }

    fn revisions_root(&self) -> PathBuf {
        self.root.join("revisions")
    }

    fn page_path(&self, id: &str) -> Result<PathBuf, StorageError> {
        check_id(id)?;
        Ok(self.pages_dir().join(format!("{}.json", id)))
    }

    fn revisions_dir(&self, page_id: &str) -> Result<PathBuf, StorageError> {
        check_id(page_id)?;
        Ok(self.revisions_root().join(page_id))
    }

    fn revision_path(&self, page_id: &str, revision_id: &str) -> Result<PathBuf, StorageError> {
        check_id(revision_id)?;
        Ok(self
            .revisions_dir(page_id)?
            .join(format!("{}.json", revision_id)))
    }
}

impl PageRepository for JsonFileStore {
    fn get_by_id(&self, id: &str) -> Result<Option<Page>, StorageError> {
        read_document(&self.page_path(id)?)
    }

    fn list_all(&self) -> Result<Vec<Page>, StorageError> {
        list_documents(&self.pages_dir())
    }

    fn save(&self, page: &Page) -> Result<(), StorageError> {
        write_document(&self.page_path(&page.id)?, page)
    }

    fn delete(&self, id: &str) -> Result<bool, StorageError> {
        remove_file(&self.page_path(id)?)
    }
}

impl RevisionRepository for JsonFileStore {
    fn append(&self, revision: &Revision) -> Result<(), StorageError> {
        write_document(
            &self.revision_path(&revision.page_id, &revision.id)?,
            revision,
        )
    }

    fn list_for(&self, page_id: &str) -> Result<Vec<Revision>, StorageError> {
        list_documents(&self.revisions_dir(page_id)?)
    }

    fn get(&self, page_id: &str, revision_id: &str) -> Result<Option<Revision>, StorageError> {
        let revision: Option<Revision> =
            read_document(&self.revision_path(page_id, revision_id)?)?;
        // The path already scopes by page, but a hand-copied file could lie
        Ok(revision.filter(|r| r.page_id == page_id))
    }

    fn delete_for_page(&self, page_id: &str) -> Result<usize, StorageError> {
        let dir = self.revisions_dir(page_id)?;
        let count = match json_files(&dir) {
            Ok(files) => files.len(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };
        fs::remove_dir_all(&dir)?;
        Ok(count)
    }

    fn delete_revision(&self, page_id: &str, revision_id: &str) -> Result<bool, StorageError> {
        remove_file(&self.revision_path(page_id, revision_id)?)
    }
}

/// Ids become file names, so only `[A-Za-z0-9_-]` is allowed
fn check_id(id: &str) -> Result<(), StorageError> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidId(id.to_string()))
    }
}

fn write_document<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    let tmp_path = path.with_extension("json.tmp");
    let json = serde_json::to_vec_pretty(value)?;
    fs::write(&tmp_path, &json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StorageError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| StorageError::Corrupt {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

fn list_documents<T: DeserializeOwned>(dir: &Path) -> Result<Vec<T>, StorageError> {
    let files = match json_files(dir) {
        Ok(files) => files,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut documents = Vec::with_capacity(files.len());
    for path in files {
        let bytes = fs::read(&path)?;
        match serde_json::from_slice(&bytes) {
            Ok(doc) => documents.push(doc),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "skipping unreadable document"
                );
            }
        }
    }
    Ok(documents)
}

/// `*.json` files directly inside `dir`, sorted by name
fn json_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn remove_file(path: &Path) -> Result<bool, StorageError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PageStatus, Template};
    use chrono::Utc;
    use mosaic_blocks::BlockList;

    fn page(id: &str, slug: &str) -> Page {
        Page::new(
            id.to_string(),
            slug.to_string(),
            slug.to_string(),
            Template::Default,
            PageStatus::Draft,
            Utc::now(),
        )
    }

    #[test]
    fn test_save_then_get_round_trips() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let store = JsonFileStore::open(dir.path()).unwrap();
        let page = page("p-1", "about");

        store.save(&page).unwrap();

        assert_eq!(store.get_by_id("p-1").unwrap(), Some(page.clone()));
        assert_eq!(store.get_by_slug("about").unwrap(), Some(page));
        assert!(dir.path().join("pages/p-1.json").exists());
        assert!(!dir.path().join("pages/p-1.json.tmp").exists());
    }

    #[test]
    fn test_missing_page_is_none() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let store = JsonFileStore::open(dir.path()).unwrap();

        assert_eq!(store.get_by_id("nope").unwrap(), None);
        assert!(!store.delete("nope").unwrap());
    }

    #[test]
    fn test_corrupt_page_is_skipped_on_list_but_reported_on_get() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let store = JsonFileStore::open(dir.path()).unwrap();
        store.save(&page("good", "good")).unwrap();
        fs::write(dir.path().join("pages/bad.json"), b"{ not json").unwrap();

        let pages = store.list_all().unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].id, "good");

        assert!(matches!(
            store.get_by_id("bad"),
            Err(StorageError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_ids_cannot_escape_the_root() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let store = JsonFileStore::open(dir.path()).unwrap();

        assert!(matches!(
            store.get_by_id("../secrets"),
            Err(StorageError::InvalidId(_))
        ));
    }

    #[test]
    fn test_revisions_are_scoped_by_page() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let store = JsonFileStore::open(dir.path()).unwrap();
        let revision = Revision {
            id: "r-1".to_string(),
            page_id: "p-1".to_string(),
            number: 1,
            title: "About".to_string(),
            blocks: BlockList::new(),
            created_at: Utc::now(),
            editor_note: None,
            author: Some("ada".to_string()),
        };

        store.append(&revision).unwrap();

        assert_eq!(store.list_for("p-1").unwrap(), vec![revision.clone()]);
        assert_eq!(store.get("p-1", "r-1").unwrap(), Some(revision));
        assert_eq!(store.get("p-2", "r-1").unwrap(), None);
        assert!(store.list_for("p-2").unwrap().is_empty());

        assert_eq!(store.delete_for_page("p-1").unwrap(), 1);
        assert_eq!(store.delete_for_page("p-1").unwrap(), 0);
    }
}
