//! # Page Service
//!
//! Page aggregate operations over a [`PageRepository`] + [`RevisionRepository`].
//!
//! ## Update flow
//!
//! ```text
//! load page → validate (slug, blocks) → snapshot previous state (if it had blocks)
//!           → apply changes → touch updatedAt → save
//! ```
//!
//! Validation runs before anything is written, so a rejected update leaves
//! both the page and its revisions untouched. The snapshot is written
//! before the page, so a crash between the two leaves the old page plus an
//! extra revision, never a torn page.

use std::sync::Arc;

use mosaic_blocks::{new_id, BlockEdit, BlockList, EditOutcome};
use serde::{Deserialize, Serialize};

use crate::revisions::{RevisionRetention, RevisionStore, Snapshot};
use crate::slug::{is_degenerate, normalize_slug};
use crate::{
    Clock, OperatorContext, Page, PageError, PageRepository, PageStatus, RestoredContent,
    Revision, RevisionRepository, SystemClock, Template,
};

/// Revision policy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageServiceOptions {
    #[serde(default)]
    pub on_page_delete: RevisionRetention,

    /// Maximum revisions kept per page
    #[serde(default)]
    pub keep_last: Option<usize>,
}

/// Request to create a page
#[derive(Debug, Clone, PartialEq)]
pub struct NewPage {
    pub title: String,
    pub slug: String,
    pub template: Template,
    pub status: PageStatus,
}

impl NewPage {
    pub fn new(title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slug: slug.into(),
            template: Template::Default,
            status: PageStatus::Draft,
        }
    }

    pub fn with_template(mut self, template: Template) -> Self {
        self.template = template;
        self
    }

    pub fn with_status(mut self, status: PageStatus) -> Self {
        self.status = status;
        self
    }
}

/// Partial update; `None` leaves a field as it is
///
/// The SEO fields are doubly optional: `Some(None)` clears them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentUpdate {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub template: Option<Template>,
    pub status: Option<PageStatus>,
    pub blocks: Option<BlockList>,
    pub seo_title: Option<Option<String>>,
    pub seo_description: Option<Option<String>>,
    /// Stored on the revision this update produces
    pub editor_note: Option<String>,
}

impl ContentUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn template(mut self, template: Template) -> Self {
        self.template = Some(template);
        self
    }

    pub fn status(mut self, status: PageStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn blocks(mut self, blocks: BlockList) -> Self {
        self.blocks = Some(blocks);
        self
    }

    pub fn seo_title(mut self, seo_title: Option<String>) -> Self {
        self.seo_title = Some(seo_title);
        self
    }

    pub fn seo_description(mut self, seo_description: Option<String>) -> Self {
        self.seo_description = Some(seo_description);
        self
    }

    pub fn editor_note(mut self, note: impl Into<String>) -> Self {
        self.editor_note = Some(note.into());
        self
    }
}

impl From<RestoredContent> for ContentUpdate {
    fn from(restored: RestoredContent) -> Self {
        ContentUpdate::new()
            .title(restored.title)
            .blocks(restored.blocks)
            .editor_note(format!("Before restoring revision #{}", restored.revision_number))
    }
}

pub struct PageService<S> {
    store: Arc<S>,
    revisions: RevisionStore<S>,
    clock: Arc<dyn Clock>,
    options: PageServiceOptions,
}

impl<S: PageRepository + RevisionRepository> PageService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            revisions: RevisionStore::new(store.clone()),
            store,
            clock: Arc::new(SystemClock),
            options: PageServiceOptions::default(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_options(mut self, options: PageServiceOptions) -> Self {
        self.revisions = RevisionStore::new(self.store.clone()).with_keep_last(options.keep_last);
        self.options = options;
        self
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn options(&self) -> &PageServiceOptions {
        &self.options
    }

    /// Create an empty page
    pub fn create(&self, ctx: &OperatorContext, request: NewPage) -> Result<Page, PageError> {
        let slug = self.available_slug(&request.slug, None)?;
        let page = Page::new(
            new_id(),
            request.title,
            slug,
            request.template,
            request.status,
            self.clock.now(),
        );
        self.store.save(&page)?;

        tracing::info!(
            page_id = %page.id,
            slug = %page.slug,
            status = %page.status,
            actor = %ctx.actor(),
            correlation_id = ?ctx.correlation_id(),
            "page created"
        );
        Ok(page)
    }

    pub fn get(&self, id: &str) -> Result<Page, PageError> {
        self.store
            .get_by_id(id)?
            .ok_or_else(|| PageError::PageNotFound(id.to_string()))
    }

    /// Lookup by slug, normalizing it first
    pub fn get_by_slug(&self, slug: &str) -> Result<Page, PageError> {
        self.store
            .get_by_slug(&normalize_slug(slug))?
            .ok_or_else(|| PageError::PageNotFound(slug.to_string()))
    }

    /// Public lookup: drafts are reported as missing
    pub fn published_by_slug(&self, slug: &str) -> Result<Page, PageError> {
        let page = self.get_by_slug(slug)?;
        if page.is_published() {
            Ok(page)
        } else {
            Err(PageError::PageNotFound(slug.to_string()))
        }
    }

    /// All pages, sorted by slug
    pub fn list(&self) -> Result<Vec<Page>, PageError> {
        let mut pages = self.store.list_all()?;
        pages.sort_by(|a, b| a.slug.cmp(&b.slug).then_with(|| a.id.cmp(&b.id)));
        Ok(pages)
    }

    /// Apply a partial update
    pub fn update_content(
        &self,
        ctx: &OperatorContext,
        page_id: &str,
        update: ContentUpdate,
    ) -> Result<Page, PageError> {
        let page = self.get(page_id)?;
        self.commit(ctx, page, update)
    }

    /// Apply one block edit and save
    ///
    /// Removing a block that is not there is a no-op and writes nothing.
    pub fn apply_edit(
        &self,
        ctx: &OperatorContext,
        page_id: &str,
        edit: &BlockEdit,
    ) -> Result<(Page, EditOutcome), PageError> {
        let page = self.get(page_id)?;

        let mut blocks = page.blocks.clone();
        let outcome = edit.apply(&mut blocks)?;
        tracing::debug!(page_id = %page.id, edit = edit.name(), ?outcome, "block edit");

        if outcome == (EditOutcome::Removed { existed: false }) {
            return Ok((page, outcome));
        }

        let page = self.commit(ctx, page, ContentUpdate::new().blocks(blocks))?;
        Ok((page, outcome))
    }

    pub fn set_status(
        &self,
        ctx: &OperatorContext,
        page_id: &str,
        status: PageStatus,
    ) -> Result<Page, PageError> {
        self.update_content(ctx, page_id, ContentUpdate::new().status(status))
    }

    /// Remove a page; its revisions follow the retention policy
    pub fn delete(&self, ctx: &OperatorContext, page_id: &str) -> Result<(), PageError> {
        if !self.store.delete(page_id)? {
            return Err(PageError::PageNotFound(page_id.to_string()));
        }

        let purged = match self.options.on_page_delete {
            RevisionRetention::Retain => 0,
            RevisionRetention::Cascade => self.revisions.purge(page_id)?,
        };

        tracing::info!(
            page_id = %page_id,
            retention = ?self.options.on_page_delete,
            purged_revisions = purged,
            actor = %ctx.actor(),
            correlation_id = ?ctx.correlation_id(),
            "page deleted"
        );
        Ok(())
    }

    /// Revisions of a page, newest first
    pub fn revisions(&self, page_id: &str) -> Result<Vec<Revision>, PageError> {
        Ok(self.revisions.list_for(page_id)?)
    }

    /// Content of a stored revision
    ///
    /// Nothing is written; pass the result to [`update_content`] (via
    /// `ContentUpdate::from`) to make it live.
    ///
    /// [`update_content`]: PageService::update_content
    pub fn restore_revision(
        &self,
        ctx: &OperatorContext,
        page_id: &str,
        revision_id: &str,
    ) -> Result<RestoredContent, PageError> {
        let restored = self.revisions.restore(page_id, revision_id)?;
        tracing::info!(
            page_id = %page_id,
            revision_id = %revision_id,
            number = restored.revision_number,
            actor = %ctx.actor(),
            correlation_id = ?ctx.correlation_id(),
            "revision restored"
        );
        Ok(restored)
    }

    fn commit(
        &self,
        ctx: &OperatorContext,
        previous: Page,
        update: ContentUpdate,
    ) -> Result<Page, PageError> {
        let slug = match &update.slug {
            Some(requested) => Some(self.available_slug(requested, Some(&previous.id))?),
            None => None,
        };

        let now = self.clock.now();
        let mut page = previous.clone();

        if let Some(slug) = slug {
            page.slug = slug;
        }
        if let Some(title) = update.title {
            page.title = title;
        }
        if let Some(template) = update.template {
            page.template = template;
        }
        if let Some(seo_title) = update.seo_title {
            page.seo_title = non_blank(seo_title);
        }
        if let Some(seo_description) = update.seo_description {
            page.seo_description = non_blank(seo_description);
        }
        if let Some(mut blocks) = update.blocks {
            blocks.normalize();
            page.blocks = blocks;
        }
        match update.status {
            Some(status) => page.set_status(status, now),
            None => page.touch(now),
        }

        if !previous.blocks.is_empty() {
            self.revisions.snapshot(Snapshot {
                page_id: &previous.id,
                title: &previous.title,
                blocks: &previous.blocks,
                editor_note: update.editor_note,
                author: Some(ctx.actor().to_string()),
                taken_at: now,
            })?;
        }

        self.store.save(&page)?;

        if page.status != previous.status {
            tracing::info!(
                page_id = %page.id,
                slug = %page.slug,
                from = %previous.status,
                to = %page.status,
                actor = %ctx.actor(),
                correlation_id = ?ctx.correlation_id(),
                "page status changed"
            );
        }
        tracing::debug!(
            page_id = %page.id,
            blocks = page.blocks.len(),
            actor = %ctx.actor(),
            "page updated"
        );
        Ok(page)
    }

    /// Normalize `requested` and make sure no other page holds it
    fn available_slug(&self, requested: &str, own_id: Option<&str>) -> Result<String, PageError> {
        let slug = normalize_slug(requested);
        if is_degenerate(requested, &slug) {
            return Err(PageError::InvalidSlug(requested.to_string()));
        }

        match self.store.get_by_slug(&slug)? {
            Some(holder) if Some(holder.id.as_str()) != own_id => {
                Err(PageError::DuplicateSlug(slug))
            }
            _ => Ok(slug),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
