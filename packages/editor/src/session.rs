//! # Editing Session
//!
//! One operator's in-progress edits to one page.
//!
//! The session holds the last saved page plus a [`WorkingCopy`]. Local
//! edits only touch the working copy and mark it dirty. Saving sends the
//! whole working copy as one update:
//!
//! ```text
//! edit* → begin_save ──→ (caller runs update_content) ──→ complete_save
//!            │                                               │
//!            └─ SaveInFlight if one is outstanding           ├─ Ok: adopt server page, clear dirty + history
//!                                                            └─ Err: keep working copy and dirty flag
//! ```
//!
//! While a save is in flight the working copy is frozen, so the page the
//! server returns always corresponds to what was sent.

use mosaic_blocks::{BlockEdit, BlockKind, BlockPayload, EditOutcome, FieldValue};
use mosaic_pages::{
    normalize_slug, ContentUpdate, OperatorContext, Page, PageError, PageRepository, PageService,
    RestoredContent, RevisionRepository, Template,
};
use mosaic_render::{render_for_edit, EditView};

use crate::{SessionError, UndoStack, WorkingCopy};

/// Update handed to the page service for one save
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    pub page_id: String,
    pub update: ContentUpdate,
    pub publish: bool,
}

pub struct EditingSession {
    /// Canonical server state as of the last load or save
    page: Page,
    working: WorkingCopy,
    dirty: bool,
    history: UndoStack,
    in_flight: Option<SaveRequest>,
    /// Note for the revision the next save produces
    pending_note: Option<String>,
}

impl EditingSession {
    pub fn open(page: Page) -> Self {
        Self {
            working: WorkingCopy::from_page(&page),
            page,
            dirty: false,
            history: UndoStack::new(),
            in_flight: None,
            pending_note: None,
        }
    }

    pub fn with_history_limit(mut self, max_levels: usize) -> Self {
        self.history = UndoStack::with_max_levels(max_levels);
        self
    }

    pub fn page_id(&self) -> &str {
        &self.page.id
    }

    /// Last saved page
    pub fn saved(&self) -> &Page {
        &self.page
    }

    pub fn working(&self) -> &WorkingCopy {
        &self.working
    }

    /// Saved page with unsaved edits applied, for previews
    pub fn preview_page(&self) -> Page {
        self.working.apply_to(&self.page)
    }

    /// Editor view of every working block, in order
    pub fn edit_views(&self) -> Vec<EditView> {
        self.working.blocks.iter().map(render_for_edit).collect()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_saving(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    pub fn insert_block(
        &mut self,
        payload: BlockPayload,
        at: Option<usize>,
    ) -> Result<String, SessionError> {
        let edit = BlockEdit::Insert { payload, at };
        let outcome = self.apply(&edit)?;
        inserted_id(&edit, outcome)
    }

    pub fn insert_default(
        &mut self,
        kind: BlockKind,
        at: Option<usize>,
    ) -> Result<String, SessionError> {
        let edit = BlockEdit::InsertDefault { kind, at };
        let outcome = self.apply(&edit)?;
        inserted_id(&edit, outcome)
    }

    pub fn move_block(&mut self, from: usize, to: usize) -> Result<(), SessionError> {
        self.apply(&BlockEdit::Move { from, to })?;
        Ok(())
    }

    /// Returns false if the block was not there
    pub fn remove_block(&mut self, block_id: &str) -> Result<bool, SessionError> {
        let outcome = self.apply(&BlockEdit::Remove {
            block_id: block_id.to_string(),
        })?;
        Ok(outcome == EditOutcome::Removed { existed: true })
    }

    pub fn update_field(
        &mut self,
        block_id: &str,
        field: &str,
        value: FieldValue,
    ) -> Result<(), SessionError> {
        self.apply(&BlockEdit::UpdateField {
            block_id: block_id.to_string(),
            field: field.to_string(),
            value,
        })?;
        Ok(())
    }

    /// Apply one block edit to the working copy
    pub fn apply(&mut self, edit: &BlockEdit) -> Result<EditOutcome, SessionError> {
        self.ensure_editable()?;
        edit.validate(&self.working.blocks)?;

        if let BlockEdit::Remove { block_id } = edit {
            if self.working.blocks.get(block_id).is_none() {
                return Ok(EditOutcome::Removed { existed: false });
            }
        }

        self.history.record(&self.working, edit.name());
        let outcome = edit.apply(&mut self.working.blocks)?;
        self.dirty = true;

        tracing::debug!(page_id = %self.page.id, edit = edit.name(), ?outcome, "session edit");
        Ok(outcome)
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), SessionError> {
        let title = title.into();
        self.edit_metadata("set title", |w| w.title = title)
    }

    /// Set the slug; stored normalized
    pub fn set_slug(&mut self, slug: &str) -> Result<(), SessionError> {
        let normalized = normalize_slug(slug);
        if normalized.is_empty() && !slug.trim().trim_matches('/').is_empty() {
            return Err(SessionError::InvalidSlug(slug.to_string()));
        }
        self.edit_metadata("set slug", |w| w.slug = normalized)
    }

    pub fn set_template(&mut self, template: Template) -> Result<(), SessionError> {
        self.edit_metadata("set template", |w| w.template = template)
    }

    pub fn set_seo_title(&mut self, seo_title: Option<String>) -> Result<(), SessionError> {
        self.edit_metadata("set SEO title", |w| w.seo_title = seo_title)
    }

    pub fn set_seo_description(
        &mut self,
        seo_description: Option<String>,
    ) -> Result<(), SessionError> {
        self.edit_metadata("set SEO description", |w| {
            w.seo_description = seo_description
        })
    }

    /// Load restored revision content as a pending edit
    ///
    /// Nothing is saved; the next save snapshots the current server state
    /// before applying the restored content.
    pub fn load_restored(&mut self, restored: RestoredContent) -> Result<(), SessionError> {
        let note = format!("Before restoring revision #{}", restored.revision_number);
        self.edit_metadata("restore revision", |w| {
            w.title = restored.title;
            w.blocks = restored.blocks;
        })?;
        self.pending_note = Some(note);
        Ok(())
    }

    /// Group the following edits into one undo step
    pub fn begin_batch(&mut self, description: &str) {
        self.history.begin_batch(&self.working, description);
    }

    pub fn end_batch(&mut self) {
        self.history.end_batch();
    }

    /// Returns false if there was nothing to undo
    pub fn undo(&mut self) -> Result<bool, SessionError> {
        self.ensure_editable()?;
        match self.history.undo(&self.working) {
            Some(state) => {
                self.restore_state(state);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Returns false if there was nothing to redo
    pub fn redo(&mut self) -> Result<bool, SessionError> {
        self.ensure_editable()?;
        match self.history.redo(&self.working) {
            Some(state) => {
                self.restore_state(state);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Drop unsaved edits
    pub fn discard(&mut self) -> Result<(), SessionError> {
        self.ensure_editable()?;
        self.working = WorkingCopy::from_page(&self.page);
        self.dirty = false;
        self.history.clear();
        self.pending_note = None;
        Ok(())
    }

    /// Start a save; at most one can be outstanding
    pub fn begin_save(&mut self, publish: bool) -> Result<SaveRequest, SessionError> {
        if self.in_flight.is_some() {
            return Err(SessionError::SaveInFlight);
        }

        let mut update = self.working.to_update(publish);
        update.editor_note = self.pending_note.clone();

        let request = SaveRequest {
            page_id: self.page.id.clone(),
            update,
            publish,
        };
        self.in_flight = Some(request.clone());
        Ok(request)
    }

    /// Finish the outstanding save with the service's answer
    pub fn complete_save(&mut self, result: Result<Page, PageError>) -> Result<&Page, SessionError> {
        let request = self.in_flight.take().ok_or(SessionError::NoSaveInFlight)?;

        match result {
            Ok(page) => {
                tracing::debug!(
                    page_id = %page.id,
                    publish = request.publish,
                    "session saved"
                );
                self.working = WorkingCopy::from_page(&page);
                self.page = page;
                self.dirty = false;
                self.history.clear();
                self.pending_note = None;
                Ok(&self.page)
            }
            Err(e) => Err(SessionError::Save(e)),
        }
    }

    /// Save the working copy without changing status
    pub fn save_draft<S: PageRepository + RevisionRepository>(
        &mut self,
        service: &PageService<S>,
        ctx: &OperatorContext,
    ) -> Result<&Page, SessionError> {
        self.save_with(service, ctx, false)
    }

    /// Save the working copy and publish the page
    pub fn publish<S: PageRepository + RevisionRepository>(
        &mut self,
        service: &PageService<S>,
        ctx: &OperatorContext,
    ) -> Result<&Page, SessionError> {
        self.save_with(service, ctx, true)
    }

    fn save_with<S: PageRepository + RevisionRepository>(
        &mut self,
        service: &PageService<S>,
        ctx: &OperatorContext,
        publish: bool,
    ) -> Result<&Page, SessionError> {
        let request = self.begin_save(publish)?;
        let result = service.update_content(ctx, &request.page_id, request.update);
        self.complete_save(result)
    }

    fn edit_metadata(
        &mut self,
        description: &str,
        change: impl FnOnce(&mut WorkingCopy),
    ) -> Result<(), SessionError> {
        self.ensure_editable()?;
        self.history.record(&self.working, description);
        change(&mut self.working);
        self.dirty = true;
        tracing::debug!(page_id = %self.page.id, edit = description, "session edit");
        Ok(())
    }

    fn restore_state(&mut self, state: WorkingCopy) {
        self.working = state;
        self.dirty = self.working != WorkingCopy::from_page(&self.page);
    }

    fn ensure_editable(&self) -> Result<(), SessionError> {
        if self.in_flight.is_some() {
            Err(SessionError::SaveInFlight)
        } else {
            Ok(())
        }
    }
}

fn inserted_id(edit: &BlockEdit, outcome: EditOutcome) -> Result<String, SessionError> {
    let EditOutcome::Inserted { block_id } = outcome else {
        return Err(SessionError::UnexpectedOutcome {
            edit: edit.name(),
            outcome: format!("{:?}", outcome),
        });
    };
    Ok(block_id)
}
