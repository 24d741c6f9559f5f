//! Integration tests for editor crate

use std::sync::Arc;

use mosaic_blocks::{BlockKind, BlockPayload, FieldValue};
use mosaic_editor::{EditingSession, SessionError};
use mosaic_pages::{
    MemoryStore, NewPage, OperatorContext, PageError, PageService, PageStatus, Template,
};
use mosaic_render::EditView;

fn service() -> (PageService<MemoryStore>, OperatorContext) {
    (
        PageService::new(Arc::new(MemoryStore::new())),
        OperatorContext::authenticated("admin"),
    )
}

#[test]
fn test_build_and_publish_about_page() {
    let (service, ctx) = service();
    let page = service.create(&ctx, NewPage::new("About", "about")).unwrap();
    let mut session = EditingSession::open(page);

    let heading = session.insert_default(BlockKind::Heading, None).unwrap();
    session
        .update_field(&heading, "text", FieldValue::text("About me"))
        .unwrap();
    session
        .insert_block(BlockPayload::rich_text("<p>I make things.</p>"), None)
        .unwrap();
    session.set_seo_title(Some("About | Mosaic".to_string())).unwrap();

    let saved = session.publish(&service, &ctx).unwrap().clone();

    assert_eq!(saved.status, PageStatus::Published);
    assert!(saved.published_at.is_some());
    assert_eq!(saved.blocks.len(), 2);
    assert_eq!(saved.blocks.orders(), vec![0, 1]);
    assert_eq!(saved.seo_title.as_deref(), Some("About | Mosaic"));
    assert!(!session.is_dirty());
    assert!(!session.history().can_undo());

    let stored = service.published_by_slug("about").unwrap();
    assert_eq!(stored, saved);
}

#[test]
fn test_save_draft_keeps_status() {
    let (service, ctx) = service();
    let page = service
        .create(
            &ctx,
            NewPage::new("Now", "now").with_status(PageStatus::Published),
        )
        .unwrap();
    let mut session = EditingSession::open(page);

    session.set_template(Template::Narrow).unwrap();
    let saved = session.save_draft(&service, &ctx).unwrap();

    assert_eq!(saved.status, PageStatus::Published);
    assert_eq!(saved.template, Template::Narrow);
}

#[test]
fn test_failed_save_keeps_working_copy() {
    let (service, ctx) = service();
    service.create(&ctx, NewPage::new("Taken", "taken")).unwrap();
    let page = service.create(&ctx, NewPage::new("Mine", "mine")).unwrap();
    let mut session = EditingSession::open(page);

    session.set_slug("taken").unwrap();
    session.insert_default(BlockKind::Divider, None).unwrap();

    let err = session.save_draft(&service, &ctx).unwrap_err();
    assert!(matches!(err, SessionError::Save(PageError::DuplicateSlug(_))));
    assert!(session.is_dirty());
    assert!(!session.is_saving());
    assert_eq!(session.working().slug, "taken");
    assert_eq!(session.working().blocks.len(), 1);

    // Pick another slug and retry
    session.set_slug("mine-too").unwrap();
    let saved = session.save_draft(&service, &ctx).unwrap();
    assert_eq!(saved.slug, "mine-too");
    assert_eq!(saved.blocks.len(), 1);
}

#[test]
fn test_save_snapshots_previous_content() {
    let (service, ctx) = service();
    let page = service.create(&ctx, NewPage::new("Log", "log")).unwrap();
    let mut session = EditingSession::open(page);

    session
        .insert_block(BlockPayload::heading("First", 1), None)
        .unwrap();
    session.save_draft(&service, &ctx).unwrap();
    assert!(service.revisions(session.page_id()).unwrap().is_empty());

    session
        .insert_block(BlockPayload::heading("Second", 2), None)
        .unwrap();
    session.save_draft(&service, &ctx).unwrap();

    let revisions = service.revisions(session.page_id()).unwrap();
    assert_eq!(revisions.len(), 1);
    assert_eq!(revisions[0].number, 1);
    assert_eq!(revisions[0].blocks.len(), 1);
    assert_eq!(revisions[0].author.as_deref(), Some("admin"));
}

#[test]
fn test_restore_through_session() {
    let (service, ctx) = service();
    let page = service.create(&ctx, NewPage::new("Home", "home")).unwrap();
    let mut session = EditingSession::open(page);

    session
        .insert_block(BlockPayload::heading("Original", 1), None)
        .unwrap();
    session.save_draft(&service, &ctx).unwrap();

    session.set_title("Home v2").unwrap();
    session
        .insert_block(BlockPayload::rich_text("<p>new</p>"), None)
        .unwrap();
    session.save_draft(&service, &ctx).unwrap();

    let revisions = service.revisions(session.page_id()).unwrap();
    let restored = service
        .restore_revision(&ctx, session.page_id(), &revisions[0].id)
        .unwrap();

    session.load_restored(restored).unwrap();
    assert!(session.is_dirty());
    assert_eq!(session.working().title, "Home");
    assert_eq!(session.working().blocks.len(), 1);

    let saved = session.save_draft(&service, &ctx).unwrap().clone();
    assert_eq!(saved.title, "Home");
    assert_eq!(saved.blocks.len(), 1);

    let revisions = service.revisions(session.page_id()).unwrap();
    assert_eq!(revisions.len(), 2);
    assert_eq!(revisions[0].number, 2);
    assert_eq!(revisions[0].title, "Home v2");
    assert_eq!(revisions[0].blocks.len(), 2);
    assert!(revisions[0]
        .editor_note
        .as_deref()
        .is_some_and(|note| note.contains("#1")));
}

#[test]
fn test_split_save_rejects_concurrent_work() {
    let (service, ctx) = service();
    let page = service.create(&ctx, NewPage::new("Work", "work")).unwrap();
    let mut session = EditingSession::open(page);

    session.insert_default(BlockKind::Quote, None).unwrap();
    let request = session.begin_save(false).unwrap();

    assert!(session.is_saving());
    assert!(matches!(
        session.begin_save(false),
        Err(SessionError::SaveInFlight)
    ));
    assert!(matches!(
        session.insert_default(BlockKind::Divider, None),
        Err(SessionError::SaveInFlight)
    ));

    let result = service.update_content(&ctx, &request.page_id, request.update);
    session.complete_save(result).unwrap();

    assert!(!session.is_saving());
    assert_eq!(session.saved().blocks.len(), 1);
    assert!(matches!(
        session.complete_save(Err(PageError::PageNotFound("x".to_string()))),
        Err(SessionError::NoSaveInFlight)
    ));
}

#[test]
fn test_edit_views_follow_working_order() {
    let (service, ctx) = service();
    let page = service.create(&ctx, NewPage::new("Views", "views")).unwrap();
    let mut session = EditingSession::open(page);

    let first = session.insert_default(BlockKind::Heading, None).unwrap();
    let second = session.insert_default(BlockKind::Button, None).unwrap();
    session.move_block(1, 0).unwrap();

    let views = session.edit_views();
    let ids: Vec<&str> = views.iter().map(EditView::block_id).collect();
    assert_eq!(ids, vec![second.as_str(), first.as_str()]);

    let EditView::Form(form) = &views[0] else {
        panic!("Expected form");
    };
    assert_eq!(form.kind, BlockKind::Button);
    assert_eq!(form.order, 0);
}

#[test]
fn test_undo_back_to_saved_state_is_clean() {
    let (service, ctx) = service();
    let page = service.create(&ctx, NewPage::new("Undo", "undo")).unwrap();
    let mut session = EditingSession::open(page);

    session.begin_batch("add intro");
    session.insert_default(BlockKind::Heading, None).unwrap();
    session.insert_default(BlockKind::RichText, None).unwrap();
    session.end_batch();
    assert_eq!(session.history().undo_levels(), 1);

    assert!(session.undo().unwrap());
    assert!(session.working().blocks.is_empty());
    assert!(!session.is_dirty());

    assert!(session.redo().unwrap());
    assert_eq!(session.working().blocks.len(), 2);
    assert!(session.is_dirty());
}
