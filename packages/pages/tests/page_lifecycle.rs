//! End-to-end page lifecycle against the in-memory store

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use mosaic_blocks::{BlockEdit, BlockKind, BlockPayload, FieldValue};
use mosaic_pages::{
    ContentUpdate, ManualClock, MemoryStore, NewPage, OperatorContext, PageError, PageService,
    PageServiceOptions, PageStatus, RevisionRetention,
};

fn setup() -> (PageService<MemoryStore>, Arc<ManualClock>, OperatorContext) {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
    ));
    let service = PageService::new(Arc::new(MemoryStore::new())).with_clock(clock.clone());
    (service, clock, OperatorContext::authenticated("admin"))
}

#[test]
fn test_about_page_scenario() {
    let (service, clock, ctx) = setup();
    let page = service.create(&ctx, NewPage::new("About", "about")).unwrap();
    assert!(page.blocks.is_empty());

    // Build the block list locally, then save it together with the publish
    let mut blocks = page.blocks.clone();
    let heading_id = blocks
        .insert(BlockPayload::heading("Hi", 1), Some(0))
        .unwrap();
    blocks
        .insert(BlockPayload::rich_text("<p>x</p>"), Some(1))
        .unwrap();

    clock.advance(Duration::minutes(1));
    let page = service
        .update_content(
            &ctx,
            &page.id,
            ContentUpdate::new()
                .blocks(blocks.clone())
                .status(PageStatus::Published),
        )
        .unwrap();

    assert_eq!(page.blocks.orders(), vec![0, 1]);
    assert_eq!(page.status, PageStatus::Published);
    assert!(page.published_at.is_some());
    assert!(service.revisions(&page.id).unwrap().is_empty());

    // Second update changes the heading text
    let mut edited = page.blocks.clone();
    edited
        .update_field(&heading_id, "text", FieldValue::text("Hello"))
        .unwrap();

    clock.advance(Duration::minutes(1));
    let updated = service
        .update_content(&ctx, &page.id, ContentUpdate::new().blocks(edited))
        .unwrap();

    let revisions = service.revisions(&page.id).unwrap();
    assert_eq!(revisions.len(), 1);
    assert_eq!(revisions[0].blocks, blocks);
    assert_eq!(revisions[0].title, "About");
    assert_eq!(revisions[0].author.as_deref(), Some("admin"));
    assert_ne!(updated.blocks, blocks);
}

#[test]
fn test_duplicate_slug_leaves_first_page_alone() {
    let (service, _, ctx) = setup();
    let first = service.create(&ctx, NewPage::new("About", "about")).unwrap();

    let err = service
        .create(&ctx, NewPage::new("About again", "about"))
        .unwrap_err();
    assert!(matches!(err, PageError::DuplicateSlug(ref s) if s == "about"));

    assert_eq!(service.get(&first.id).unwrap(), first);
    assert_eq!(service.list().unwrap().len(), 1);
}

#[test]
fn test_slug_change_to_taken_slug_is_rejected() {
    let (service, _, ctx) = setup();
    service.create(&ctx, NewPage::new("About", "about")).unwrap();
    let other = service.create(&ctx, NewPage::new("Now", "now")).unwrap();

    let err = service
        .update_content(
            &ctx,
            &other.id,
            ContentUpdate::new().slug("About").title("Renamed"),
        )
        .unwrap_err();

    assert!(matches!(err, PageError::DuplicateSlug(_)));
    assert_eq!(service.get(&other.id).unwrap().title, "Now");
}

#[test]
fn test_publish_is_stamped_once() {
    let (service, clock, ctx) = setup();
    let page = service.create(&ctx, NewPage::new("Log", "log")).unwrap();
    assert_eq!(page.published_at, None);

    clock.advance(Duration::hours(1));
    let published = service
        .set_status(&ctx, &page.id, PageStatus::Published)
        .unwrap();
    let first_published = published.published_at.expect("publish stamps the time");

    clock.advance(Duration::hours(1));
    let draft = service.set_status(&ctx, &page.id, PageStatus::Draft).unwrap();
    assert_eq!(draft.published_at, Some(first_published));

    clock.advance(Duration::hours(1));
    let again = service
        .set_status(&ctx, &page.id, PageStatus::Published)
        .unwrap();
    assert_eq!(again.published_at, Some(first_published));
    assert!(again.updated_at > draft.updated_at);
}

#[test]
fn test_restore_round_trip() {
    let (service, clock, ctx) = setup();
    let page = service.create(&ctx, NewPage::new("Home", "")).unwrap();

    let (page, _) = service
        .apply_edit(
            &ctx,
            &page.id,
            &BlockEdit::Insert {
                payload: BlockPayload::heading("Version one", 1),
                at: None,
            },
        )
        .unwrap();
    let version_one = page.blocks.clone();

    clock.advance(Duration::seconds(30));
    let (page, _) = service
        .apply_edit(
            &ctx,
            &page.id,
            &BlockEdit::InsertDefault {
                kind: BlockKind::Divider,
                at: None,
            },
        )
        .unwrap();
    let before_restore = page.blocks.clone();

    let revisions = service.revisions(&page.id).unwrap();
    assert_eq!(revisions.len(), 1);
    assert_eq!(revisions[0].blocks, version_one);

    let restored = service
        .restore_revision(&ctx, &page.id, &revisions[0].id)
        .unwrap();
    // Restoring alone writes nothing
    assert_eq!(service.revisions(&page.id).unwrap().len(), 1);

    clock.advance(Duration::seconds(30));
    let page = service
        .update_content(&ctx, &page.id, ContentUpdate::from(restored))
        .unwrap();

    assert_eq!(page.blocks, version_one);
    assert_eq!(page.title, "Home");

    let revisions = service.revisions(&page.id).unwrap();
    assert_eq!(revisions.len(), 2);
    assert_eq!(revisions[0].blocks, before_restore);
    assert_eq!(revisions[0].number, 2);
    assert!(revisions[0]
        .editor_note
        .as_deref()
        .is_some_and(|note| note.contains("#1")));
}

#[test]
fn test_restore_unknown_revision() {
    let (service, _, ctx) = setup();
    let page = service.create(&ctx, NewPage::new("About", "about")).unwrap();

    let err = service
        .restore_revision(&ctx, &page.id, "no-such-revision")
        .unwrap_err();
    assert!(matches!(err, PageError::RevisionNotFound { .. }));
}

#[test]
fn test_revision_retention_on_delete() {
    for (retention, expected) in [(RevisionRetention::Retain, 1), (RevisionRetention::Cascade, 0)] {
        let store = Arc::new(MemoryStore::new());
        let service = PageService::new(store.clone()).with_options(PageServiceOptions {
            on_page_delete: retention,
            keep_last: None,
        });
        let ctx = OperatorContext::authenticated("admin");

        let page = service.create(&ctx, NewPage::new("Tmp", "tmp")).unwrap();
        for text in ["one", "two"] {
            service
                .apply_edit(
                    &ctx,
                    &page.id,
                    &BlockEdit::Insert {
                        payload: BlockPayload::heading(text, 2),
                        at: None,
                    },
                )
                .unwrap();
        }

        service.delete(&ctx, &page.id).unwrap();

        assert_eq!(store.page_count(), 0);
        assert_eq!(store.revision_count(), expected, "{:?}", retention);
        assert!(matches!(
            service.get(&page.id),
            Err(PageError::PageNotFound(_))
        ));
    }
}

#[test]
fn test_slug_can_be_reused_after_delete() {
    let (service, _, ctx) = setup();
    let page = service.create(&ctx, NewPage::new("About", "about")).unwrap();
    service.delete(&ctx, &page.id).unwrap();

    let again = service.create(&ctx, NewPage::new("About", "about")).unwrap();
    assert_ne!(again.id, page.id);
}
