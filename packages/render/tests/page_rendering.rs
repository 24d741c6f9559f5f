//! Rendering whole pages with module content and damaged blocks

use mosaic_blocks::{Block, BlockKind, BlockList, BlockPayload};
use mosaic_render::{
    render_page, ContentItem, ContentProvider, HtmlOptions, ModuleRequest, ProviderError,
};

/// Serves log entries, fails for everything else
struct LogOnly;

impl ContentProvider for LogOnly {
    fn resolve(&self, request: &ModuleRequest) -> Result<Vec<ContentItem>, ProviderError> {
        match request {
            ModuleRequest::LogList { .. } => Ok(vec![
                ContentItem::new("Shipped v2")
                    .with_href("/log/shipped-v2")
                    .with_date("2024-03-01"),
                ContentItem::new("Started v2").with_date("2024-02-01"),
            ]),
            other => Err(ProviderError::Unavailable(other.kind().to_string())),
        }
    }
}

fn page_with(blocks: serde_json::Value) -> mosaic_pages::Page {
    serde_json::from_value(serde_json::json!({
        "id": "p-1",
        "slug": "now",
        "title": "Now",
        "template": "full-width",
        "status": "published",
        "blocks": blocks,
        "createdAt": "2024-03-01T00:00:00Z",
        "updatedAt": "2024-03-01T00:00:00Z",
        "publishedAt": "2024-03-01T00:00:00Z"
    }))
    .expect("valid page document")
}

#[test]
fn test_one_bad_block_does_not_take_down_the_page() {
    let mut blocks = BlockList::new();
    blocks
        .insert(BlockPayload::heading("Now", 1), None)
        .unwrap();
    blocks
        .insert(BlockKind::LogList.default_payload(), None)
        .unwrap();
    blocks
        .insert(BlockKind::Portfolio.default_payload(), None)
        .unwrap();
    let mut stored = serde_json::to_value(&blocks).unwrap();
    stored.as_array_mut().unwrap().push(serde_json::json!({
        "id": "legacy", "order": 3, "kind": "slideshow", "payload": {"speed": 4}
    }));

    let page = page_with(stored);
    let rendered = render_page(&page, &LogOnly, &HtmlOptions::default());

    assert!(rendered.html.contains("<h1>Now</h1>"));
    assert!(rendered.html.contains("<a href=\"/log/shipped-v2\">Shipped v2</a>"));
    assert!(rendered.html.contains("<time datetime=\"2024-02-01\">2024-02-01</time>"));
    // Portfolio provider failed, legacy kind unknown: two placeholders
    assert_eq!(rendered.html.matches("block-placeholder").count(), 2);
    assert!(rendered.html.contains("data-kind=\"slideshow\""));
}

#[test]
fn test_blocks_render_by_stored_order() {
    let first = Block::new(BlockPayload::heading("first", 2));
    let second = Block::new(BlockPayload::heading("second", 2));
    // Stored out of sequence; loading normalizes by order
    let mut a = serde_json::to_value(&first).unwrap();
    a["order"] = 5.into();
    let mut b = serde_json::to_value(&second).unwrap();
    b["order"] = 9.into();
    let page = page_with(serde_json::json!([b, a]));

    let html = render_page(&page, &LogOnly, &HtmlOptions::compact()).html;
    assert!(html.find("first").unwrap() < html.find("second").unwrap());
}
