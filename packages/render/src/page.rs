//! Whole-page rendering for the public site

use mosaic_pages::{Page, PageError, PageRepository, PageService, RevisionRepository};
use serde::Serialize;

use crate::{
    render_for_display, resolve_modules, to_html, ContentProvider, HtmlOptions, VNode,
};

/// Rendered page body plus the metadata for its `<head>`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedPage {
    /// `seoTitle`, falling back to the page title
    pub title: String,
    pub description: Option<String>,
    /// The `<article>` element
    pub html: String,
}

/// Render a page's blocks in order, resolving module content
pub fn render_page(
    page: &Page,
    provider: &dyn ContentProvider,
    options: &HtmlOptions,
) -> RenderedPage {
    let article = resolve_modules(page_tree(page), provider);

    RenderedPage {
        title: page.display_title().to_string(),
        description: page.seo_description.clone(),
        html: to_html(&article, options),
    }
}

/// Render a page as a complete HTML document
pub fn render_document(
    page: &Page,
    provider: &dyn ContentProvider,
    options: &HtmlOptions,
) -> String {
    let article = resolve_modules(page_tree(page), provider);

    let mut head = VNode::element("head")
        .with_child(VNode::element("meta").with_attr("charset", "UTF-8"))
        .with_child(
            VNode::element("meta")
                .with_attr("name", "viewport")
                .with_attr("content", "width=device-width, initial-scale=1.0"),
        )
        .with_child(VNode::element("title").with_child(VNode::text(page.display_title())));
    if let Some(description) = &page.seo_description {
        head = head.with_child(
            VNode::element("meta")
                .with_attr("name", "description")
                .with_attr("content", description.clone()),
        );
    }

    let document = VNode::element("html")
        .with_attr("lang", "en")
        .with_child(head)
        .with_child(VNode::element("body").with_child(article));

    let mut output = String::from("<!DOCTYPE html>");
    if options.pretty {
        output.push('\n');
    }
    output.push_str(&to_html(&document, options));
    output
}

fn page_tree(page: &Page) -> VNode {
    VNode::element("article")
        .with_class(format!("page template-{}", page.template))
        .with_attr("data-page-id", page.id.clone())
        .with_children(page.blocks.iter().map(render_for_display))
}

/// Answer to a public request for a slug
#[derive(Debug, Clone, PartialEq)]
pub enum SiteResponse {
    Page(RenderedPage),
    /// Missing or unpublished; the two are indistinguishable to visitors
    NotFound,
    /// Storage failed; details are logged, never shown
    Unavailable,
}

/// Public site front: published pages only, no internal errors exposed
pub struct SiteRenderer<'a, S> {
    pages: &'a PageService<S>,
    provider: &'a dyn ContentProvider,
    options: HtmlOptions,
}

impl<'a, S: PageRepository + RevisionRepository> SiteRenderer<'a, S> {
    pub fn new(pages: &'a PageService<S>, provider: &'a dyn ContentProvider) -> Self {
        Self {
            pages,
            provider,
            options: HtmlOptions::default(),
        }
    }

    pub fn with_options(mut self, options: HtmlOptions) -> Self {
        self.options = options;
        self
    }

    pub fn serve(&self, slug: &str) -> SiteResponse {
        match self.pages.published_by_slug(slug) {
            Ok(page) => SiteResponse::Page(render_page(&page, self.provider, &self.options)),
            Err(PageError::PageNotFound(_)) => SiteResponse::NotFound,
            Err(e) => {
                tracing::error!(slug = %slug, error = %e, "failed to load page");
                SiteResponse::Unavailable
            }
        }
    }
}
