use mosaic_blocks::BlockList;
use mosaic_pages::{ContentUpdate, Page, PageStatus, Template};
use serde::{Deserialize, Serialize};

/// Locally edited page content, not yet saved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingCopy {
    pub title: String,
    pub slug: String,
    pub template: Template,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub blocks: BlockList,
}

impl WorkingCopy {
    pub fn from_page(page: &Page) -> Self {
        Self {
            title: page.title.clone(),
            slug: page.slug.clone(),
            template: page.template,
            seo_title: page.seo_title.clone(),
            seo_description: page.seo_description.clone(),
            blocks: page.blocks.clone(),
        }
    }

    /// Full update carrying every working field
    pub fn to_update(&self, publish: bool) -> ContentUpdate {
        let update = ContentUpdate::new()
            .title(self.title.clone())
            .slug(self.slug.clone())
            .template(self.template)
            .seo_title(self.seo_title.clone())
            .seo_description(self.seo_description.clone())
            .blocks(self.blocks.clone());

        if publish {
            update.status(PageStatus::Published)
        } else {
            update
        }
    }

    /// `base` with this working copy laid over it
    pub fn apply_to(&self, base: &Page) -> Page {
        Page {
            title: self.title.clone(),
            slug: self.slug.clone(),
            template: self.template,
            seo_title: self.seo_title.clone(),
            seo_description: self.seo_description.clone(),
            blocks: self.blocks.clone(),
            ..base.clone()
        }
    }
}
