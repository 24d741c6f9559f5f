pub mod block;
pub mod init;
pub mod kinds;
pub mod page;
pub mod render;
pub mod revisions;

pub use block::{block, BlockCommand};
pub use init::{init, InitArgs};
pub use kinds::{kinds, KindsArgs};
pub use page::{page, PageCommand};
pub use render::{render, RenderArgs};
pub use revisions::{revisions, RevisionsCommand};

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use mosaic_pages::{JsonFileStore, OperatorContext, PageService};

use crate::config::Config;

/// Page service over the configured data directory
pub(crate) struct Site {
    pub config: Config,
    pub service: PageService<JsonFileStore>,
    pub ctx: OperatorContext,
}

impl Site {
    pub fn open(cwd: &Path) -> Result<Self> {
        let config = Config::load(cwd)?;
        let store = JsonFileStore::open(config.get_data_dir(cwd))?;
        let service =
            PageService::new(Arc::new(store)).with_options(config.revisions.clone());

        Ok(Self {
            config,
            service,
            ctx: OperatorContext::authenticated(operator_name()),
        })
    }
}

/// The local operator, taken from the environment
fn operator_name() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "operator".to_string())
}
