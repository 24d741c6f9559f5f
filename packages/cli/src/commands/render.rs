use super::Site;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use mosaic_render::{render_document, render_page, NoContent, SiteRenderer, SiteResponse};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Page to render
    pub slug: String,

    /// Render only if the page is published, as a visitor would see it
    #[arg(long)]
    pub public: bool,

    /// Only the page's <article>, without the surrounding document
    #[arg(long)]
    pub fragment: bool,

    /// Compact output (overrides config)
    #[arg(long)]
    pub compact: bool,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub fn render(args: RenderArgs, cwd: &Path) -> Result<()> {
    let site = Site::open(cwd)?;
    let mut options = site.config.render.clone();
    if args.compact {
        options.pretty = false;
    }

    let html = if args.public {
        let renderer = SiteRenderer::new(&site.service, &NoContent).with_options(options);
        match renderer.serve(&args.slug) {
            SiteResponse::Page(rendered) => rendered.html,
            SiteResponse::NotFound => return Err(anyhow!("No published page at '{}'", args.slug)),
            SiteResponse::Unavailable => return Err(anyhow!("Site storage is unavailable")),
        }
    } else {
        let page = site.service.get_by_slug(&args.slug)?;
        if args.fragment {
            render_page(&page, &NoContent, &options).html
        } else {
            render_document(&page, &NoContent, &options)
        }
    };

    match args.out {
        Some(path) => {
            let path = cwd.join(path);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, html)?;
            println!("{} Wrote {}", "✓".green(), path.display());
        }
        None => print!("{}", html),
    }

    Ok(())
}
