use super::Site;
use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use mosaic_pages::{normalize_slug, NewPage, Page, PageStatus, Template};
use std::path::Path;

#[derive(Debug, Subcommand)]
pub enum PageCommand {
    /// Create an empty page
    New(NewArgs),

    /// List all pages
    List {
        /// Print pages as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one page and its blocks
    Show {
        slug: String,

        /// Print the stored page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Make a page visible on the public site
    Publish { slug: String },

    /// Return a page to draft
    Unpublish { slug: String },

    /// Delete a page
    Delete { slug: String },
}

#[derive(Debug, Args)]
pub struct NewArgs {
    pub title: String,

    /// URL slug (defaults to the title, normalized)
    #[arg(short, long)]
    pub slug: Option<String>,

    /// Layout template (default, full-width, narrow)
    #[arg(short, long, default_value = "default")]
    pub template: Template,

    /// Publish immediately
    #[arg(long)]
    pub publish: bool,
}

pub fn page(command: PageCommand, cwd: &Path) -> Result<()> {
    let site = Site::open(cwd)?;

    match command {
        PageCommand::New(args) => {
            let slug = args.slug.unwrap_or_else(|| normalize_slug(&args.title));
            let status = if args.publish {
                PageStatus::Published
            } else {
                PageStatus::Draft
            };
            let page = site.service.create(
                &site.ctx,
                NewPage::new(args.title, slug)
                    .with_template(args.template)
                    .with_status(status),
            )?;
            println!(
                "{} Created {} {}",
                "✓".green(),
                display_slug(&page).bright_white(),
                page.id.dimmed()
            );
        }

        PageCommand::List { json } => {
            let pages = site.service.list()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&pages)?);
            } else if pages.is_empty() {
                println!("{}", "⚠️  No pages yet".yellow());
            } else {
                for page in &pages {
                    println!(
                        "  {} {:<24} {:<32} {}",
                        status_badge(page.status),
                        display_slug(page),
                        page.title,
                        page.updated_at.format("%Y-%m-%d %H:%M").to_string().dimmed()
                    );
                }
            }
        }

        PageCommand::Show { slug, json } => {
            let page = site.service.get_by_slug(&slug)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&page)?);
            } else {
                print_page(&page);
            }
        }

        PageCommand::Publish { slug } => {
            let page = site.service.get_by_slug(&slug)?;
            let page = site
                .service
                .set_status(&site.ctx, &page.id, PageStatus::Published)?;
            println!("{} Published {}", "✓".green(), display_slug(&page));
        }

        PageCommand::Unpublish { slug } => {
            let page = site.service.get_by_slug(&slug)?;
            let page = site
                .service
                .set_status(&site.ctx, &page.id, PageStatus::Draft)?;
            println!("{} Unpublished {}", "✓".green(), display_slug(&page));
        }

        PageCommand::Delete { slug } => {
            let page = site.service.get_by_slug(&slug)?;
            site.service.delete(&site.ctx, &page.id)?;
            println!("{} Deleted {}", "✓".green(), display_slug(&page));
        }
    }

    Ok(())
}

pub(crate) fn display_slug(page: &Page) -> String {
    format!("/{}", page.slug)
}

fn status_badge(status: PageStatus) -> colored::ColoredString {
    match status {
        PageStatus::Published => "published".green(),
        PageStatus::Draft => "draft    ".yellow(),
    }
}

fn print_page(page: &Page) {
    println!("{}", page.title.bright_white().bold());
    println!("  id:        {}", page.id);
    println!("  slug:      {}", display_slug(page));
    println!("  status:    {}", status_badge(page.status));
    println!("  template:  {}", page.template);
    if let Some(seo_title) = &page.seo_title {
        println!("  seo title: {}", seo_title);
    }
    if let Some(description) = &page.seo_description {
        println!("  seo desc:  {}", description);
    }
    println!("  updated:   {}", page.updated_at.to_rfc3339());
    if let Some(published_at) = page.published_at {
        println!("  published: {}", published_at.to_rfc3339());
    }

    println!();
    if page.blocks.is_empty() {
        println!("  {}", "No blocks".dimmed());
        return;
    }
    for (index, block) in page.blocks.iter().enumerate() {
        let kind = if block.is_known() {
            block.kind_name().normal()
        } else {
            format!("{} (unknown)", block.kind_name()).red()
        };
        println!("  {:>3}  {:<16} {}", index, kind, block.id.dimmed());
    }
}
