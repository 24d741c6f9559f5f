use super::page::display_slug;
use super::Site;
use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use mosaic_editor::EditingSession;
use std::path::Path;

#[derive(Debug, Subcommand)]
pub enum RevisionsCommand {
    /// List a page's revisions, newest first
    List { slug: String },

    /// Bring back the title and blocks of a revision
    Restore {
        slug: String,
        revision_id: String,

        /// Publish the page after restoring
        #[arg(long)]
        publish: bool,
    },
}

pub fn revisions(command: RevisionsCommand, cwd: &Path) -> Result<()> {
    let site = Site::open(cwd)?;

    match command {
        RevisionsCommand::List { slug } => {
            let page = site.service.get_by_slug(&slug)?;
            let revisions = site.service.revisions(&page.id)?;
            if revisions.is_empty() {
                println!("{}", "No revisions yet".dimmed());
                return Ok(());
            }

            for revision in &revisions {
                println!(
                    "  {:>4}  {}  {:<24} {} blocks  {}",
                    format!("#{}", revision.number).bright_white(),
                    revision.created_at.format("%Y-%m-%d %H:%M:%S"),
                    revision.title,
                    revision.blocks.len(),
                    revision.id.dimmed()
                );
                if let Some(note) = &revision.editor_note {
                    println!("         {}", note.italic());
                }
            }
        }

        RevisionsCommand::Restore {
            slug,
            revision_id,
            publish,
        } => {
            let page = site.service.get_by_slug(&slug)?;
            let restored = site
                .service
                .restore_revision(&site.ctx, &page.id, &revision_id)?;
            let number = restored.revision_number;

            let mut session = EditingSession::open(page);
            session.load_restored(restored)?;
            let page = if publish {
                session.publish(&site.service, &site.ctx)?
            } else {
                session.save_draft(&site.service, &site.ctx)?
            };

            println!(
                "{} Restored revision #{} on {}",
                "✓".green(),
                number,
                display_slug(page)
            );
        }
    }

    Ok(())
}
