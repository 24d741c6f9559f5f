use super::page::display_slug;
use super::Site;
use anyhow::{anyhow, Result};
use clap::Subcommand;
use colored::Colorize;
use mosaic_blocks::{BlockKind, FieldSpec, FieldValue, GalleryImage, InputKind};
use mosaic_editor::EditingSession;
use std::path::Path;

#[derive(Debug, Subcommand)]
pub enum BlockCommand {
    /// Append a block of the given kind with its default content
    Add {
        slug: String,
        kind: String,

        /// Insert at this position instead of appending
        #[arg(long)]
        at: Option<usize>,
    },

    /// Move the block at one position to another
    Move {
        slug: String,
        from: usize,
        to: usize,
    },

    /// Remove a block
    Remove { slug: String, block_id: String },

    /// Set one field of a block
    Set {
        slug: String,
        block_id: String,
        field: String,
        value: String,
    },
}

pub fn block(command: BlockCommand, cwd: &Path) -> Result<()> {
    let site = Site::open(cwd)?;

    let slug = match &command {
        BlockCommand::Add { slug, .. }
        | BlockCommand::Move { slug, .. }
        | BlockCommand::Remove { slug, .. }
        | BlockCommand::Set { slug, .. } => slug.clone(),
    };
    let mut session = EditingSession::open(site.service.get_by_slug(&slug)?);

    let message = match command {
        BlockCommand::Add { kind, at, .. } => {
            let kind: BlockKind = kind.parse()?;
            let block_id = session.insert_default(kind, at)?;
            format!("Added {} {}", kind, block_id.dimmed())
        }

        BlockCommand::Move { from, to, .. } => {
            session.move_block(from, to)?;
            format!("Moved block {} → {}", from, to)
        }

        BlockCommand::Remove { block_id, .. } => {
            if !session.remove_block(&block_id)? {
                println!("{} No block {}", "⚠️".yellow(), block_id);
                return Ok(());
            }
            format!("Removed {}", block_id)
        }

        BlockCommand::Set {
            block_id,
            field,
            value,
            ..
        } => {
            let block = session
                .working()
                .blocks
                .get(&block_id)
                .ok_or_else(|| anyhow!("Block not found: {}", block_id))?;
            let kind = block
                .kind()
                .ok_or_else(|| anyhow!("Block {} has unknown kind '{}'", block_id, block.kind_name()))?;
            let spec = kind.field(&field).ok_or_else(|| {
                let names: Vec<&str> = kind.fields().iter().map(|f| f.name).collect();
                anyhow!("{} has no field '{}' (fields: {})", kind, field, names.join(", "))
            })?;

            session.update_field(&block_id, &field, parse_value(spec, &value)?)?;
            format!("Set {}.{}", block_id, field)
        }
    };

    let page = session.save_draft(&site.service, &site.ctx)?;
    println!("{} {} on {}", "✓".green(), message, display_slug(page));
    Ok(())
}

/// Interpret a command-line value for a field's input kind
fn parse_value(spec: &FieldSpec, raw: &str) -> Result<FieldValue> {
    let value = match spec.input {
        InputKind::Number { .. } => FieldValue::Number(
            raw.trim()
                .parse()
                .map_err(|_| anyhow!("{} expects a number, got '{}'", spec.name, raw))?,
        ),
        InputKind::Toggle => FieldValue::Toggle(
            raw.trim()
                .parse()
                .map_err(|_| anyhow!("{} expects true or false, got '{}'", spec.name, raw))?,
        ),
        InputKind::Images => {
            let images: Vec<GalleryImage> = serde_json::from_str(raw)
                .map_err(|e| anyhow!("{} expects a JSON image list: {}", spec.name, e))?;
            FieldValue::Images(images)
        }
        InputKind::Text
        | InputKind::Multiline
        | InputKind::Html
        | InputKind::Url
        | InputKind::Choice { .. } => FieldValue::text(raw),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(kind: BlockKind, name: &str) -> &'static FieldSpec {
        kind.field(name).unwrap()
    }

    #[test]
    fn test_parse_number() {
        let value = parse_value(spec(BlockKind::Heading, "level"), " 2 ").unwrap();
        assert_eq!(value, FieldValue::Number(2));
        assert!(parse_value(spec(BlockKind::Heading, "level"), "two").is_err());
    }

    #[test]
    fn test_parse_toggle() {
        let value = parse_value(spec(BlockKind::Guestbook, "show_form"), "false").unwrap();
        assert_eq!(value, FieldValue::Toggle(false));
    }

    #[test]
    fn test_parse_images() {
        let value = parse_value(
            spec(BlockKind::Gallery, "images"),
            r#"[{"src": "/a.jpg", "alt": "A"}]"#,
        )
        .unwrap();
        let FieldValue::Images(images) = value else {
            panic!("Expected images");
        };
        assert_eq!(images[0].src, "/a.jpg");
    }

    #[test]
    fn test_text_passes_through() {
        let value = parse_value(spec(BlockKind::RichText, "html"), "<p>hi</p>").unwrap();
        assert_eq!(value, FieldValue::text("<p>hi</p>"));
    }
}
