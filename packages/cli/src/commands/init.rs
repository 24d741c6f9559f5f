use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use mosaic_pages::{JsonFileStore, RevisionRetention};
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Data directory for pages and revisions
    #[arg(short, long, default_value = "data")]
    pub data_dir: String,

    /// Delete revisions together with their page
    #[arg(long)]
    pub cascade: bool,

    /// Keep at most this many revisions per page
    #[arg(long)]
    pub keep_last: Option<usize>,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Mosaic site...".bright_blue().bold());

    let mut config = Config {
        data_dir: args.data_dir.clone(),
        ..Config::default()
    };
    if args.cascade {
        config.revisions.on_page_delete = RevisionRetention::Cascade;
    }
    config.revisions.keep_last = args.keep_last;

    JsonFileStore::open(config.get_data_dir(cwd))?;
    println!("  {} Created {}/", "✓".green(), args.data_dir);

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    println!();
    println!("{}", "✅ Site initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: mosaic page new \"Home\" --slug /");
    println!("  2. Run: mosaic block add / heading");
    println!("  3. Run: mosaic render /");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_config_and_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        init(
            InitArgs {
                data_dir: "content".to_string(),
                cascade: true,
                keep_last: Some(5),
                force: false,
            },
            dir.path(),
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.data_dir, "content");
        assert_eq!(config.revisions.on_page_delete, RevisionRetention::Cascade);
        assert_eq!(config.revisions.keep_last, Some(5));
        assert!(dir.path().join("content").join("pages").is_dir());
    }

    #[test]
    fn test_init_keeps_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(DEFAULT_CONFIG_NAME), r#"{"dataDir":"mine"}"#).unwrap();

        init(
            InitArgs {
                data_dir: "data".to_string(),
                cascade: false,
                keep_last: None,
                force: false,
            },
            dir.path(),
        )
        .unwrap();

        assert_eq!(Config::load(dir.path()).unwrap().data_dir, "mine");
    }
}
