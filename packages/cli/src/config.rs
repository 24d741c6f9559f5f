use mosaic_pages::PageServiceOptions;
use mosaic_render::HtmlOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "mosaic.config.json";

/// Mosaic configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding pages and revisions
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Revision retention policy
    #[serde(default)]
    pub revisions: PageServiceOptions,

    /// HTML output options
    #[serde(default)]
    pub render: HtmlOptions,
}

fn default_data_dir() -> String {
    "data".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Invalid {}: {}", DEFAULT_CONFIG_NAME, e))?;
            Ok(config)
        } else {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            Ok(Config::default())
        }
    }

    /// Get absolute path to the data directory
    pub fn get_data_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.data_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            revisions: PageServiceOptions::default(),
            render: HtmlOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_pages::RevisionRetention;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "dataDir": "content",
            "revisions": { "onPageDelete": "cascade", "keepLast": 20 },
            "render": { "pretty": false }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.data_dir, "content");
        assert_eq!(config.revisions.on_page_delete, RevisionRetention::Cascade);
        assert_eq!(config.revisions.keep_last, Some(20));
        assert!(!config.render.pretty);
        assert_eq!(config.render.indent, "  ");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.data_dir, "data");
        assert_eq!(config.revisions.on_page_delete, RevisionRetention::Retain);
        assert_eq!(config.revisions.keep_last, None);
        assert!(config.render.pretty);
    }

    #[test]
    fn test_missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::load(dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn test_empty_object_means_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }
}
