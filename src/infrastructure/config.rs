//! Configuration management

use crate::error::{NewsdeskError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Directory marking a newsdesk workspace
pub const WORKSPACE_DIR: &str = ".newsdesk";
const CONFIG_FILE: &str = "config.toml";

pub const DEFAULT_DATA_FILE: &str = "jornal.json";
pub const DEFAULT_ASSETS_DIR: &str = "../images/noticias";
pub const DEFAULT_REMOTE: &str = "origin";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// News data file, relative to the workspace root
    pub data_file: String,
    /// Where imported images are copied, relative to the workspace root
    pub assets_dir: String,
    /// Prefix of the image paths written into records
    pub asset_prefix: String,
    pub publish: PublishConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    pub enabled: bool,
    pub remote: String,
    /// Branch to push; the checked-out branch when unset
    pub branch: Option<String>,
    /// Fallback commit identity when git has no user configured
    pub author_name: String,
    pub author_email: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_file: DEFAULT_DATA_FILE.to_string(),
            assets_dir: DEFAULT_ASSETS_DIR.to_string(),
            asset_prefix: DEFAULT_ASSETS_DIR.to_string(),
            publish: PublishConfig::default(),
        }
    }
}

impl Default for PublishConfig {
    fn default() -> Self {
        PublishConfig {
            enabled: true,
            remote: DEFAULT_REMOTE.to_string(),
            branch: None,
            author_name: "newsdesk".to_string(),
            author_email: "newsdesk@localhost".to_string(),
        }
    }
}

impl Config {
    /// Load config from .newsdesk/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(WORKSPACE_DIR).join(CONFIG_FILE);

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                NewsdeskError::NotWorkspace(path.to_path_buf())
            } else {
                NewsdeskError::Io(e)
            }
        })?;

        toml::from_str(&contents)
            .map_err(|e| NewsdeskError::Config(format!("Failed to parse config.toml: {}", e)))
    }

    /// Save config to .newsdesk/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let workspace_dir = path.join(WORKSPACE_DIR);
        let config_path = workspace_dir.join(CONFIG_FILE);

        if !workspace_dir.exists() {
            fs::create_dir(&workspace_dir)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.data_file, "jornal.json");
        assert_eq!(config.assets_dir, "../images/noticias");
        assert_eq!(config.asset_prefix, "../images/noticias");
        assert!(config.publish.enabled);
        assert_eq!(config.publish.remote, "origin");
        assert_eq!(config.publish.branch, None);
    }

    #[test]
    fn test_save_and_load_config() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.data_file = "data/noticias.json".to_string();
        config.publish.branch = Some("gh-pages".to_string());

        config.save_to_dir(temp.path()).unwrap();
        assert!(temp.path().join(".newsdesk/config.toml").exists());

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();

        match Config::load_from_dir(temp.path()).unwrap_err() {
            NewsdeskError::NotWorkspace(_) => {}
            other => panic!("Expected NotWorkspace error, got {:?}", other),
        }
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".newsdesk")).unwrap();
        fs::write(
            temp.path().join(".newsdesk/config.toml"),
            "data_file = \"news.json\"\n\n[publish]\nenabled = false\n",
        )
        .unwrap();

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded.data_file, "news.json");
        assert_eq!(loaded.assets_dir, "../images/noticias");
        assert!(!loaded.publish.enabled);
        assert_eq!(loaded.publish.remote, "origin");
    }

    #[test]
    fn test_invalid_config_reports_parse_error() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".newsdesk")).unwrap();
        fs::write(temp.path().join(".newsdesk/config.toml"), "data_file = [").unwrap();

        match Config::load_from_dir(temp.path()).unwrap_err() {
            NewsdeskError::Config(msg) => assert!(msg.contains("config.toml")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }
}
