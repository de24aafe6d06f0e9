//! Workspace discovery and layout

use crate::error::{NewsdeskError, Result};
use crate::infrastructure::assets::AssetLibrary;
use crate::infrastructure::config::{Config, WORKSPACE_DIR};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding workspace discovery
pub const ROOT_ENV: &str = "NEWSDESK_ROOT";

/// A directory containing `.newsdesk/`
#[derive(Debug, Clone)]
pub struct Workspace {
    pub root: PathBuf,
}

impl Workspace {
    /// Create a workspace handle for the given root directory
    pub fn new(root: PathBuf) -> Self {
        Workspace { root }
    }

    /// Discover the workspace root.
    /// Checks NEWSDESK_ROOT first, then walks up from the current directory.
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var(ROOT_ENV) {
            let path = PathBuf::from(root_path);
            if Self::has_workspace_dir(&path) {
                return Ok(Workspace::new(path));
            } else {
                return Err(NewsdeskError::Config(format!(
                    "{} is set to '{}' but no {} directory found. \
                    Run 'newsdesk init' in that directory or unset {}.",
                    ROOT_ENV,
                    path.display(),
                    WORKSPACE_DIR,
                    ROOT_ENV
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover the workspace root by walking up from `start`
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_workspace_dir(&current) {
                return Ok(Workspace::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(NewsdeskError::NotWorkspace(start.to_path_buf())),
            }
        }
    }

    fn has_workspace_dir(path: &Path) -> bool {
        path.join(WORKSPACE_DIR).is_dir()
    }

    pub fn is_initialized(&self) -> bool {
        Self::has_workspace_dir(&self.root)
    }

    /// Create the `.newsdesk` directory; fails if it already exists
    pub fn initialize(&self) -> Result<()> {
        let workspace_dir = self.root.join(WORKSPACE_DIR);

        if workspace_dir.exists() {
            return Err(NewsdeskError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir_all(&workspace_dir)?;
        Ok(())
    }

    pub fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    pub fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    /// Resolve a config path (relative to the root unless absolute)
    pub fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    pub fn data_path(&self, config: &Config) -> PathBuf {
        self.resolve(&config.data_file)
    }

    pub fn assets(&self, config: &Config) -> AssetLibrary {
        AssetLibrary::new(self.resolve(&config.assets_dir), config.asset_prefix.clone())
    }
}
