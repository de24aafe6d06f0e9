//! Initialize workspace use case

use crate::error::Result;
use crate::infrastructure::{Config, Workspace};
use std::fs;
use std::path::Path;

/// Initialize a newsdesk workspace at the specified path
pub fn init(path: &Path, data_file: Option<String>, publish: bool) -> Result<Config> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let workspace = Workspace::new(path.to_path_buf());
    workspace.initialize()?;

    let mut config = Config::default();
    if let Some(data_file) = data_file {
        config.data_file = data_file;
    }
    config.publish.enabled = publish;

    workspace.save_config(&config)?;
    tracing::info!(root = %path.display(), "initialized workspace");

    Ok(config)
}
