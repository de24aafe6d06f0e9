//! Config management use case

use crate::error::{NewsdeskError, Result};
use crate::infrastructure::{Config, Workspace};

/// Keys accepted by `get` and `set`
pub const CONFIG_KEYS: &[&str] = &[
    "data_file",
    "assets_dir",
    "asset_prefix",
    "publish.enabled",
    "publish.remote",
    "publish.branch",
    "publish.author_name",
    "publish.author_email",
];

/// Service for managing workspace configuration
pub struct ConfigService {
    workspace: Workspace,
}

impl ConfigService {
    pub fn new(workspace: Workspace) -> Self {
        ConfigService { workspace }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.workspace.load_config()?;
        value_of(&config, key)
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.workspace.load_config()?;

        match key {
            "data_file" => config.data_file = non_empty(key, value)?,
            "assets_dir" => config.assets_dir = non_empty(key, value)?,
            "asset_prefix" => config.asset_prefix = value.to_string(),
            "publish.enabled" => {
                config.publish.enabled = parse_bool(value).ok_or_else(|| {
                    NewsdeskError::Config(format!(
                        "Invalid value for publish.enabled: '{}' (expected true or false)",
                        value
                    ))
                })?;
            }
            "publish.remote" => config.publish.remote = non_empty(key, value)?,
            "publish.branch" => {
                config.publish.branch = if value.trim().is_empty() {
                    None
                } else {
                    Some(value.trim().to_string())
                };
            }
            "publish.author_name" => config.publish.author_name = non_empty(key, value)?,
            "publish.author_email" => config.publish.author_email = non_empty(key, value)?,
            _ => return Err(unknown_key(key)),
        }

        self.workspace.save_config(&config)?;
        Ok(())
    }

    /// All keys with their current values, in display order
    pub fn list(&self) -> Result<Vec<(&'static str, String)>> {
        let config = self.workspace.load_config()?;
        CONFIG_KEYS
            .iter()
            .map(|key| value_of(&config, key).map(|value| (*key, value)))
            .collect()
    }
}

fn value_of(config: &Config, key: &str) -> Result<String> {
    let value = match key {
        "data_file" => config.data_file.clone(),
        "assets_dir" => config.assets_dir.clone(),
        "asset_prefix" => config.asset_prefix.clone(),
        "publish.enabled" => config.publish.enabled.to_string(),
        "publish.remote" => config.publish.remote.clone(),
        "publish.branch" => config.publish.branch.clone().unwrap_or_default(),
        "publish.author_name" => config.publish.author_name.clone(),
        "publish.author_email" => config.publish.author_email.clone(),
        _ => return Err(unknown_key(key)),
    };
    Ok(value)
}

fn unknown_key(key: &str) -> NewsdeskError {
    NewsdeskError::Config(format!(
        "Unknown config key: '{}'. Valid keys are: {}",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

fn non_empty(key: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(NewsdeskError::Config(format!("{} must not be empty", key)));
    }
    Ok(value.to_string())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}
