//! Image import into the site's assets directory

use crate::error::{NewsdeskError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File extensions accepted as news images
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Copies images next to the site and hands back the path the web page uses
#[derive(Debug, Clone)]
pub struct AssetLibrary {
    assets_dir: PathBuf,
    web_prefix: String,
}

impl AssetLibrary {
    pub fn new(assets_dir: PathBuf, web_prefix: impl Into<String>) -> Self {
        AssetLibrary {
            assets_dir,
            web_prefix: web_prefix.into(),
        }
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    /// Copy `source` into the assets directory and return its web path.
    ///
    /// The copy is skipped when `source` already is the destination file.
    pub fn import(&self, source: &Path) -> Result<String> {
        let file_name = source
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                NewsdeskError::Validation(format!("invalid image path: {}", source.display()))
            })?;

        if !is_image(source) {
            return Err(NewsdeskError::Validation(format!(
                "not an image file ({}): {}",
                IMAGE_EXTENSIONS.join(", "),
                source.display()
            )));
        }

        let source_abs = fs::canonicalize(source)?;

        if !self.assets_dir.exists() {
            fs::create_dir_all(&self.assets_dir)?;
        }

        let destination = self.assets_dir.join(file_name);
        let same_file = fs::canonicalize(&destination)
            .map(|dest_abs| dest_abs == source_abs)
            .unwrap_or(false);

        if same_file {
            tracing::debug!(file = %source_abs.display(), "image already in assets directory");
        } else {
            fs::copy(&source_abs, &destination)?;
            tracing::debug!(
                from = %source_abs.display(),
                to = %destination.display(),
                "copied image"
            );
        }

        Ok(self.web_path(file_name))
    }

    /// Web path for a file in the assets directory, always with forward slashes
    pub fn web_path(&self, file_name: &str) -> String {
        let prefix = self.web_prefix.replace('\\', "/");
        let prefix = prefix.trim_end_matches('/');
        if prefix.is_empty() {
            file_name.to_string()
        } else {
            format!("{}/{}", prefix, file_name)
        }
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
