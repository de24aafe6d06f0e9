//! Durable storage for the news document

use crate::domain::NewsDocument;
use crate::error::{NewsdeskError, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// How the document in memory came to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    /// Parsed from the data file
    File,
    /// No data file yet (first run)
    Missing,
    /// The data file could not be parsed; started empty
    Corrupt(String),
}

#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub document: NewsDocument,
    pub source: LoadSource,
}

/// Storage for the whole news document
pub trait DocumentStorage {
    /// Location of the data file
    fn path(&self) -> &Path;

    /// Read the document. A missing or malformed file is not an error.
    fn load(&self) -> Result<LoadedDocument>;

    /// Overwrite storage with the full document
    fn save(&self, document: &NewsDocument) -> Result<()>;

    /// Keep a copy of the current (unparseable) file before it is overwritten
    fn backup(&self) -> Result<Option<PathBuf>>;
}

/// JSON file implementation of DocumentStorage
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: PathBuf) -> Self {
        JsonFileStorage { path }
    }

    fn storage_error(&self, source: io::Error) -> NewsdeskError {
        NewsdeskError::Storage {
            path: self.path.clone(),
            source,
        }
    }

    /// Write to a sibling temp file, then rename into place.
    ///
    /// On Windows, `rename` does not overwrite existing files, so the destination is removed first.
    fn write_atomic(&self, content: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_name = format!(
            "{}.newsdesk-tmp-{}",
            self.path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("news.json"),
            std::process::id()
        );
        let tmp_path = self.path.with_file_name(tmp_name);

        fs::write(&tmp_path, content)?;

        if cfg!(windows) && self.path.exists() {
            fs::remove_file(&self.path)?;
        }

        fs::rename(&tmp_path, &self.path)
    }
}

impl DocumentStorage for JsonFileStorage {
    fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<LoadedDocument> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no data file, starting empty");
                return Ok(LoadedDocument {
                    document: NewsDocument::new(),
                    source: LoadSource::Missing,
                });
            }
            Err(e) => return Err(NewsdeskError::Io(e)),
        };

        match serde_json::from_slice::<NewsDocument>(&bytes) {
            Ok(document) => Ok(LoadedDocument {
                document,
                source: LoadSource::File,
            }),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "data file is malformed, starting empty"
                );
                Ok(LoadedDocument {
                    document: NewsDocument::new(),
                    source: LoadSource::Corrupt(e.to_string()),
                })
            }
        }
    }

    fn save(&self, document: &NewsDocument) -> Result<()> {
        let mut content = serde_json::to_string_pretty(document)?;
        content.push('\n');

        self.write_atomic(&content)
            .map_err(|e| self.storage_error(e))?;

        tracing::debug!(
            path = %self.path.display(),
            records = document.records().len(),
            "wrote news document"
        );
        Ok(())
    }

    fn backup(&self) -> Result<Option<PathBuf>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let mut backup_name = self.path.as_os_str().to_owned();
        backup_name.push(".corrupt");
        let backup_path = PathBuf::from(backup_name);

        fs::copy(&self.path, &backup_path).map_err(|e| self.storage_error(e))?;
        Ok(Some(backup_path))
    }
}
