//! Error types for newsdesk

use std::path::PathBuf;
use thiserror::Error;

/// Failures reported by the publish step (git)
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    #[error("No remote named '{0}' is configured")]
    NoRemote(String),

    #[error("Push rejected by remote: {0}")]
    PushRejected(String),

    #[error("Push failed: {0}")]
    PushFailed(String),

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),
}

/// Main error type for newsdesk
#[derive(Debug, Error)]
pub enum NewsdeskError {
    #[error("Not a newsdesk workspace: {0}")]
    NotWorkspace(PathBuf),

    #[error("Invalid news record: {0}")]
    Validation(String),

    #[error("News record not found: {0}")]
    NotFound(String),

    #[error("Failed to write {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Data file {} is unreadable: {reason}", path.display())]
    CorruptDocument { path: PathBuf, reason: String },

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl From<git2::Error> for NewsdeskError {
    fn from(err: git2::Error) -> Self {
        NewsdeskError::Repository(RepositoryError::Git(err))
    }
}

impl NewsdeskError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            NewsdeskError::NotWorkspace(_) => 2,
            NewsdeskError::Validation(_) => 3,
            NewsdeskError::NotFound(_) => 4,
            NewsdeskError::Repository(_) => 5,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            NewsdeskError::NotWorkspace(path) => {
                format!(
                    "Not a newsdesk workspace: {}\n\n\
                    Suggestions:\n\
                    • Run 'newsdesk init' in the site directory\n\
                    • Navigate to an existing newsdesk workspace\n\
                    • Set NEWSDESK_ROOT environment variable to your workspace path",
                    path.display()
                )
            }
            NewsdeskError::Validation(msg) if msg.contains("title") || msg.contains("date") => {
                format!(
                    "Invalid news record: {}\n\n\
                    Title and date are required.\n\
                    Example: newsdesk add --title \"Festa junina\" --date 2025-06-24",
                    msg
                )
            }
            NewsdeskError::NotFound(id) => {
                format!(
                    "News record not found: {}\n\n\
                    Suggestions:\n\
                    • List existing records with 'newsdesk list'\n\
                    • Record ids look like 'noticia-1a2b3c4d'",
                    id
                )
            }
            NewsdeskError::CorruptDocument { path, reason } => {
                format!(
                    "Data file {} is unreadable: {}\n\n\
                    Suggestions:\n\
                    • Fix the JSON by hand, or restore it with git\n\
                    • Adding a record starts a fresh file (the old one is kept as *.corrupt)",
                    path.display(),
                    reason
                )
            }
            NewsdeskError::Repository(RepositoryError::NoRemote(name)) => {
                format!(
                    "No remote named '{}' is configured\n\n\
                    Suggestions:\n\
                    • Add one: git remote add {} <url>\n\
                    • Point newsdesk at another remote: newsdesk config publish.remote <name>\n\
                    • Disable publishing: newsdesk config publish.enabled false",
                    name, name
                )
            }
            NewsdeskError::Repository(RepositoryError::NotARepository(path)) => {
                format!(
                    "Not a git repository: {}\n\n\
                    Suggestions:\n\
                    • Run 'git init' in the site directory\n\
                    • Disable publishing: newsdesk config publish.enabled false\n\
                    • Skip publishing once with --no-publish",
                    path.display()
                )
            }
            NewsdeskError::Repository(RepositoryError::PushRejected(msg)) => {
                format!(
                    "Push rejected by remote: {}\n\n\
                    The changes were saved and committed locally.\n\
                    Pull the remote changes, then run 'newsdesk publish' again.",
                    msg
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using NewsdeskError
pub type Result<T> = std::result::Result<T, NewsdeskError>;
