//! Infrastructure layer - External I/O and persistence

pub mod assets;
pub mod config;
pub mod publisher;
pub mod storage;
pub mod workspace;

pub use assets::AssetLibrary;
pub use config::{Config, PublishConfig};
pub use publisher::{CommitOutcome, GitPublisher, Publisher};
pub use storage::{DocumentStorage, JsonFileStorage, LoadSource, LoadedDocument};
pub use workspace::Workspace;
