//! Domain layer - News records and the persisted document

pub mod commit_message;
pub mod document;
pub mod record;

pub use commit_message::CommitMessage;
pub use document::NewsDocument;
pub use record::{generate_record_id, NewsRecord, RecordFields};
