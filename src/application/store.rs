//! News record store
//!
//! Owns the in-memory [`NewsDocument`], keeps it mirrored to storage and
//! hands every successful write to the publisher. Each mutation writes the
//! whole document; a failed write leaves the in-memory state as the source
//! of truth.

use crate::domain::{generate_record_id, CommitMessage, NewsDocument, NewsRecord, RecordFields};
use crate::error::{NewsdeskError, Result};
use crate::infrastructure::{
    CommitOutcome, Config, DocumentStorage, GitPublisher, JsonFileStorage, LoadSource,
    LoadedDocument, Publisher, Workspace,
};

/// What happened after the document was written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Publishing is disabled for this store
    Skipped,
    Published(CommitOutcome),
}

/// Result of a create/update/remove
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    /// Id of the record that was saved or removed
    pub id: String,
    pub publish: PublishOutcome,
}

pub struct NewsStore<S: DocumentStorage = JsonFileStorage> {
    storage: S,
    publisher: Option<Box<dyn Publisher>>,
    before_publish: Option<Box<dyn Fn()>>,
    document: NewsDocument,
    source: LoadSource,
    backed_up: bool,
}

impl NewsStore<JsonFileStorage> {
    /// Open the workspace's data file, publishing through git when `publish` is set
    pub fn open(workspace: &Workspace, config: &Config, publish: bool) -> Result<Self> {
        let data_path = workspace.data_path(config);

        let publisher: Option<Box<dyn Publisher>> = if publish {
            let start = data_path
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| workspace.root.clone());
            let git = GitPublisher::new(start, config.publish.remote.clone())
                .with_branch(config.publish.branch.clone())
                .with_author(
                    config.publish.author_name.clone(),
                    config.publish.author_email.clone(),
                );
            Some(Box::new(git))
        } else {
            None
        };

        Self::load(JsonFileStorage::new(data_path), publisher)
    }
}

impl<S: DocumentStorage> NewsStore<S> {
    /// Load the document from storage.
    ///
    /// A missing or malformed data file yields an empty document; the
    /// difference is kept in [`NewsStore::load_source`].
    pub fn load(storage: S, publisher: Option<Box<dyn Publisher>>) -> Result<Self> {
        let LoadedDocument {
            mut document,
            source,
        } = storage.load()?;

        let duplicates = document.prune_duplicate_records();
        if !duplicates.is_empty() {
            tracing::warn!(ids = ?duplicates, "dropped records repeating an earlier id");
        }
        let assigned = document.assign_missing_ids();
        if !assigned.is_empty() {
            tracing::warn!(ids = ?assigned, "gave new ids to records stored without one");
        }
        let dropped = document.prune_featured();
        if !dropped.is_empty() {
            tracing::warn!(ids = ?dropped, "dropped featured ids with no matching record");
        }

        Ok(NewsStore {
            storage,
            publisher,
            before_publish: None,
            document,
            source,
            backed_up: false,
        })
    }

    /// Run `notice` each time a written document is about to be published
    pub fn on_publish(mut self, notice: impl Fn() + 'static) -> Self {
        self.before_publish = Some(Box::new(notice));
        self
    }

    pub fn load_source(&self) -> &LoadSource {
        &self.source
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn document(&self) -> &NewsDocument {
        &self.document
    }

    pub fn records(&self) -> &[NewsRecord] {
        self.document.records()
    }

    pub fn get(&self, id: &str) -> Option<&NewsRecord> {
        self.document.get(id)
    }

    pub fn is_featured(&self, id: &str) -> bool {
        self.document.is_featured(id)
    }

    pub fn featured_records(&self) -> Vec<&NewsRecord> {
        self.document.featured_records()
    }

    fn unused_id(&self) -> String {
        loop {
            let id = generate_record_id();
            if !self.document.contains(&id) {
                return id;
            }
        }
    }

    /// Add a new record at the front and persist
    pub fn create_record(&mut self, fields: RecordFields, featured: bool) -> Result<SaveOutcome> {
        fields.validate()?;

        let id = self.unused_id();
        let message = CommitMessage::add(&fields.title);

        self.document
            .insert_front(NewsRecord::from_fields(id.clone(), fields));
        if featured {
            self.document.mark_featured(&id);
        }
        tracing::info!(%id, featured, "created news record");

        let publish = self.persist(&message)?;
        Ok(SaveOutcome { id, publish })
    }

    /// Replace `original_id` with `record` (whose id may differ), re-sort and persist
    pub fn update_record(
        &mut self,
        original_id: &str,
        record: NewsRecord,
        featured: bool,
    ) -> Result<SaveOutcome> {
        record.validate()?;

        if !self.document.contains(original_id) {
            return Err(NewsdeskError::NotFound(original_id.to_string()));
        }
        if record.id != original_id && self.document.contains(&record.id) {
            return Err(NewsdeskError::Validation(format!(
                "id '{}' is already used by another record",
                record.id
            )));
        }

        let id = record.id.clone();
        let message = CommitMessage::edit(&record.title);

        self.document.replace(original_id, record);
        self.document.unmark_featured(original_id);
        if featured {
            self.document.mark_featured(&id);
        }
        self.document.sort_by_date_desc();
        tracing::info!(%original_id, %id, featured, "updated news record");

        let publish = self.persist(&message)?;
        Ok(SaveOutcome { id, publish })
    }

    /// Remove a record (and its featured entry) and persist
    pub fn remove_record(&mut self, id: &str) -> Result<SaveOutcome> {
        let removed = self
            .document
            .remove(id)
            .ok_or_else(|| NewsdeskError::NotFound(id.to_string()))?;
        tracing::info!(%id, "removed news record");

        let publish = self.persist(&CommitMessage::remove(&removed.title))?;
        Ok(SaveOutcome {
            id: removed.id,
            publish,
        })
    }

    /// Write the whole document, then publish it when a publisher is set
    pub fn persist(&mut self, message: &CommitMessage) -> Result<PublishOutcome> {
        if matches!(self.source, LoadSource::Corrupt(_)) && !self.backed_up {
            if let Some(backup) = self.storage.backup()? {
                tracing::warn!(
                    backup = %backup.display(),
                    "kept a copy of the unreadable data file before overwriting it"
                );
            }
            self.backed_up = true;
        }

        self.storage.save(&self.document)?;

        let Some(publisher) = &self.publisher else {
            return Ok(PublishOutcome::Skipped);
        };
        if let Some(notice) = &self.before_publish {
            notice();
        }

        let outcome = publisher.publish(self.storage.path(), &message.to_string())?;
        Ok(PublishOutcome::Published(outcome))
    }

    /// Write and publish without changing any record
    pub fn republish(&mut self, message: &CommitMessage) -> Result<PublishOutcome> {
        if let LoadSource::Corrupt(reason) = &self.source {
            return Err(NewsdeskError::CorruptDocument {
                path: self.storage.path().to_path_buf(),
                reason: reason.clone(),
            });
        }
        self.persist(message)
    }
}
