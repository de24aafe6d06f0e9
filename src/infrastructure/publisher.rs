//! Publishing the data file through git
//!
//! The store only sees the [`Publisher`] trait; [`GitPublisher`] is the
//! libgit2-backed implementation used by the CLI.

use crate::error::RepositoryError;
use git2::build::TreeUpdateBuilder;
use git2::{
    Cred, CredentialType, ErrorCode, FileMode, PushOptions, RemoteCallbacks, Repository, Signature,
};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

pub type PublishResult<T> = std::result::Result<T, RepositoryError>;

/// Result of the commit step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// A commit was created; holds the abbreviated id
    Committed(String),
    /// The file matched `HEAD`, nothing to commit
    Unchanged,
}

/// Version-control capability used to publish the data file
pub trait Publisher {
    /// Check that the data file lives in a repository
    fn ensure_repo(&self) -> PublishResult<()>;

    /// Stage `path` and commit it if it changed
    fn commit(&self, path: &Path, message: &str) -> PublishResult<CommitOutcome>;

    /// Push the branch to the configured remote
    fn push(&self) -> PublishResult<()>;

    /// ensure_repo, commit, push
    fn publish(&self, path: &Path, message: &str) -> PublishResult<CommitOutcome> {
        self.ensure_repo()?;
        let outcome = self.commit(path, message)?;
        self.push()?;
        Ok(outcome)
    }
}

/// Publisher backed by a local git repository
#[derive(Debug, Clone)]
pub struct GitPublisher {
    /// Directory the repository is discovered from
    start: PathBuf,
    remote: String,
    branch: Option<String>,
    author_name: String,
    author_email: String,
}

impl GitPublisher {
    pub fn new(start: PathBuf, remote: impl Into<String>) -> Self {
        GitPublisher {
            start,
            remote: remote.into(),
            branch: None,
            author_name: "newsdesk".to_string(),
            author_email: "newsdesk@localhost".to_string(),
        }
    }

    /// Push this branch instead of the checked-out one
    pub fn with_branch(mut self, branch: Option<String>) -> Self {
        self.branch = branch;
        self
    }

    /// Identity used when the repository has no `user.name`/`user.email`
    pub fn with_author(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.author_name = name.into();
        self.author_email = email.into();
        self
    }

    fn open(&self) -> PublishResult<Repository> {
        let repo = Repository::discover(&self.start).map_err(|e| match e.code() {
            ErrorCode::NotFound => RepositoryError::NotARepository(self.start.clone()),
            _ => RepositoryError::Git(e),
        })?;

        if repo.workdir().is_none() {
            return Err(RepositoryError::NotARepository(self.start.clone()));
        }
        Ok(repo)
    }

    fn signature(&self, repo: &Repository) -> PublishResult<Signature<'static>> {
        match repo.signature() {
            Ok(sig) => Ok(sig),
            Err(_) => Ok(Signature::now(&self.author_name, &self.author_email)?),
        }
    }

    fn current_branch(&self, repo: &Repository) -> PublishResult<String> {
        if let Some(branch) = &self.branch {
            return Ok(branch.clone());
        }

        let head = repo.head().map_err(|e| match e.code() {
            ErrorCode::UnbornBranch | ErrorCode::NotFound => {
                RepositoryError::PushFailed("the current branch has no commits yet".to_string())
            }
            _ => RepositoryError::Git(e),
        })?;

        if !head.is_branch() {
            return Err(RepositoryError::PushFailed(
                "HEAD is detached; check out a branch or set publish.branch".to_string(),
            ));
        }

        head.shorthand()
            .map(str::to_string)
            .ok_or_else(|| RepositoryError::PushFailed("branch name is not UTF-8".to_string()))
    }
}

/// `path` relative to the repository workdir
fn workdir_relative(repo: &Repository, path: &Path) -> PublishResult<PathBuf> {
    let workdir = repo
        .workdir()
        .ok_or_else(|| RepositoryError::NotARepository(path.to_path_buf()))?;
    let workdir = fs::canonicalize(workdir)
        .map_err(|_| RepositoryError::NotARepository(workdir.to_path_buf()))?;
    let absolute =
        fs::canonicalize(path).map_err(|_| RepositoryError::NotARepository(path.to_path_buf()))?;

    absolute
        .strip_prefix(&workdir)
        .map(Path::to_path_buf)
        .map_err(|_| RepositoryError::NotARepository(path.to_path_buf()))
}

impl Publisher for GitPublisher {
    fn ensure_repo(&self) -> PublishResult<()> {
        self.open().map(|_| ())
    }

    fn commit(&self, path: &Path, message: &str) -> PublishResult<CommitOutcome> {
        let repo = self.open()?;
        let rel = workdir_relative(&repo, path)?;
        let entry = rel.to_string_lossy().replace('\\', "/");

        // Keep the index in step so the data file shows clean afterwards
        let mut index = repo.index()?;
        index.add_path(&rel)?;
        index.write()?;

        let parent = match repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => None,
            Err(e) => return Err(e.into()),
        };
        let base = match &parent {
            Some(commit) => commit.tree()?,
            None => {
                let empty = repo.treebuilder(None)?.write()?;
                repo.find_tree(empty)?
            }
        };

        // The commit tree is HEAD's tree with only the data file replaced;
        // anything else staged in the index stays out of the commit.
        let blob = repo.blob_path(path)?;
        let mut update = TreeUpdateBuilder::new();
        update.upsert(entry.as_str(), blob, FileMode::Blob);
        let tree_id = update.create_updated(&repo, &base)?;

        if parent.is_some() && tree_id == base.id() {
            tracing::debug!(path = %rel.display(), "data file unchanged, skipping commit");
            return Ok(CommitOutcome::Unchanged);
        }

        let tree = repo.find_tree(tree_id)?;
        let sig = self.signature(&repo)?;
        let parent_refs: Vec<&git2::Commit> = parent.iter().collect();

        let oid = repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)?;
        let short: String = oid.to_string().chars().take(7).collect();

        tracing::info!(commit = %short, subject = message, "committed data file");
        Ok(CommitOutcome::Committed(short))
    }

    fn push(&self) -> PublishResult<()> {
        let repo = self.open()?;
        let branch = self.current_branch(&repo)?;

        let mut remote = repo.find_remote(&self.remote).map_err(|e| match e.code() {
            ErrorCode::NotFound | ErrorCode::InvalidSpec => {
                RepositoryError::NoRemote(self.remote.clone())
            }
            _ => RepositoryError::Git(e),
        })?;

        let config = repo.config()?;
        let rejected: RefCell<Option<String>> = RefCell::new(None);
        let mut attempts = 0u32;

        let mut callbacks = RemoteCallbacks::new();
        callbacks.credentials(move |url, username, allowed| {
            attempts += 1;
            if attempts > 3 {
                return Err(git2::Error::from_str("authentication failed"));
            }
            if allowed.contains(CredentialType::SSH_KEY) {
                if let Some(user) = username {
                    return Cred::ssh_key_from_agent(user);
                }
            }
            if allowed.contains(CredentialType::USER_PASS_PLAINTEXT) {
                if let Ok(cred) = Cred::credential_helper(&config, url, username) {
                    return Ok(cred);
                }
            }
            if allowed.contains(CredentialType::USERNAME) {
                return Cred::username(username.unwrap_or("git"));
            }
            Cred::default()
        });
        callbacks.push_update_reference(|refname, status| {
            if let Some(reason) = status {
                *rejected.borrow_mut() = Some(format!("{}: {}", refname, reason));
            }
            Ok(())
        });

        let mut options = PushOptions::new();
        options.remote_callbacks(callbacks);

        let refspec = format!("refs/heads/{0}:refs/heads/{0}", branch);
        tracing::debug!(remote = %self.remote, %refspec, "pushing");

        remote
            .push(&[refspec.as_str()], Some(&mut options))
            .map_err(|e| match e.code() {
                ErrorCode::NotFastForward => RepositoryError::PushRejected(e.message().to_string()),
                _ => RepositoryError::PushFailed(e.message().to_string()),
            })?;

        if let Some(reason) = rejected.borrow_mut().take() {
            return Err(RepositoryError::PushRejected(reason));
        }

        tracing::info!(remote = %self.remote, %branch, "pushed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn site_repo(temp: &TempDir) -> (Repository, PathBuf) {
        let site = temp.path().join("site");
        fs::create_dir_all(&site).unwrap();
        let repo = Repository::init(&site).unwrap();
        (repo, site)
    }

    fn publisher(site: &Path) -> GitPublisher {
        GitPublisher::new(site.to_path_buf(), "origin")
            .with_author("Test Operator", "operator@example.com")
    }

    fn head_message(repo: &Repository) -> String {
        repo.head()
            .unwrap()
            .peel_to_commit()
            .unwrap()
            .message()
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_ensure_repo_outside_repository() {
        let temp = TempDir::new().unwrap();
        let plain = temp.path().join("plain");
        fs::create_dir_all(&plain).unwrap();

        match publisher(&plain).ensure_repo() {
            Err(RepositoryError::NotARepository(path)) => assert_eq!(path, plain),
            other => panic!("Expected NotARepository, got {:?}", other),
        }
    }

    #[test]
    fn test_commit_new_file() {
        let temp = TempDir::new().unwrap();
        let (repo, site) = site_repo(&temp);
        let data = site.join("jornal.json");
        fs::write(&data, "{}").unwrap();

        let outcome = publisher(&site).commit(&data, "news: add \"A\"").unwrap();

        assert!(matches!(outcome, CommitOutcome::Committed(ref id) if id.len() == 7));
        assert_eq!(head_message(&repo), "news: add \"A\"");
    }

    #[test]
    fn test_commit_unchanged_file_is_skipped() {
        let temp = TempDir::new().unwrap();
        let (repo, site) = site_repo(&temp);
        let data = site.join("jornal.json");
        fs::write(&data, "{}").unwrap();
        let publisher = publisher(&site);

        publisher.commit(&data, "first").unwrap();
        let outcome = publisher.commit(&data, "second").unwrap();

        assert_eq!(outcome, CommitOutcome::Unchanged);
        assert_eq!(head_message(&repo), "first");
    }

    #[test]
    fn test_commit_modified_file_has_parent() {
        let temp = TempDir::new().unwrap();
        let (repo, site) = site_repo(&temp);
        let data = site.join("jornal.json");
        let publisher = publisher(&site);

        fs::write(&data, "{}").unwrap();
        publisher.commit(&data, "first").unwrap();
        fs::write(&data, "{\"destaques\": []}").unwrap();
        publisher.commit(&data, "second").unwrap();

        let head = repo.head().unwrap().peel_to_commit().unwrap();
        assert_eq!(head.message(), Some("second"));
        assert_eq!(head.parent_count(), 1);
    }

    #[test]
    fn test_commit_file_in_subdirectory() {
        let temp = TempDir::new().unwrap();
        let (repo, site) = site_repo(&temp);
        let data_dir = site.join("data");
        fs::create_dir_all(&data_dir).unwrap();
        let data = data_dir.join("jornal.json");
        fs::write(&data, "{}").unwrap();

        // Discovered from the data directory, not the repository root
        let outcome = publisher(&data_dir).commit(&data, "nested").unwrap();

        assert!(matches!(outcome, CommitOutcome::Committed(_)));
        let tree = repo.head().unwrap().peel_to_tree().unwrap();
        assert!(tree.get_path(Path::new("data/jornal.json")).is_ok());
    }

    #[test]
    fn test_commit_leaves_other_staged_files_out() {
        let temp = TempDir::new().unwrap();
        let (repo, site) = site_repo(&temp);
        let data = site.join("jornal.json");
        let publisher = publisher(&site);
        fs::write(&data, "{}").unwrap();
        publisher.commit(&data, "first").unwrap();

        fs::write(site.join("secret.txt"), "draft").unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("secret.txt")).unwrap();
        index.write().unwrap();
        fs::write(&data, "{\"destaques\": []}").unwrap();

        let outcome = publisher.commit(&data, "news: edit \"A\"").unwrap();

        assert!(matches!(outcome, CommitOutcome::Committed(_)));
        let tree = repo.head().unwrap().peel_to_tree().unwrap();
        assert!(tree.get_path(Path::new("secret.txt")).is_err());
        let blob = tree
            .get_path(Path::new("jornal.json"))
            .unwrap()
            .to_object(&repo)
            .unwrap()
            .peel_to_blob()
            .unwrap();
        assert_eq!(blob.content(), b"{\"destaques\": []}");

        // Still staged for the operator's own commit
        let status = repo.status_file(Path::new("secret.txt")).unwrap();
        assert!(status.contains(git2::Status::INDEX_NEW));
    }

    #[test]
    fn test_first_commit_leaves_other_staged_files_out() {
        let temp = TempDir::new().unwrap();
        let (repo, site) = site_repo(&temp);
        fs::write(site.join("secret.txt"), "draft").unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("secret.txt")).unwrap();
        index.write().unwrap();
        let data = site.join("jornal.json");
        fs::write(&data, "{}").unwrap();

        publisher(&site).commit(&data, "first").unwrap();

        let tree = repo.head().unwrap().peel_to_tree().unwrap();
        assert_eq!(tree.len(), 1);
        assert!(tree.get_path(Path::new("jornal.json")).is_ok());
    }

    #[test]
    fn test_push_without_remote() {
        let temp = TempDir::new().unwrap();
        let (_repo, site) = site_repo(&temp);
        let data = site.join("jornal.json");
        fs::write(&data, "{}").unwrap();
        let publisher = publisher(&site);
        publisher.commit(&data, "first").unwrap();

        match publisher.push() {
            Err(RepositoryError::NoRemote(name)) => assert_eq!(name, "origin"),
            other => panic!("Expected NoRemote, got {:?}", other),
        }
    }

    #[test]
    fn test_publish_pushes_to_bare_remote() {
        let temp = TempDir::new().unwrap();
        let remote_path = temp.path().join("remote.git");
        let bare = Repository::init_bare(&remote_path).unwrap();
        let (repo, site) = site_repo(&temp);
        repo.remote("origin", remote_path.to_str().unwrap()).unwrap();
        let data = site.join("jornal.json");
        fs::write(&data, "{\"destaques\": [], \"noticias\": []}").unwrap();

        let outcome = publisher(&site).publish(&data, "news: publish").unwrap();
        assert!(matches!(outcome, CommitOutcome::Committed(_)));

        let branch = repo.head().unwrap().shorthand().unwrap().to_string();
        let local = repo.head().unwrap().target().unwrap();
        let pushed = bare
            .find_reference(&format!("refs/heads/{}", branch))
            .unwrap()
            .target()
            .unwrap();
        assert_eq!(pushed, local);
    }
}
