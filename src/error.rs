use std::path::PathBuf;
use thiserror::Error;

/// Failures a command can report to its caller.
///
/// They travel inside `anyhow::Error`; callers that need to branch on them
/// use `downcast_ref::<RepositoryError>()`.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Repository already initialized at {0}")]
    RepositoryAlreadyInitialized(PathBuf),

    #[error("Not a jot repository: {0}")]
    NotARepository(PathBuf),

    #[error("Revision not found: {0}")]
    RevisionNotFound(String),

    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    #[error("Nothing to commit")]
    NothingToCommit,

    #[error("File already staged: {0}")]
    FileAlreadyStaged(PathBuf),

    #[error("File not changed: {0}")]
    FileNotChanged(PathBuf),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("No saved version of file: {0}")]
    NoSavedVersion(PathBuf),

    #[error("Repository is in merging state, resolve conflicts and run `merge --continue`")]
    RepositoryInMergingState,

    #[error("Repository is not in merging state")]
    RepositoryNotInMergingState,

    #[error("Branch {0} already exists")]
    BranchAlreadyExists(String),

    #[error("Cannot remove the current branch {0}")]
    CannotRemoveCurrentBranch(String),

    #[error("Invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("No commits yet")]
    NoCommits,

    #[error("HEAD is detached, check out a branch first")]
    DetachedHead,

    #[error("There are uncommitted changes, commit or discard them first")]
    UncommittedChanges,
}

impl RepositoryError {
    /// Whether the failure is an informational outcome rather than a real error.
    pub fn is_benign(&self) -> bool {
        matches!(self, RepositoryError::NothingToCommit)
    }
}
