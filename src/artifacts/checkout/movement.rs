//! Moving the work tree between commits
//!
//! A move always starts from a clean tree: pending changes are discarded
//! first. Commits only on the current side are then reverted newest first,
//! and commits only on the target side replayed oldest first.
//!
//! Reverting a commit restores, for every file it touched, the version the
//! index recorded before it, or deletes the file when there is none. The
//! index is then truncated by the number of those files. Files removed with
//! `rm` since are left alone.

use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::stage::Stage;
use crate::areas::workspace::Workspace;
use crate::artifacts::checkout::divergence::Divergence;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_status::FileStatus;
use crate::artifacts::status::status_info::StatusInfo;
use crate::error::RepositoryError;
use derive_new::new;
use std::path::Path;

#[derive(new)]
pub struct Movement<'r> {
    database: &'r Database,
    workspace: &'r Workspace,
    index: &'r mut Index,
    stage: &'r mut Stage,
}

impl<'r> Movement<'r> {
    /// Throw away every pending change to a tracked file.
    ///
    /// Staged files that were never committed are unstaged and left on disk;
    /// untracked files are left alone.
    pub fn discard_changes(&mut self, status: &StatusInfo) -> anyhow::Result<()> {
        for (path, state) in status.states() {
            match state {
                FileStatus::Unchanged => {}
                FileStatus::Staged if self.index.find_previous(path).is_none() => {
                    self.unstage(path);
                }
                FileStatus::Modified if status.is_untracked(path) => {}
                _ => self.discard(path, *state)?,
            }
        }

        Ok(())
    }

    /// Bring one file back to its last recorded version.
    ///
    /// A staged file goes back to the version before the staged one and leaves
    /// the stage; a modified or deleted file gets its latest version back.
    pub fn discard(&mut self, path: &Path, state: FileStatus) -> anyhow::Result<()> {
        match state {
            FileStatus::Unchanged => {
                anyhow::bail!(RepositoryError::FileNotChanged(path.to_path_buf()))
            }
            FileStatus::Staged => {
                let previous = self
                    .index
                    .find_previous(path)
                    .map(|entry| entry.oid.clone())
                    .ok_or_else(|| RepositoryError::NoSavedVersion(path.to_path_buf()))?;

                self.restore(path, &previous)?;
                self.unstage(path);
            }
            FileStatus::Modified | FileStatus::Deleted => {
                let latest = self
                    .index
                    .find_latest(path)
                    .map(|entry| entry.oid.clone())
                    .ok_or_else(|| RepositoryError::NoSavedVersion(path.to_path_buf()))?;

                self.restore(path, &latest)?;
            }
        }

        tracing::debug!(path = %path.display(), ?state, "discarded changes");
        Ok(())
    }

    fn unstage(&mut self, path: &Path) {
        self.index.remove_latest(path);
        self.stage.remove(path);
    }

    fn restore(&self, path: &Path, oid: &ObjectId) -> anyhow::Result<()> {
        let blob = self.database.parse_object_as_blob(oid)?;
        self.workspace.write_file(path, blob.content())
    }

    /// Undo the newest commit of the current history.
    pub fn revert(&mut self, commit_oid: &ObjectId) -> anyhow::Result<()> {
        let files = self.database.load_tree(commit_oid)?.files();

        let tracked = files
            .iter()
            .map(|(path, _)| path)
            .filter(|path| self.index.is_tracked(path))
            .collect::<Vec<_>>();

        for path in &tracked {
            match self.index.find_previous(path).map(|entry| entry.oid.clone()) {
                Some(previous) => self.restore(path, &previous)?,
                None => self.workspace.remove_file(path)?,
            }
        }
        self.index.truncate(tracked.len());

        tracing::debug!(oid = %commit_oid, files = files.len(), "reverted commit");
        Ok(())
    }

    /// Re-apply a commit on top of the current history.
    pub fn replay(&mut self, commit_oid: &ObjectId) -> anyhow::Result<()> {
        let files = self.database.load_tree(commit_oid)?.files();

        for (path, oid) in &files {
            self.restore(path, oid)?;
            self.index.append(path.clone(), oid.clone());
        }

        tracing::debug!(oid = %commit_oid, files = files.len(), "replayed commit");
        Ok(())
    }

    /// Revert down to the common ancestor, then replay up to the target.
    pub fn travel(&mut self, divergence: &Divergence) -> anyhow::Result<()> {
        for commit_oid in &divergence.ours {
            self.revert(commit_oid)?;
        }

        for commit_oid in divergence.theirs.iter().rev() {
            self.replay(commit_oid)?;
        }

        Ok(())
    }
}
