use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::artifacts::status::file_status::FileStatus;
use crate::error::RepositoryError;
use std::collections::HashSet;
use std::io::Write;
use std::path::PathBuf;

impl Repository {
    /// Commit the staged files, or only the listed ones when `paths` is not
    /// empty. Listed files that are modified but not staged are recorded first.
    pub async fn commit(&mut self, message: &str, paths: &[PathBuf]) -> anyhow::Result<ObjectId> {
        self.rehydrate()?;
        self.ensure_not_merging()?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let status = self.inspect(&mut index)?;

        let files = if paths.is_empty() {
            self.stage().paths().to_vec()
        } else {
            let mut files = Vec::new();
            let mut seen = HashSet::new();
            for path in paths {
                let path = self.workspace().relativize(path);
                if !seen.insert(path.clone()) {
                    continue;
                }

                match status.of(&path) {
                    Some(FileStatus::Staged) => files.push(path),
                    Some(FileStatus::Modified) => {
                        self.record_file(&mut index, &path)?;
                        files.push(path);
                    }
                    _ => tracing::warn!(path = %path.display(), "nothing to commit for path"),
                }
            }
            files
        };

        if files.is_empty() {
            self.write_updates(&index)?;
            anyhow::bail!(RepositoryError::NothingToCommit);
        }

        let parents = self.refs().head_oid().into_iter().collect::<Vec<_>>();
        let commit_oid = self.commit_files(&mut index, message, &files, parents, true)?;

        self.refs_mut().advance_head(commit_oid.clone());
        self.write_updates(&index)?;

        writeln!(self.writer(), "Committed successfully: {commit_oid}")?;
        Ok(commit_oid)
    }

    /// Snapshot `files` into a new commit and move their entries to the tail
    /// of the index, so the index ends with exactly this commit's files.
    ///
    /// Blobs are read from the work tree. With `persist_blobs` unset they are
    /// expected to be in the object store already.
    pub(crate) fn commit_files(
        &mut self,
        index: &mut Index,
        message: &str,
        files: &[PathBuf],
        parents: Vec<ObjectId>,
        persist_blobs: bool,
    ) -> anyhow::Result<ObjectId> {
        let mut seen = HashSet::new();
        let files = files
            .iter()
            .filter(|path| seen.insert(path.to_path_buf()))
            .map(|path| Ok((path.clone(), self.workspace().parse_blob(path)?)))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let entries = files
            .iter()
            .map(|(path, blob)| Ok(IndexEntry::new(path.clone(), blob.object_id()?)))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let tree = Tree::build(files)?;
        let commit = Commit::new(
            tree.oid().clone(),
            parents,
            Commit::timestamp_from_env(),
            message.trim().to_string(),
        );
        let commit_oid = commit.object_id()?;

        tree.write(self.database(), &commit_oid, persist_blobs)?;
        self.database().store(commit)?;

        for entry in entries {
            if self.stage_mut().remove(&entry.path) {
                index.remove_latest(&entry.path);
            }
            index.append(entry.path, entry.oid);
        }

        tracing::info!(oid = %commit_oid, files = tree.files().len(), "created commit");
        Ok(commit_oid)
    }
}
