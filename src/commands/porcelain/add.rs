use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_status::FileStatus;
use crate::error::RepositoryError;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Files `add` recorded, and the ones it refused with the reason
#[derive(Debug, Default)]
pub struct AddReport {
    pub added: Vec<PathBuf>,
    pub rejected: Vec<(PathBuf, RepositoryError)>,
}

impl std::fmt::Display for AddReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (_, error) in &self.rejected {
            writeln!(f, "{error}")?;
        }

        write!(f, "Added {} files", self.added.len())
    }
}

impl Repository {
    /// Record the current content of modified files and stage them.
    ///
    /// Explicitly named files that are already staged, unchanged or missing
    /// are reported without stopping the others. Directories add the modified
    /// files below them and skip the rest silently.
    pub async fn add(&mut self, paths: &[PathBuf]) -> anyhow::Result<AddReport> {
        self.rehydrate()?;
        self.ensure_not_merging()?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let status = self.inspect(&mut index)?;
        let mut report = AddReport::default();

        for path in paths {
            let path = self.workspace().relativize(path);
            let full_path = self.path().join(&path);

            if full_path.is_dir() {
                for file in self.workspace().list_files(Some(&path))? {
                    if status.of(&file) == Some(FileStatus::Modified) {
                        self.record_file(&mut index, &file)?;
                        report.added.push(file);
                    }
                }
                continue;
            }

            match status.of(&path) {
                Some(FileStatus::Modified) => {
                    self.record_file(&mut index, &path)?;
                    report.added.push(path);
                }
                Some(FileStatus::Staged) => report
                    .rejected
                    .push((path.clone(), RepositoryError::FileAlreadyStaged(path))),
                Some(FileStatus::Unchanged) => report
                    .rejected
                    .push((path.clone(), RepositoryError::FileNotChanged(path))),
                Some(FileStatus::Deleted) | None => report
                    .rejected
                    .push((path.clone(), RepositoryError::FileNotFound(path))),
            }
        }

        self.write_updates(&index)?;
        tracing::info!(added = report.added.len(), rejected = report.rejected.len(), "add finished");

        writeln!(self.writer(), "{report}")?;
        Ok(report)
    }

    /// Store the file's content, append it to the index and stage it.
    pub(crate) fn record_file(&mut self, index: &mut Index, path: &Path) -> anyhow::Result<ObjectId> {
        let blob = self.workspace().parse_blob(path)?;
        let oid = self.database().store(blob)?;

        index.append(path.to_path_buf(), oid.clone());
        self.stage_mut().insert(path.to_path_buf());

        tracing::debug!(path = %path.display(), %oid, "recorded file");
        Ok(oid)
    }
}
