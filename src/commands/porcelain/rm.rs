use crate::areas::repository::Repository;
use crate::error::RepositoryError;
use std::io::Write;
use std::path::PathBuf;

/// Files `rm` stopped tracking, and the arguments it knew nothing about
#[derive(Debug, Default)]
pub struct RmReport {
    pub removed: Vec<PathBuf>,
    pub rejected: Vec<(PathBuf, RepositoryError)>,
}

impl std::fmt::Display for RmReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (_, error) in &self.rejected {
            writeln!(f, "{error}")?;
        }

        write!(f, "Removed {} files", self.removed.len())
    }
}

impl Repository {
    /// Stop tracking files.
    ///
    /// Every recorded version leaves the index and the stage, so a file deleted
    /// from the work tree no longer shows up as deleted. Copies still on disk
    /// are kept and become untracked. A directory removes every tracked file
    /// below it.
    pub async fn rm(&mut self, paths: &[PathBuf]) -> anyhow::Result<RmReport> {
        self.rehydrate()?;
        self.ensure_not_merging()?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let tracked = index.tracked_paths();
        let mut report = RmReport::default();

        for path in paths {
            let path = self.workspace().relativize(path);
            let matching = tracked
                .iter()
                .filter(|file| file.starts_with(&path))
                .collect::<Vec<_>>();

            if matching.is_empty() {
                report
                    .rejected
                    .push((path.clone(), RepositoryError::FileNotFound(path)));
                continue;
            }

            for file in matching {
                // overlapping arguments
                if index.remove_all(file) == 0 {
                    continue;
                }

                self.stage_mut().remove(file);
                report.removed.push(file.clone());
            }
        }

        self.inspect(&mut index)?;
        self.write_updates(&index)?;
        tracing::info!(removed = report.removed.len(), rejected = report.rejected.len(), "rm finished");

        writeln!(self.writer(), "{report}")?;
        Ok(report)
    }
}
