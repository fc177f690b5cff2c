use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::StatusInfo;
use std::io::Write;

impl Repository {
    /// Classify the work tree and print it, grouped by status.
    ///
    /// Allowed while a merge is in progress; the pending merge and its
    /// conflicted paths are listed before the files.
    pub async fn status(&mut self) -> anyhow::Result<StatusInfo> {
        self.rehydrate()?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let status = self.inspect(&mut index)?;
        self.write_updates(&index)?;

        writeln!(self.writer(), "{}", self.refs().head())?;

        if let Some(merge) = self.merge_journal().load()? {
            writeln!(self.writer(), "Merging branch {}", merge.branch)?;
            for path in &merge.conflicts {
                writeln!(self.writer(), "    conflict: {}", path.display())?;
            }
        }

        writeln!(self.writer(), "{}", status.describe())?;
        Ok(status)
    }
}
