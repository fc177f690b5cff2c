use crate::areas::repository::Repository;
use crate::artifacts::checkout::target::Target;
use crate::artifacts::log::log_entry::LogEntry;
use crate::artifacts::log::rev_list::RevList;
use crate::error::RepositoryError;
use std::io::Write;

impl Repository {
    /// List the first-parent history from HEAD, newest first.
    ///
    /// With `until`, the listing stops after that revision, which must belong
    /// to the history.
    pub async fn log(&mut self, until: Option<&str>) -> anyhow::Result<Vec<LogEntry>> {
        self.rehydrate()?;

        let stop = until
            .map(|revision| Target::resolve(self.refs(), self.database(), revision))
            .transpose()?;

        let mut entries = Vec::new();
        let mut reached = stop.is_none();
        for item in RevList::new(self.database(), self.refs().head_oid()) {
            let (oid, commit) = item?;
            let refs = self.refs().reverse_lookup(&oid);
            let is_stop = stop.as_ref().is_some_and(|target| target.oid() == &oid);

            entries.push(LogEntry::new(oid, commit, refs));
            if is_stop {
                reached = true;
                break;
            }
        }

        if let (false, Some(until)) = (reached, until) {
            anyhow::bail!(RepositoryError::RevisionNotFound(until.to_string()));
        }

        let mut writer = self.writer();
        for entry in &entries {
            writeln!(writer, "{entry}")?;
        }

        Ok(entries)
    }
}
