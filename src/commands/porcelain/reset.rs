use crate::areas::repository::Repository;
use crate::artifacts::checkout::target::Target;
use crate::artifacts::log::rev_list::reachable;
use crate::error::RepositoryError;
use std::io::Write;

impl Repository {
    /// Move the current branch (or a detached HEAD) and the work tree to
    /// `revision`.
    ///
    /// Commits left behind that no ref can reach any more are deleted together
    /// with their tree manifests.
    pub async fn reset(&mut self, revision: &str) -> anyhow::Result<Target> {
        self.rehydrate()?;
        self.ensure_not_merging()?;

        let head_oid = self
            .refs()
            .head_oid()
            .ok_or(RepositoryError::NoCommits)?;
        let target = Target::resolve(self.refs(), self.database(), revision)?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let status = self.inspect(&mut index)?;
        let divergence = self.move_to(&mut index, &status, &head_oid, target.oid())?;

        self.refs_mut().advance_head(target.oid().clone());

        let reachable = reachable(self.database(), &self.refs().tips())?;
        for oid in divergence.ours.iter().filter(|oid| !reachable.contains(*oid)) {
            self.database().delete_commit(oid)?;
        }

        self.write_updates(&index)?;

        writeln!(self.writer(), "Reset to revision {target}")?;
        Ok(target)
    }
}
