use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::log::rev_list::{RevList, reachable};
use crate::error::RepositoryError;
use std::io::Write;

impl Repository {
    /// Create a branch at the commit HEAD resolves to.
    pub fn branch_create(&mut self, name: &str) -> anyhow::Result<BranchName> {
        self.rehydrate()?;
        self.ensure_not_merging()?;

        let branch = BranchName::try_parse(name.to_string())?;
        if self.refs().branch(&branch).is_some() {
            anyhow::bail!(RepositoryError::BranchAlreadyExists(branch.to_string()));
        }

        let head_oid = self
            .refs()
            .head_oid()
            .ok_or(RepositoryError::NoCommits)?;
        self.refs_mut().update(&branch, head_oid);
        self.refs().write_updates()?;

        writeln!(self.writer(), "Branch {branch} created successfully")?;
        Ok(branch)
    }

    /// Remove a branch and the part of its history no other ref reaches.
    ///
    /// Commits are deleted newest first, stopping at the first one still
    /// reachable from the remaining refs.
    pub fn branch_remove(&mut self, name: &str) -> anyhow::Result<()> {
        self.rehydrate()?;
        self.ensure_not_merging()?;

        let branch = BranchName::try_parse(name.to_string())?;
        if self.refs().is_current_branch(&branch) {
            anyhow::bail!(RepositoryError::CannotRemoveCurrentBranch(
                branch.to_string()
            ));
        }

        let tip = self
            .refs_mut()
            .remove(&branch)
            .ok_or_else(|| RepositoryError::RevisionNotFound(branch.to_string()))?;

        let kept = reachable(self.database(), &self.refs().tips())?;
        let doomed = RevList::new(self.database(), Some(tip))
            .oids()?
            .into_iter()
            .take_while(|oid| !kept.contains(oid))
            .collect::<Vec<_>>();

        for oid in &doomed {
            self.database().delete_commit(oid)?;
        }
        self.refs().write_updates()?;

        tracing::info!(%branch, deleted = doomed.len(), "removed branch");
        writeln!(self.writer(), "Branch {branch} removed successfully")?;
        Ok(())
    }

    /// Print every branch, the current one marked with `*`.
    pub fn branch_list(&mut self) -> anyhow::Result<Vec<BranchName>> {
        self.rehydrate()?;

        let branches = self
            .refs()
            .branches()
            .map(|(branch, _)| branch.clone())
            .collect::<Vec<_>>();

        let mut writer = self.writer();
        for branch in &branches {
            let marker = if self.refs().is_current_branch(branch) {
                "*"
            } else {
                " "
            };
            writeln!(writer, "{marker} {branch}")?;
        }

        Ok(branches)
    }
}
