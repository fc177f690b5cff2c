use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::checkout::divergence::Divergence;
use crate::artifacts::checkout::movement::Movement;
use crate::artifacts::checkout::target::Target;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::status_info::StatusInfo;
use crate::error::RepositoryError;
use std::io::Write;
use std::path::PathBuf;

/// Files `checkout -- <paths>` restored, and the ones it refused
#[derive(Debug, Default)]
pub struct CheckoutFilesReport {
    pub restored: Vec<PathBuf>,
    pub rejected: Vec<(PathBuf, RepositoryError)>,
}

impl std::fmt::Display for CheckoutFilesReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (_, error) in &self.rejected {
            writeln!(f, "{error}")?;
        }

        write!(f, "Restored {} files", self.restored.len())
    }
}

impl Repository {
    /// Move the work tree to a branch or commit and point HEAD at it.
    ///
    /// Pending changes to tracked files are discarded first. Branches are
    /// never moved; checking out a bare commit detaches HEAD.
    pub async fn checkout(&mut self, revision: &str) -> anyhow::Result<Target> {
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
        self.move_to(&mut index, &status, &head_oid, target.oid())?;

        self.refs_mut().set_head(target.head());
        self.write_updates(&index)?;

        writeln!(self.writer(), "Checkout to revision {target}")?;
        Ok(target)
    }

    /// Throw away the pending changes of single files.
    pub async fn checkout_files(&mut self, paths: &[PathBuf]) -> anyhow::Result<CheckoutFilesReport> {
        self.rehydrate()?;
        self.ensure_not_merging()?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let status = self.inspect(&mut index)?;
        let mut report = CheckoutFilesReport::default();

        for path in paths {
            let path = self.workspace().relativize(path);
            let Some(state) = status.of(&path) else {
                report
                    .rejected
                    .push((path.clone(), RepositoryError::FileNotFound(path)));
                continue;
            };

            let (database, workspace, stage) = self.movement_parts();
            match Movement::new(database, workspace, &mut index, stage).discard(&path, state) {
                Ok(()) => report.restored.push(path),
                Err(error) => match error.downcast::<RepositoryError>() {
                    Ok(error) => report.rejected.push((path, error)),
                    Err(error) => return Err(error),
                },
            }
        }

        self.write_updates(&index)?;

        writeln!(self.writer(), "{report}")?;
        Ok(report)
    }

    /// Discard pending changes, then travel from `from` to `to`.
    pub(crate) fn move_to(
        &mut self,
        index: &mut Index,
        status: &StatusInfo,
        from: &ObjectId,
        to: &ObjectId,
    ) -> anyhow::Result<Divergence> {
        let divergence = Divergence::between(self.database(), Some(from), to)?;

        let (database, workspace, stage) = self.movement_parts();
        let mut movement = Movement::new(database, workspace, index, stage);
        movement.discard_changes(status)?;
        movement.travel(&divergence)?;

        tracing::info!(
            %from,
            %to,
            reverted = divergence.ours.len(),
            replayed = divergence.theirs.len(),
            "moved work tree"
        );
        Ok(divergence)
    }
}
