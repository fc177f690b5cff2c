use crate::areas::index::Index;
use crate::areas::merge_state::MergeState;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::divergence::Divergence;
use crate::artifacts::merge::conflict::conflict_block;
use crate::artifacts::merge::merge_plan::MergePlan;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_status::FileStatus;
use crate::error::RepositoryError;
use std::io::Write;
use std::path::PathBuf;

/// How a merge ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    AlreadyUpToDate,
    /// The current branch now points at the merged tip; no commit was made
    FastForward(ObjectId),
    /// A merge commit was created
    Merged(ObjectId),
    /// Conflict markers were written and the merge waits for `--continue`
    Conflicts {
        conflicts: Vec<PathBuf>,
        staged: Vec<PathBuf>,
    },
}

impl std::fmt::Display for MergeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergeOutcome::AlreadyUpToDate => write!(f, "Already up to date"),
            MergeOutcome::FastForward(_) => write!(f, "Fast forward merge done"),
            MergeOutcome::Merged(_) => write!(f, "Merge done"),
            MergeOutcome::Conflicts { conflicts, staged } => {
                write!(f, "There are conflicts in the following files:")?;
                for path in conflicts {
                    write!(f, "\n  {}", path.display())?;
                }

                if !staged.is_empty() {
                    write!(
                        f,
                        "\nFollowing files have no conflicts, they added to staging index:"
                    )?;
                    for path in staged {
                        write!(f, "\n  {}", path.display())?;
                    }
                }

                Ok(())
            }
        }
    }
}

impl Repository {
    /// Merge `branch` into the current branch.
    ///
    /// When neither side contains the other, each side's changes since the
    /// common ancestor are compared path by path. Paths only the merged branch
    /// changed are written and staged; paths both sides changed differently
    /// get a conflict block and the merge stops until `merge_continue`.
    pub async fn merge(&mut self, branch: &str) -> anyhow::Result<MergeOutcome> {
        self.rehydrate()?;
        self.ensure_not_merging()?;

        let current = self
            .refs()
            .current_branch()
            .cloned()
            .ok_or(RepositoryError::DetachedHead)?;
        let merged = BranchName::try_parse(branch.to_string())?;
        let tip = self
            .refs()
            .branch(&merged)
            .cloned()
            .ok_or_else(|| RepositoryError::RevisionNotFound(branch.to_string()))?;
        let head_oid = self
            .refs()
            .head_oid()
            .ok_or(RepositoryError::NoCommits)?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let status = self.inspect(&mut index)?;
        if status.has_uncommitted_changes() {
            anyhow::bail!(RepositoryError::UncommittedChanges);
        }

        let divergence = Divergence::between(self.database(), Some(&head_oid), &tip)?;

        let outcome = if divergence.is_up_to_date() {
            MergeOutcome::AlreadyUpToDate
        } else if divergence.is_fast_forward() {
            self.move_to(&mut index, &status, &head_oid, &tip)?;
            self.refs_mut().update(&current, tip.clone());
            MergeOutcome::FastForward(tip)
        } else {
            let plan = MergePlan::compute(self.database(), &divergence)?;
            self.apply_plan(&mut index, &plan, &merged)?;

            let conflicts = plan
                .conflicts
                .iter()
                .map(|conflict| conflict.path.clone())
                .collect::<Vec<_>>();

            if conflicts.is_empty() {
                let oid =
                    self.finalize_merge(&mut index, &current, &merged, &[], head_oid, tip)?;
                MergeOutcome::Merged(oid)
            } else {
                self.merge_journal()
                    .save(&MergeState::new(merged.clone(), conflicts.clone()))?;
                tracing::info!(%merged, conflicts = conflicts.len(), "merge stopped on conflicts");

                MergeOutcome::Conflicts {
                    conflicts,
                    staged: plan.incoming.into_iter().map(|(path, _)| path).collect(),
                }
            }
        };

        self.write_updates(&index)?;

        writeln!(self.writer(), "{outcome}")?;
        Ok(outcome)
    }

    /// Commit the resolution of a merge that stopped on conflicts.
    pub async fn merge_continue(&mut self) -> anyhow::Result<MergeOutcome> {
        self.rehydrate()?;

        let state = self
            .merge_journal()
            .load()?
            .ok_or(RepositoryError::RepositoryNotInMergingState)?;
        let current = self
            .refs()
            .current_branch()
            .cloned()
            .ok_or(RepositoryError::DetachedHead)?;
        let head_oid = self
            .refs()
            .head_oid()
            .ok_or(RepositoryError::NoCommits)?;
        let tip = self
            .refs()
            .branch(&state.branch)
            .cloned()
            .ok_or_else(|| RepositoryError::RevisionNotFound(state.branch.to_string()))?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let oid = self.finalize_merge(
            &mut index,
            &current,
            &state.branch,
            &state.conflicts,
            head_oid,
            tip,
        )?;
        self.write_updates(&index)?;

        let outcome = MergeOutcome::Merged(oid);
        writeln!(self.writer(), "{outcome}")?;
        Ok(outcome)
    }

    fn apply_plan(
        &mut self,
        index: &mut Index,
        plan: &MergePlan,
        merged: &BranchName,
    ) -> anyhow::Result<()> {
        for conflict in &plan.conflicts {
            let ours = self.database().parse_object_as_blob(&conflict.ours)?;
            let theirs = self.database().parse_object_as_blob(&conflict.theirs)?;
            let block = conflict_block(&ours.text(), &theirs.text(), merged);

            self.workspace().write_file(&conflict.path, block.as_bytes())?;
            tracing::debug!(path = %conflict.path.display(), "wrote conflict block");
        }

        for (path, oid) in &plan.incoming {
            let blob = self.database().parse_object_as_blob(oid)?;
            self.workspace().write_file(path, blob.content())?;

            index.append(path.clone(), oid.clone());
            self.stage_mut().insert(path.clone());
            tracing::debug!(path = %path.display(), "applied incoming change");
        }

        Ok(())
    }

    /// Stage the resolved paths, commit with both tips as parents and point
    /// both branches at the merge commit.
    fn finalize_merge(
        &mut self,
        index: &mut Index,
        current: &BranchName,
        merged: &BranchName,
        conflicts: &[PathBuf],
        head_oid: ObjectId,
        tip: ObjectId,
    ) -> anyhow::Result<ObjectId> {
        // taken before inspecting, which unstages files edited since the merge
        let pending = self
            .stage()
            .paths()
            .iter()
            .chain(conflicts)
            .cloned()
            .collect::<Vec<_>>();
        let status = self.inspect(index)?;

        for path in &pending {
            if status.of(path) == Some(FileStatus::Modified) {
                self.record_file(index, path)?;
            }
        }

        let files = self.stage().paths().to_vec();
        let message = format!("Merge branch {merged}");
        let oid = self.commit_files(index, &message, &files, vec![head_oid, tip], false)?;

        self.refs_mut().update(current, oid.clone());
        self.refs_mut().update(merged, oid.clone());
        self.merge_journal().clear()?;
        self.stage_mut().clear();

        tracing::info!(%current, %merged, %oid, "merge committed");
        Ok(oid)
    }
}
