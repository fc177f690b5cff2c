//! In-progress merge marker
//!
//! Present only between a merge that produced conflicts and the
//! `merge --continue` that commits their resolution. The merged branch name is
//! kept in `.jot/merge`, the conflicted paths in `.jot/conflicts`.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::{read_json, write_atomic, write_json};
use anyhow::Context;
use derive_new::new;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct MergeState {
    pub branch: BranchName,
    pub conflicts: Vec<PathBuf>,
}

#[derive(Debug)]
pub struct MergeJournal {
    merge_path: Box<Path>,
    conflicts_path: Box<Path>,
}

impl MergeJournal {
    pub fn new(merge_path: Box<Path>, conflicts_path: Box<Path>) -> Self {
        MergeJournal {
            merge_path,
            conflicts_path,
        }
    }

    pub fn is_merging(&self) -> bool {
        self.merge_path.exists()
    }

    pub fn load(&self) -> anyhow::Result<Option<MergeState>> {
        if !self.is_merging() {
            return Ok(None);
        }

        let branch = std::fs::read_to_string(&self.merge_path).context(format!(
            "Unable to read merge marker {}",
            self.merge_path.display()
        ))?;
        let branch = BranchName::try_parse(branch.trim().to_string())?;
        let conflicts = read_json(&self.conflicts_path)?;

        Ok(Some(MergeState::new(branch, conflicts)))
    }

    pub fn save(&self, state: &MergeState) -> anyhow::Result<()> {
        write_json(&self.conflicts_path, &state.conflicts)?;
        write_atomic(&self.merge_path, state.branch.as_ref().as_bytes())
    }

    pub fn clear(&self) -> anyhow::Result<()> {
        for path in [&self.merge_path, &self.conflicts_path] {
            if path.exists() {
                std::fs::remove_file(path)
                    .context(format!("Unable to remove {}", path.display()))?;
            }
        }

        Ok(())
    }
}
