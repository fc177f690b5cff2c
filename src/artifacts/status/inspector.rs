use crate::areas::index::Index;
use crate::areas::stage::Stage;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::object::Object;
use crate::artifacts::status::file_status::FileStatus;
use crate::artifacts::status::status_info::StatusInfo;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Classifies work tree files against the index and the stage.
///
/// A staged file whose content drifted from what was staged is unstaged on
/// the spot: its stage entry and the pending index version are dropped.
#[derive(new)]
pub struct Inspector<'r> {
    workspace: &'r Workspace,
    index: &'r mut Index,
    stage: &'r mut Stage,
}

impl<'r> Inspector<'r> {
    pub fn inspect(&mut self) -> anyhow::Result<StatusInfo> {
        let mut states = BTreeMap::new();
        let mut untracked = BTreeSet::new();

        for path in self.workspace.list_files(None)? {
            let status = self.classify_file(&path)?;
            if status == FileStatus::Modified && !self.index.is_tracked(&path) {
                untracked.insert(path.clone());
            }
            states.insert(path, status);
        }

        // staged files removed from disk cannot be committed any more
        let vanished = self
            .stage
            .paths()
            .iter()
            .filter(|path| !self.workspace.exists(path))
            .cloned()
            .collect::<Vec<_>>();
        for path in vanished {
            self.drop_stale(&path);
        }

        for path in self.index.tracked_paths() {
            if !self.workspace.exists(&path) {
                states.insert(path, FileStatus::Deleted);
            }
        }

        Ok(StatusInfo::new(states, untracked))
    }

    pub fn classify_file(&mut self, path: &Path) -> anyhow::Result<FileStatus> {
        let oid = self.workspace.parse_blob(path)?.object_id()?;

        if self.stage.contains(path) {
            let latest = self.index.find_latest(path).map(|entry| &entry.oid);
            if latest == Some(&oid) {
                return Ok(FileStatus::Staged);
            }

            self.drop_stale(path);
        }

        match self.index.find_latest(path) {
            Some(entry) if entry.oid == oid => Ok(FileStatus::Unchanged),
            _ => Ok(FileStatus::Modified),
        }
    }

    fn drop_stale(&mut self, path: &Path) {
        tracing::warn!(path = %path.display(), "staged content changed, unstaging");

        self.stage.remove(path);
        self.index.remove_latest(path);
    }
}
