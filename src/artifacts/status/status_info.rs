use crate::artifacts::status::file_status::FileStatus;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Outcome of one classification pass over the work tree
#[derive(Debug, Clone, Default, PartialEq, Eq, new)]
pub struct StatusInfo {
    states: BTreeMap<PathBuf, FileStatus>,
    /// Modified files without any recorded version
    untracked: BTreeSet<PathBuf>,
}

impl StatusInfo {
    pub fn states(&self) -> &BTreeMap<PathBuf, FileStatus> {
        &self.states
    }

    pub fn of(&self, path: &Path) -> Option<FileStatus> {
        self.states.get(path).copied()
    }

    pub fn is_untracked(&self, path: &Path) -> bool {
        self.untracked.contains(path)
    }

    pub fn paths_with(&self, status: FileStatus) -> impl Iterator<Item = &PathBuf> {
        self.states
            .iter()
            .filter(move |(_, state)| **state == status)
            .map(|(path, _)| path)
    }

    /// Whether any tracked file is staged, modified or deleted
    pub fn has_uncommitted_changes(&self) -> bool {
        self.states
            .iter()
            .any(|(path, state)| state.is_pending() && !self.untracked.contains(path))
    }

    /// Render the pending files in sections, or a clean-tree note.
    pub fn describe(&self) -> String {
        let sections = [
            ("Staged files:", FileStatus::Staged),
            ("Modified files:", FileStatus::Modified),
            ("Deleted files:", FileStatus::Deleted),
        ];

        let mut lines = Vec::new();
        for (title, status) in sections {
            let paths = self.paths_with(status).collect::<Vec<_>>();
            if paths.is_empty() {
                continue;
            }

            lines.push(title.to_string());
            lines.extend(
                paths
                    .into_iter()
                    .map(|path| format!("    {}{}", status, path.display())),
            );
        }

        if lines.is_empty() {
            lines.push("Nothing to commit, working tree clean".to_string());
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn info(states: &[(&str, FileStatus)], untracked: &[&str]) -> StatusInfo {
        StatusInfo::new(
            states
                .iter()
                .map(|(path, status)| (PathBuf::from(path), *status))
                .collect(),
            untracked.iter().map(PathBuf::from).collect(),
        )
    }

    #[test]
    fn untracked_files_are_not_uncommitted_changes() {
        let status = info(
            &[("new.txt", FileStatus::Modified), ("old.txt", FileStatus::Unchanged)],
            &["new.txt"],
        );
        assert!(!status.has_uncommitted_changes());

        let status = info(&[("old.txt", FileStatus::Deleted)], &[]);
        assert!(status.has_uncommitted_changes());
    }

    #[test]
    fn describe_groups_files_by_status() {
        colored::control::set_override(false);
        let status = info(
            &[
                ("a.txt", FileStatus::Staged),
                ("b.txt", FileStatus::Modified),
                ("c.txt", FileStatus::Unchanged),
                ("d.txt", FileStatus::Deleted),
            ],
            &[],
        );

        assert_eq!(
            status.describe(),
            "Staged files:\n    staged:    a.txt\nModified files:\n    modified:  b.txt\nDeleted files:\n    deleted:   d.txt"
        );
    }

    #[test]
    fn clean_tree_has_a_note() {
        assert_eq!(
            info(&[("a.txt", FileStatus::Unchanged)], &[]).describe(),
            "Nothing to commit, working tree clean"
        );
    }
}
