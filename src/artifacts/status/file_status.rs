use colored::Colorize;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileStatus {
    /// Content matches the latest committed version
    Unchanged,
    /// Content differs from both the staged and the committed version, or the
    /// file has no recorded version at all
    Modified,
    /// Queued for the next commit with content still matching what was queued
    Staged,
    /// Committed before, missing from the work tree now
    Deleted,
}

impl FileStatus {
    pub fn label(&self) -> &'static str {
        match self {
            FileStatus::Unchanged => "unchanged:",
            FileStatus::Modified => "modified:",
            FileStatus::Staged => "staged:",
            FileStatus::Deleted => "deleted:",
        }
    }

    /// Whether the file carries work that is not committed yet
    pub fn is_pending(&self) -> bool {
        !matches!(self, FileStatus::Unchanged)
    }
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let padded = format!("{:<11}", self.label());
        let colored_str = match self {
            FileStatus::Unchanged => padded.normal(),
            FileStatus::Staged => padded.green(),
            FileStatus::Modified | FileStatus::Deleted => padded.red(),
        };

        write!(f, "{}", colored_str)
    }
}
