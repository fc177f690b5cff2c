//! Index (version log)
//!
//! Every committed file version is appended here, in commit order. Pending
//! versions recorded by `add` sit at the tail until the next commit moves them
//! into place. History rewrites only ever drop entries from the tail, and `rm`
//! drops every version of a path at once.
//!
//! ## Invariant
//!
//! After a commit the last `n` entries are exactly the `n` still tracked files
//! that commit touched, one entry per path. Reverting a commit relies on this
//! to truncate by `n` and to find each file's previous version by skipping one
//! match.

use crate::artifacts::core::{read_json, write_json};
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::index::version_scan::VersionScan;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.jot/index`)
    path: Box<Path>,
    entries: Vec<IndexEntry>,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: Vec::new(),
        }
    }

    /// Reload the entries from disk, discarding unsaved changes.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.entries = read_json(&self.path)?;
        Ok(())
    }

    pub fn write_updates(&self) -> anyhow::Result<()> {
        write_json(&self.path, &self.entries)
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn append(&mut self, path: PathBuf, oid: ObjectId) {
        self.entries.push(IndexEntry::new(path, oid));
    }

    pub fn find_latest(&self, path: &Path) -> Option<&IndexEntry> {
        VersionScan::new(&self.entries, path, 0)
            .find()
            .map(|(_, entry)| entry)
    }

    /// The version before the latest one
    pub fn find_previous(&self, path: &Path) -> Option<&IndexEntry> {
        VersionScan::new(&self.entries, path, 1)
            .find()
            .map(|(_, entry)| entry)
    }

    pub fn is_tracked(&self, path: &Path) -> bool {
        self.find_latest(path).is_some()
    }

    /// Drop the latest version of `path`, wherever it sits in the log.
    pub fn remove_latest(&mut self, path: &Path) -> Option<IndexEntry> {
        let (position, _) = VersionScan::new(&self.entries, path, 0).find()?;
        Some(self.entries.remove(position))
    }

    /// Drop the last `n` entries.
    pub fn truncate(&mut self, n: usize) {
        let keep = self.entries.len().saturating_sub(n);
        self.entries.truncate(keep);
    }

    /// Forget every version of `path`, returning how many were dropped.
    pub fn remove_all(&mut self, path: &Path) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.path != path);
        before - self.entries.len()
    }

    /// Every path with at least one recorded version
    pub fn tracked_paths(&self) -> BTreeSet<PathBuf> {
        self.entries
            .iter()
            .map(|entry| entry.path.clone())
            .collect()
    }
}
