use crate::artifacts::core::{read_json, write_json};
use std::path::{Path, PathBuf};

/// Paths queued for the next commit, in the order they were added
#[derive(Debug, Clone)]
pub struct Stage {
    path: Box<Path>,
    paths: Vec<PathBuf>,
}

impl Stage {
    pub fn new(path: Box<Path>) -> Self {
        Stage {
            path,
            paths: Vec::new(),
        }
    }

    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.paths = read_json(&self.path)?;
        Ok(())
    }

    pub fn write_updates(&self) -> anyhow::Result<()> {
        write_json(&self.path, &self.paths)
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.iter().any(|staged| staged == path)
    }

    /// Queue a path; queuing it twice keeps the first position.
    pub fn insert(&mut self, path: PathBuf) {
        if !self.contains(&path) {
            self.paths.push(path);
        }
    }

    pub fn remove(&mut self, path: &Path) -> bool {
        let before = self.paths.len();
        self.paths.retain(|staged| staged != path);
        before != self.paths.len()
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }
}
