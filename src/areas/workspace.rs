use crate::JOT_DIR;
use crate::artifacts::objects::blob::Blob;
use anyhow::Context;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 3] = [JOT_DIR, ".", ".."];

/// The work tree: every regular file below the root except the repository storage
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Express a user-supplied path relative to the work tree root.
    pub fn relativize(&self, path: &Path) -> PathBuf {
        let path = path.strip_prefix(self.path.as_ref()).unwrap_or(path);

        path.components()
            .filter(|component| !matches!(component, std::path::Component::CurDir))
            .collect()
    }

    pub fn parse_blob(&self, path: &Path) -> anyhow::Result<Blob> {
        Ok(Blob::new(self.read_file(path)?))
    }

    /// Regular files below `root_file_path` (the whole work tree by default),
    /// relative to the work tree root and sorted.
    pub fn list_files(&self, root_file_path: Option<&Path>) -> anyhow::Result<Vec<PathBuf>> {
        let root_file_path = match root_file_path {
            Some(p) => self.path.join(p),
            None => self.path.to_path_buf(),
        };

        if !root_file_path.exists() {
            anyhow::bail!("The specified path does not exist: {:?}", root_file_path);
        }

        let mut files = WalkDir::new(&root_file_path)
            .into_iter()
            .filter_entry(|entry| !Self::is_ignored(entry.path(), &self.path))
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(self.path.as_ref())
                    .ok()
                    .map(PathBuf::from)
            })
            .collect::<Vec<_>>();

        files.sort();
        Ok(files)
    }

    fn is_ignored(path: &Path, root: &Path) -> bool {
        let relative = path.strip_prefix(root).unwrap_or(path);

        relative.components().any(|component| {
            if let std::path::Component::Normal(name) = component {
                let name_str = name.to_string_lossy();
                IGNORED_PATHS.contains(&name_str.as_ref())
            } else {
                false
            }
        })
    }

    pub fn exists(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_file()
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let full_path = self.path.join(file_path);

        let content = std::fs::read(&full_path)
            .with_context(|| format!("Failed to read file: {:?}", file_path))?;

        Ok(content.into())
    }

    /// Write `content` to `file_path`, creating parent directories as needed.
    pub fn write_file(&self, file_path: &Path, content: &[u8]) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory for: {:?}", file_path))?;
        }

        std::fs::write(&full_path, content)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))
    }

    /// Delete `file_path` and any parent directory left empty by it.
    pub fn remove_file(&self, file_path: &Path) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if full_path.is_file() {
            std::fs::remove_file(&full_path)
                .with_context(|| format!("Failed to remove file: {:?}", file_path))?;
        }

        self.prune_empty_parent_dirs(&full_path)
    }

    fn prune_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.path.as_ref()
            && parent.starts_with(self.path.as_ref())
            && parent.is_dir()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent).with_context(|| {
                format!("Failed to remove empty directory at {:?}", parent)
            })?;
            self.prune_empty_parent_dirs(parent)?;
        }

        Ok(())
    }
}
