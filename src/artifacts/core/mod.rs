//! Core utilities shared by the file-backed areas
//!
//! Every logical file under `.jot/` is rewritten whole. Writes go to a
//! temporary sibling, locked exclusively while being filled, and are then
//! renamed over the target, so readers see either the old or the new content.

use anyhow::Context;
use fake::rand;
use file_guard::Lock;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;

/// Replace `path` with `content` atomically.
pub fn write_atomic(path: &Path, content: &[u8]) -> anyhow::Result<()> {
    let dir = path
        .parent()
        .context(format!("Invalid file path {}", path.display()))?;
    std::fs::create_dir_all(dir)
        .context(format!("Unable to create directory {}", dir.display()))?;

    let temp_path = dir.join(generate_temp_name());
    {
        let mut file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .context(format!("Unable to open file {}", temp_path.display()))?;
        let mut lock = file_guard::lock(&mut file, Lock::Exclusive, 0, 1)
            .context(format!("Unable to lock file {}", temp_path.display()))?;

        lock.deref_mut()
            .write_all(content)
            .context(format!("Unable to write file {}", temp_path.display()))?;
    }

    // rename the temp file to the target file to make it atomic
    std::fs::rename(&temp_path, path)
        .context(format!("Unable to rename file to {}", path.display()))?;

    Ok(())
}

/// Serialize `value` as JSON and replace `path` with it atomically.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> anyhow::Result<()> {
    let content = serde_json::to_vec_pretty(value)
        .context(format!("Unable to encode {}", path.display()))?;

    write_atomic(path, &content)
}

/// Read a JSON document, falling back to the default value when the file is absent.
pub fn read_json<T: DeserializeOwned + Default>(path: &Path) -> anyhow::Result<T> {
    if !path.exists() {
        return Ok(T::default());
    }

    let content =
        std::fs::read(path).context(format!("Unable to read file {}", path.display()))?;
    if content.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(&content).context(format!("Corrupted file {}", path.display()))
}

pub fn generate_temp_name() -> String {
    format!("tmp-obj-{}", rand::random::<u32>())
}
