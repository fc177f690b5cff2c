use crate::artifacts::core::{read_json, write_json};
use crate::artifacts::status::file_status::FileStatus;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StateRecord {
    path: PathBuf,
    state: FileStatus,
}

/// Statuses from the last classification pass, kept in `.jot/states`
#[derive(Debug)]
pub struct StatusCache {
    path: Box<Path>,
}

impl StatusCache {
    pub fn new(path: Box<Path>) -> Self {
        StatusCache { path }
    }

    pub fn load(&self) -> anyhow::Result<BTreeMap<PathBuf, FileStatus>> {
        let records: Vec<StateRecord> = read_json(&self.path)?;

        Ok(records
            .into_iter()
            .map(|record| (record.path, record.state))
            .collect())
    }

    pub fn save(&self, states: &BTreeMap<PathBuf, FileStatus>) -> anyhow::Result<()> {
        let records = states
            .iter()
            .map(|(path, state)| StateRecord {
                path: path.clone(),
                state: *state,
            })
            .collect::<Vec<_>>();

        write_json(&self.path, &records)
    }
}
