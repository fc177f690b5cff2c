//! Index entry representation
//!
//! Each entry records one version of one file: the path relative to the work
//! tree root and the ID of the blob holding its content.

use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct IndexEntry {
    /// File path relative to repository root
    pub path: PathBuf,
    /// SHA-1 hash of file content
    #[serde(rename = "hash")]
    pub oid: ObjectId,
}
