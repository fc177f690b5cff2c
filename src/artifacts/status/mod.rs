//! Working tree status
//!
//! - `file_status`: the four states a file can be in
//! - `inspector`: classifies every file by comparing it against the index and stage
//! - `status_info`: the result of one classification pass

pub mod file_status;
pub mod inspector;
pub mod status_info;
