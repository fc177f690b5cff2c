//! Merge machinery
//!
//! - `merge_plan`: which files conflict and which come in cleanly
//! - `conflict`: the conflict-marked file body

pub mod conflict;
pub mod merge_plan;
