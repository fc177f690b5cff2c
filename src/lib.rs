//! jot: a small local version-control engine
//!
//! The crate is split the same way the on-disk repository is:
//!
//! - `areas`: durable, file-backed state under `.jot/` (objects, refs, index, stage, ...)
//! - `artifacts`: data types and the algorithms operating on them (trees, ancestry, status)
//! - `commands`: user-facing operations, each implemented on `Repository`

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod error;

/// Name of the repository storage directory, relative to the work tree root
pub const JOT_DIR: &str = ".jot";

/// Branch HEAD points at in a freshly initialized repository
pub const DEFAULT_BRANCH: &str = "master";

/// Environment variable overriding the commit timestamp
pub const COMMIT_DATE_ENV: &str = "JOT_COMMIT_DATE";

/// Environment variable holding the tracing filter directives
pub const LOG_ENV: &str = "JOT_LOG";
