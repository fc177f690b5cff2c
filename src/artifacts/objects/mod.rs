//! Object types
//!
//! - **Blob**: file content, stored hex-encoded
//! - **Commit**: tree, parents, timestamp and message, stored as JSON
//! - **Tree**: per-commit snapshot of the committed files, stored as manifests
//!   outside the object store
//!
//! Stored objects start with a `<type>\n` header line.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
