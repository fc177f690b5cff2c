//! Index data structures
//!
//! The index is an append-only log of `{path, hash}` records, oldest first.
//! The newest record of a path is its current version, the one before it the
//! version a revert goes back to.

pub mod index_entry;
pub mod version_scan;
