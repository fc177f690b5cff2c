//! Command implementations
//!
//! Every command is an `impl Repository` block under `porcelain`. Commands
//! write their human-readable result to the repository writer and also return
//! it, so callers can inspect outcomes without parsing text.

pub mod porcelain;
