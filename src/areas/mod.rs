//! File-backed repository state under `.jot/`

pub mod database;
pub mod index;
pub mod merge_state;
pub mod refs;
pub mod repository;
pub mod stage;
pub mod states;
pub mod workspace;
