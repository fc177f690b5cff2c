//! Data structures and algorithms
//!
//! - `branch`: branch names and ref aliases
//! - `checkout`: target resolution, divergence and work tree movement
//! - `core`: atomic file persistence shared by the areas
//! - `index`: index entries and the reverse version scan
//! - `log`: commit history traversal
//! - `merge`: merge planning and conflict markers
//! - `objects`: object types (blob, commit) and tree snapshots
//! - `status`: work tree status classification

pub mod branch;
pub mod checkout;
pub mod core;
pub mod index;
pub mod log;
pub mod merge;
pub mod objects;
pub mod status;
