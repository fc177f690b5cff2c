//! Checkout and reset machinery
//!
//! - `target`: resolving a branch name or commit hash
//! - `divergence`: common ancestor and the commits on each side of it
//! - `movement`: discarding changes, reverting and replaying commits

pub mod divergence;
pub mod movement;
pub mod target;
