//! Commit history traversal
//!
//! - `rev_list`: first-parent walks and reachability over all parents
//! - `log_entry`: one rendered line of `log`

pub mod log_entry;
pub mod rev_list;
