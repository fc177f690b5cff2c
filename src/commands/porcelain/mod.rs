//! User-facing commands
//!
//! - `init`: create the `.jot/` storage
//! - `add`: record file versions and stage them
//! - `rm`: stop tracking files
//! - `commit`: commit the stage or a list of files
//! - `status`: classify the work tree
//! - `log`: list the history of HEAD
//! - `checkout`: move to a branch or commit, or discard changes to files
//! - `reset`: move the current branch, deleting commits left unreachable
//! - `branch`: create, remove and list branches
//! - `merge`: three-way merge with conflict markers and `--continue`

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
