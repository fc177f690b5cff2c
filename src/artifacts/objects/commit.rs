//! Commit object
//!
//! A commit links a tree snapshot to its parents with a message and a timestamp.
//! Zero parents mark the root commit, two parents a merge commit (first parent is
//! the branch merged into, second the branch merged in).
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit
//! {"tree":"<sha>","parents":["<sha>"],"timestamp":1700000000,"message":"..."}
//! ```
//!
//! The commit ID is not a digest of the file contents: it hashes the timestamp
//! and message, followed by the tree and parent IDs.

use crate::COMMIT_DATE_ENV;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    tree: ObjectId,
    parents: Vec<ObjectId>,
    /// Seconds since the Unix epoch
    timestamp: i64,
    message: String,
}

impl Commit {
    pub fn new(tree: ObjectId, parents: Vec<ObjectId>, timestamp: i64, message: String) -> Self {
        Commit {
            tree,
            parents,
            timestamp,
            message,
        }
    }

    /// Timestamp for a commit created now
    ///
    /// Reads `JOT_COMMIT_DATE` when set (`%Y-%m-%d %H:%M:%S %z` or RFC 2822),
    /// otherwise uses the current time.
    pub fn timestamp_from_env() -> i64 {
        std::env::var(COMMIT_DATE_ENV)
            .ok()
            .and_then(|date_str| {
                chrono::DateTime::parse_from_rfc2822(&date_str)
                    .or_else(|_| chrono::DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                    .ok()
            })
            .map(|timestamp| timestamp.timestamp())
            .unwrap_or_else(|| chrono::Utc::now().timestamp())
    }

    pub fn tree(&self) -> &ObjectId {
        &self.tree
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    /// First parent, the one history walks follow
    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Format timestamp in human-readable form
    ///
    /// String like "Mon Jan 1 12:34:56 2024 +0000"
    pub fn readable_timestamp(&self) -> String {
        chrono::DateTime::from_timestamp(self.timestamp, 0)
            .map(|timestamp| timestamp.format("%a %b %-d %H:%M:%S %Y %z").to_string())
            .unwrap_or_else(|| self.timestamp.to_string())
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut commit_bytes = Vec::new();
        writeln!(commit_bytes, "{}", self.object_type())?;
        serde_json::to_writer(&mut commit_bytes, self).context("Unable to encode commit")?;

        Ok(Bytes::from(commit_bytes))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        serde_json::from_reader(reader).context("Invalid commit object")
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn object_id(&self) -> anyhow::Result<ObjectId> {
        let mut identity = format!("{}{}{}", self.timestamp, self.message, self.tree);
        for parent in &self.parents {
            identity.push_str(parent.as_ref());
        }

        Ok(ObjectId::digest(identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn tree() -> ObjectId {
        ObjectId::digest("tree")
    }

    #[test]
    fn commit_survives_the_object_store_encoding() -> anyhow::Result<()> {
        let commit = Commit::new(tree(), vec![ObjectId::digest("parent")], 1_700_000_000, "msg".into());
        let mut reader = Cursor::new(Packable::serialize(&commit)?);

        assert_eq!(ObjectType::parse_object_type(&mut reader)?, ObjectType::Commit);
        assert_eq!(<Commit as Unpackable>::deserialize(reader)?, commit);
        Ok(())
    }

    #[test]
    fn same_second_and_message_on_different_parents_do_not_collide() -> anyhow::Result<()> {
        let first = Commit::new(tree(), vec![ObjectId::digest("a")], 42, "same".into());
        let second = Commit::new(tree(), vec![ObjectId::digest("b")], 42, "same".into());

        assert_ne!(first.object_id()?, second.object_id()?);
        Ok(())
    }

    #[test]
    fn renders_the_timestamp_in_utc() {
        let commit = Commit::new(tree(), vec![], 0, "epoch".into());

        assert_eq!(commit.readable_timestamp(), "Thu Jan 1 00:00:00 1970 +0000");
    }
}
