use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::HashSet;

/// Walk over first-parent links, newest commit first, root included.
#[derive(Clone)]
pub struct RevList<'d> {
    database: &'d Database,
    current_commit_oid: Option<ObjectId>,
}

impl<'d> RevList<'d> {
    pub fn new(database: &'d Database, start: Option<ObjectId>) -> Self {
        RevList {
            database,
            current_commit_oid: start,
        }
    }

    /// Collect only the commit IDs of the ancestry.
    pub fn oids(self) -> anyhow::Result<Vec<ObjectId>> {
        self.map(|item| item.map(|(oid, _)| oid)).collect()
    }
}

impl Iterator for RevList<'_> {
    type Item = anyhow::Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.current_commit_oid.take()?;

        match self.database.parse_object_as_commit(&commit_oid) {
            Ok(commit) => {
                // Move to the parent commit for the next iteration
                self.current_commit_oid = commit.parent().cloned();
                Some(Ok((commit_oid, commit)))
            }
            Err(error) => Some(Err(error)),
        }
    }
}

/// Every commit reachable from `tips` through any parent link.
pub fn reachable(database: &Database, tips: &[ObjectId]) -> anyhow::Result<HashSet<ObjectId>> {
    let mut seen = HashSet::new();
    let mut pending = tips.to_vec();

    while let Some(oid) = pending.pop() {
        if !seen.insert(oid.clone()) {
            continue;
        }

        let commit = database.parse_object_as_commit(&oid)?;
        pending.extend(commit.parents().iter().cloned());
    }

    Ok(seen)
}
