//! Ref table (branches and HEAD)
//!
//! References are human-readable names pointing to commits. Branches point at
//! commits directly. HEAD usually stores the *name* of the checked-out branch,
//! so resolving it takes one more lookup; after checking out a bare commit it
//! stores that commit's hash instead (detached HEAD).
//!
//! ## File Format
//!
//! `.jot/refs` holds a JSON list of `{name, revision}` records, one per branch
//! plus one for `HEAD`. The whole table is rewritten on every update.

use crate::artifacts::branch::REF_ALIASES;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::{read_json, write_json};
use crate::artifacts::objects::object_id::ObjectId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// What HEAD points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    /// The checked-out branch, which may not have any commit yet
    Branch(BranchName),
    Detached(ObjectId),
}

impl std::fmt::Display for Head {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Head::Branch(branch) => write!(f, "On branch {branch}"),
            Head::Detached(oid) => write!(f, "HEAD detached at {}", oid.to_short_oid()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RefRecord {
    name: String,
    revision: String,
}

#[derive(Debug)]
pub struct Refs {
    /// Path to the ref table file (typically `.jot/refs`)
    path: Box<Path>,
    branches: BTreeMap<BranchName, ObjectId>,
    head: Head,
}

impl Refs {
    pub fn new(path: Box<Path>) -> Self {
        Refs {
            path,
            branches: BTreeMap::new(),
            head: Head::Branch(BranchName::default_branch()),
        }
    }

    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        let records: Vec<RefRecord> = read_json(&self.path)?;
        let mut head_revision = None;

        self.branches.clear();
        for record in records {
            if record.name == HEAD_REF_NAME {
                head_revision = Some(record.revision);
            } else {
                self.branches.insert(
                    BranchName::try_parse(record.name)?,
                    ObjectId::try_parse(record.revision)?,
                );
            }
        }

        self.head = match head_revision {
            Some(revision) => self.parse_head(revision)?,
            None => Head::Branch(BranchName::default_branch()),
        };

        Ok(())
    }

    fn parse_head(&self, revision: String) -> anyhow::Result<Head> {
        // a branch name wins over a hash-looking revision
        if let Ok(branch) = BranchName::try_parse(revision.clone())
            && self.branches.contains_key(&branch)
        {
            return Ok(Head::Branch(branch));
        }

        match ObjectId::try_parse(revision.clone()) {
            Ok(oid) => Ok(Head::Detached(oid)),
            Err(_) => Ok(Head::Branch(BranchName::try_parse(revision)?)),
        }
    }

    pub fn write_updates(&self) -> anyhow::Result<()> {
        let head_revision = match &self.head {
            Head::Branch(branch) => branch.to_string(),
            Head::Detached(oid) => oid.to_string(),
        };

        let records = self
            .branches
            .iter()
            .map(|(name, oid)| RefRecord {
                name: name.to_string(),
                revision: oid.to_string(),
            })
            .chain(std::iter::once(RefRecord {
                name: HEAD_REF_NAME.to_string(),
                revision: head_revision,
            }))
            .collect::<Vec<_>>();

        write_json(&self.path, &records)
    }

    pub fn head(&self) -> &Head {
        &self.head
    }

    pub fn set_head(&mut self, head: Head) {
        tracing::info!(%head, "moved HEAD");
        self.head = head;
    }

    pub fn current_branch(&self) -> Option<&BranchName> {
        match &self.head {
            Head::Branch(branch) => Some(branch),
            Head::Detached(_) => None,
        }
    }

    pub fn is_current_branch(&self, branch: &BranchName) -> bool {
        self.current_branch() == Some(branch)
    }

    /// Commit HEAD resolves to, if any
    pub fn head_oid(&self) -> Option<ObjectId> {
        match &self.head {
            Head::Branch(branch) => self.branches.get(branch).cloned(),
            Head::Detached(oid) => Some(oid.clone()),
        }
    }

    /// Resolve `HEAD` (or one of its aliases) or a branch name to a commit.
    pub fn resolve(&self, name: &str) -> Option<ObjectId> {
        let name = REF_ALIASES.get(name).copied().unwrap_or(name);

        if name == HEAD_REF_NAME {
            return self.head_oid();
        }

        BranchName::try_parse(name.to_string())
            .ok()
            .and_then(|branch| self.branches.get(&branch).cloned())
    }

    pub fn branch(&self, branch: &BranchName) -> Option<&ObjectId> {
        self.branches.get(branch)
    }

    pub fn branches(&self) -> impl Iterator<Item = (&BranchName, &ObjectId)> {
        self.branches.iter()
    }

    /// Point `branch` at `oid`, replacing any previous value.
    pub fn update(&mut self, branch: &BranchName, oid: ObjectId) {
        tracing::info!(%branch, %oid, "moved branch");
        self.branches.remove(branch);
        self.branches.insert(branch.clone(), oid);
    }

    pub fn remove(&mut self, branch: &BranchName) -> Option<ObjectId> {
        self.branches.remove(branch)
    }

    /// Move whatever HEAD stands for to `oid`: the current branch, or HEAD itself when detached.
    pub fn advance_head(&mut self, oid: ObjectId) {
        match self.head.clone() {
            Head::Branch(branch) => self.update(&branch, oid),
            Head::Detached(_) => self.set_head(Head::Detached(oid)),
        }
    }

    /// Names pointing at `oid`: branches in name order, then `HEAD` when it resolves there.
    pub fn reverse_lookup(&self, oid: &ObjectId) -> Vec<String> {
        let mut names = self
            .branches
            .iter()
            .filter(|(_, target)| *target == oid)
            .map(|(name, _)| name.to_string())
            .collect::<Vec<_>>();

        if self.head_oid().as_ref() == Some(oid) {
            names.push(HEAD_REF_NAME.to_string());
        }

        names
    }

    /// Every commit some ref points at
    pub fn tips(&self) -> Vec<ObjectId> {
        let mut tips = self.branches.values().cloned().collect::<Vec<_>>();
        if let Head::Detached(oid) = &self.head {
            tips.push(oid.clone());
        }
        tips
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;

    fn branch(name: &str) -> BranchName {
        BranchName::try_parse(name.to_string()).unwrap()
    }

    #[test]
    fn head_resolves_through_the_current_branch() {
        let mut refs = Refs::new(Path::new("refs").into());
        assert_eq!(refs.resolve("HEAD"), None);

        let oid = ObjectId::digest("c1");
        refs.advance_head(oid.clone());

        assert_eq!(refs.resolve("HEAD"), Some(oid.clone()));
        assert_eq!(refs.resolve("@"), Some(oid.clone()));
        assert_eq!(refs.resolve("master"), Some(oid));
        assert_eq!(refs.resolve("missing"), None);
    }

    #[test]
    fn reverse_lookup_lists_branches_then_head() {
        let mut refs = Refs::new(Path::new("refs").into());
        let c1 = ObjectId::digest("c1");
        let c2 = ObjectId::digest("c2");
        refs.update(&branch("master"), c1.clone());
        refs.update(&branch("b1"), c1.clone());
        refs.update(&branch("b2"), c2.clone());

        assert_eq!(refs.reverse_lookup(&c1), vec!["b1", "master", "HEAD"]);
        assert_eq!(refs.reverse_lookup(&c2), vec!["b2"]);
        assert!(refs.reverse_lookup(&ObjectId::digest("c3")).is_empty());
    }

    #[test]
    fn update_replaces_the_previous_value() {
        let mut refs = Refs::new(Path::new("refs").into());
        refs.update(&branch("b1"), ObjectId::digest("c1"));
        refs.update(&branch("b1"), ObjectId::digest("c2"));

        assert_eq!(refs.branches().count(), 1);
        assert_eq!(refs.resolve("b1"), Some(ObjectId::digest("c2")));
    }

    #[test]
    fn table_round_trips_attached_and_detached_heads() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("refs").into_boxed_path();
        let c1 = ObjectId::digest("c1");

        let mut refs = Refs::new(path.clone());
        refs.update(&branch("feature"), c1.clone());
        refs.set_head(Head::Branch(branch("feature")));
        refs.write_updates()?;

        let mut reloaded = Refs::new(path.clone());
        reloaded.rehydrate()?;
        assert_eq!(reloaded.head(), &Head::Branch(branch("feature")));
        assert_eq!(reloaded.head_oid(), Some(c1.clone()));

        reloaded.set_head(Head::Detached(c1.clone()));
        reloaded.write_updates()?;
        let mut detached = Refs::new(path);
        detached.rehydrate()?;
        assert_eq!(detached.head(), &Head::Detached(c1));
        Ok(())
    }
}
