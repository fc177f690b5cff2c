use crate::areas::database::Database;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::HashSet;

/// How two commits relate through their first-parent ancestries.
///
/// The common ancestor is the newest commit of the target's ancestry that also
/// belongs to the current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Divergence {
    pub ancestor: Option<ObjectId>,
    /// Commits only on the current side, newest first
    pub ours: Vec<ObjectId>,
    /// Commits only on the target side, newest first
    pub theirs: Vec<ObjectId>,
}

impl Divergence {
    pub fn between(
        database: &Database,
        current: Option<&ObjectId>,
        target: &ObjectId,
    ) -> anyhow::Result<Self> {
        let current_ancestry = RevList::new(database, current.cloned()).oids()?;
        let current_set = current_ancestry.iter().collect::<HashSet<_>>();

        let mut ancestor = None;
        let mut theirs = Vec::new();
        for item in RevList::new(database, Some(target.clone())) {
            let (oid, _) = item?;
            if current_set.contains(&oid) {
                ancestor = Some(oid);
                break;
            }
            theirs.push(oid);
        }

        let ours = current_ancestry
            .iter()
            .take_while(|oid| Some(*oid) != ancestor.as_ref())
            .cloned()
            .collect();

        Ok(Divergence {
            ancestor,
            ours,
            theirs,
        })
    }

    /// The target already belongs to the current history.
    pub fn is_up_to_date(&self) -> bool {
        self.theirs.is_empty()
    }

    /// The current commit belongs to the target's history.
    pub fn is_fast_forward(&self) -> bool {
        self.ours.is_empty() && !self.theirs.is_empty()
    }
}
