use crate::areas::database::Database;
use crate::artifacts::checkout::divergence::Divergence;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A path both sides changed to different contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub path: PathBuf,
    pub ours: ObjectId,
    pub theirs: ObjectId,
}

/// What a three-way merge has to do to the work tree.
///
/// Conflicts are decided by whole-file inequality of the newest version each
/// side recorded since the common ancestor, never by hunks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePlan {
    pub conflicts: Vec<Conflict>,
    /// Paths only the merged side changed, with their content
    pub incoming: Vec<(PathBuf, ObjectId)>,
}

impl MergePlan {
    pub fn compute(database: &Database, divergence: &Divergence) -> anyhow::Result<Self> {
        let ours = Self::touched(database, &divergence.ours)?;
        let theirs = Self::touched(database, &divergence.theirs)?;

        let mut plan = MergePlan::default();
        for (path, theirs_oid) in theirs {
            match ours.get(&path) {
                Some(ours_oid) if *ours_oid != theirs_oid => plan.conflicts.push(Conflict {
                    path,
                    ours: ours_oid.clone(),
                    theirs: theirs_oid,
                }),
                Some(_) => {}
                None => plan.incoming.push((path, theirs_oid)),
            }
        }

        Ok(plan)
    }

    /// Files touched by `commits` (newest first), keeping each path's newest version.
    fn touched(
        database: &Database,
        commits: &[ObjectId],
    ) -> anyhow::Result<BTreeMap<PathBuf, ObjectId>> {
        let mut files = BTreeMap::new();

        for commit_oid in commits {
            for (path, oid) in database.load_tree(commit_oid)?.files() {
                files.entry(path).or_insert(oid);
            }
        }

        Ok(files)
    }
}
