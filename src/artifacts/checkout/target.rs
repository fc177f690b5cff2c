use crate::areas::database::Database;
use crate::areas::refs::{HEAD_REF_NAME, Head, Refs};
use crate::artifacts::branch::REF_ALIASES;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::error::RepositoryError;

/// Where a checkout, reset or log starts from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Branch(BranchName, ObjectId),
    Revision(ObjectId),
}

impl Target {
    /// Resolve a branch name, `HEAD`, or a full commit hash, in that order.
    pub fn resolve(refs: &Refs, database: &Database, revision: &str) -> anyhow::Result<Self> {
        if let Ok(branch) = BranchName::try_parse(revision.to_string())
            && let Some(oid) = refs.branch(&branch)
        {
            return Ok(Target::Branch(branch, oid.clone()));
        }

        let alias = REF_ALIASES.get(revision).copied().unwrap_or(revision);
        if alias == HEAD_REF_NAME {
            return match (refs.head(), refs.head_oid()) {
                (Head::Branch(branch), Some(oid)) => Ok(Target::Branch(branch.clone(), oid)),
                (Head::Detached(oid), _) => Ok(Target::Revision(oid.clone())),
                (Head::Branch(_), None) => anyhow::bail!(RepositoryError::NoCommits),
            };
        }

        if let Ok(oid) = ObjectId::try_parse(revision.to_string())
            && database.is_commit(&oid)
        {
            return Ok(Target::Revision(oid));
        }

        anyhow::bail!(RepositoryError::RevisionNotFound(revision.to_string()))
    }

    pub fn oid(&self) -> &ObjectId {
        match self {
            Target::Branch(_, oid) | Target::Revision(oid) => oid,
        }
    }

    /// HEAD after checking this target out
    pub fn head(&self) -> Head {
        match self {
            Target::Branch(branch, _) => Head::Branch(branch.clone()),
            Target::Revision(oid) => Head::Detached(oid.clone()),
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Branch(branch, _) => write!(f, "{branch}"),
            Target::Revision(oid) => write!(f, "{oid}"),
        }
    }
}
