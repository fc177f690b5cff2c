//! Tree snapshots
//!
//! A tree mirrors the directories of the committed files. Leaves reference
//! blobs; interior nodes hash the concatenation of their children's IDs.
//!
//! Children keep insertion order and are never sorted. The interior hash is
//! only reproducible if files are inserted in the same order, so callers must
//! feed files from an ordered collection.
//!
//! ## Format
//!
//! Every interior node is written as a `.manifest` file inside
//! `.jot/trees/<commit>/<node path>/`, holding one `{type, hash, path}` record
//! per child followed by one record for the node itself.

use crate::areas::database::Database;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// One line of a tree manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRecord {
    #[serde(rename = "type")]
    pub kind: ObjectType,
    pub hash: ObjectId,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    Leaf {
        path: PathBuf,
        oid: ObjectId,
        /// Present while building from the work tree, absent when loaded from manifests
        blob: Option<Blob>,
    },
    Interior {
        path: PathBuf,
        oid: ObjectId,
        children: Vec<TreeNode>,
    },
}

impl TreeNode {
    fn interior(path: PathBuf) -> Self {
        TreeNode::Interior {
            path,
            oid: ObjectId::digest(""),
            children: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            TreeNode::Leaf { path, .. } | TreeNode::Interior { path, .. } => path,
        }
    }

    pub fn oid(&self) -> &ObjectId {
        match self {
            TreeNode::Leaf { oid, .. } | TreeNode::Interior { oid, .. } => oid,
        }
    }

    fn record(&self) -> ManifestRecord {
        let kind = match self {
            TreeNode::Leaf { .. } => ObjectType::Blob,
            TreeNode::Interior { .. } => ObjectType::Tree,
        };

        ManifestRecord {
            kind,
            hash: self.oid().clone(),
            path: self.path().to_path_buf(),
        }
    }

    fn insert(&mut self, components: &[&OsStr], leaf: TreeNode) -> anyhow::Result<()> {
        let TreeNode::Interior {
            path,
            oid,
            children,
        } = self
        else {
            anyhow::bail!("Cannot insert {} below a file", leaf.path().display());
        };

        let Some((first, rest)) = components.split_first() else {
            anyhow::bail!("Cannot insert an empty path");
        };
        let child_path = path.join(first);

        if rest.is_empty() {
            // a file already visited in this build is kept as is
            if !children.iter().any(|child| child.path() == child_path) {
                children.push(leaf);
            }
        } else {
            let position = match children
                .iter()
                .position(|child| child.path() == child_path)
            {
                Some(position) => position,
                None => {
                    children.push(TreeNode::interior(child_path));
                    children.len() - 1
                }
            };

            children[position].insert(rest, leaf)?;
        }

        *oid = ObjectId::digest(
            children
                .iter()
                .map(|child| child.oid().as_ref())
                .collect::<String>(),
        );

        Ok(())
    }

    fn collect_files(&self, files: &mut Vec<(PathBuf, ObjectId)>) {
        match self {
            TreeNode::Leaf { path, oid, .. } => files.push((path.clone(), oid.clone())),
            TreeNode::Interior { children, .. } => children
                .iter()
                .for_each(|child| child.collect_files(files)),
        }
    }

    fn write(
        &self,
        database: &Database,
        commit_oid: &ObjectId,
        persist_blobs: bool,
    ) -> anyhow::Result<()> {
        match self {
            TreeNode::Leaf { blob, .. } => {
                if persist_blobs && let Some(blob) = blob {
                    database.store(blob.clone())?;
                }
            }
            TreeNode::Interior { path, children, .. } => {
                let mut records = children.iter().map(TreeNode::record).collect::<Vec<_>>();
                records.push(self.record());
                database.write_manifest(commit_oid, path, &records)?;

                for child in children {
                    child.write(database, commit_oid, persist_blobs)?;
                }
            }
        }

        Ok(())
    }

    fn load(database: &Database, commit_oid: &ObjectId, dir: &Path) -> anyhow::Result<Self> {
        let mut records = database.read_manifest(commit_oid, dir)?;
        let own = records
            .pop()
            .ok_or_else(|| anyhow::anyhow!("Empty manifest in {}", dir.display()))?;

        let children = records
            .into_iter()
            .map(|record| match record.kind {
                ObjectType::Tree => Self::load(database, commit_oid, &record.path),
                _ => Ok(TreeNode::Leaf {
                    path: record.path,
                    oid: record.hash,
                    blob: None,
                }),
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(TreeNode::Interior {
            path: own.path,
            oid: own.hash,
            children,
        })
    }
}

/// Snapshot of the files taking part in one commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    root: TreeNode,
}

impl Default for Tree {
    fn default() -> Self {
        Tree {
            root: TreeNode::interior(PathBuf::new()),
        }
    }
}

impl Tree {
    /// Build a tree over the given files, in the given order.
    pub fn build(files: impl IntoIterator<Item = (PathBuf, Blob)>) -> anyhow::Result<Self> {
        let mut tree = Tree::default();

        for (path, blob) in files {
            tree.insert(path, blob)?;
        }

        Ok(tree)
    }

    /// Add one file, creating missing directories and rehashing the nodes above it.
    pub fn insert(&mut self, path: PathBuf, blob: Blob) -> anyhow::Result<()> {
        let components = path.iter().collect::<Vec<_>>();
        let leaf = TreeNode::Leaf {
            oid: blob.object_id()?,
            path: path.clone(),
            blob: Some(blob),
        };

        self.root.insert(&components, leaf)
    }

    pub fn oid(&self) -> &ObjectId {
        self.root.oid()
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// Every file of the snapshot with its blob ID, depth first
    pub fn files(&self) -> Vec<(PathBuf, ObjectId)> {
        let mut files = Vec::new();
        self.root.collect_files(&mut files);
        files
    }

    /// Write the manifests under `trees/<commit_oid>/`, storing the blobs too when asked.
    pub fn write(
        &self,
        database: &Database,
        commit_oid: &ObjectId,
        persist_blobs: bool,
    ) -> anyhow::Result<()> {
        self.root.write(database, commit_oid, persist_blobs)
    }

    pub fn load(database: &Database, commit_oid: &ObjectId) -> anyhow::Result<Self> {
        Ok(Tree {
            root: TreeNode::load(database, commit_oid, Path::new(""))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use pretty_assertions::assert_eq;

    fn file(path: &str, content: &'static str) -> (PathBuf, Blob) {
        (PathBuf::from(path), Blob::new(Bytes::from_static(content.as_bytes())))
    }

    #[test]
    fn child_order_changes_the_tree_hash() -> anyhow::Result<()> {
        let forward = Tree::build(vec![file("a.txt", "a"), file("b.txt", "b")])?;
        let backward = Tree::build(vec![file("b.txt", "b"), file("a.txt", "a")])?;

        assert_ne!(forward.oid(), backward.oid());
        Ok(())
    }

    #[test]
    fn same_files_in_same_order_hash_identically() -> anyhow::Result<()> {
        let files = vec![file("dir/a.txt", "a"), file("b.txt", "b")];

        assert_eq!(Tree::build(files.clone())?.oid(), Tree::build(files)?.oid());
        Ok(())
    }

    #[test]
    fn content_change_below_a_directory_reaches_the_root() -> anyhow::Result<()> {
        let before = Tree::build(vec![file("x/y/z.txt", "one")])?;
        let after = Tree::build(vec![file("x/y/z.txt", "two")])?;

        assert_ne!(before.oid(), after.oid());
        Ok(())
    }

    #[test]
    fn files_under_one_new_directory_share_an_interior_node() -> anyhow::Result<()> {
        let tree = Tree::build(vec![
            file("dir/a.txt", "a"),
            file("dir/b.txt", "b"),
            file("dir/a.txt", "ignored duplicate"),
        ])?;

        let TreeNode::Interior { children, .. } = tree.root() else {
            panic!("root must be an interior node");
        };
        assert_eq!(children.len(), 1);
        assert_eq!(
            tree.files()
                .into_iter()
                .map(|(path, _)| path)
                .collect::<Vec<_>>(),
            vec![PathBuf::from("dir/a.txt"), PathBuf::from("dir/b.txt")]
        );
        Ok(())
    }

    #[test]
    fn interior_hash_is_digest_of_child_hashes() -> anyhow::Result<()> {
        let (path_a, blob_a) = file("a.txt", "a");
        let (path_b, blob_b) = file("b.txt", "b");
        let expected = ObjectId::digest(format!("{}{}", blob_a.object_id()?, blob_b.object_id()?));

        let tree = Tree::build(vec![(path_a, blob_a), (path_b, blob_b)])?;

        assert_eq!(tree.oid(), &expected);
        Ok(())
    }
}
