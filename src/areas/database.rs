use crate::artifacts::core::{read_json, write_atomic, write_json};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, ObjectBox, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::{ManifestRecord, Tree};
use crate::error::RepositoryError;
use anyhow::Context;
use bytes::Bytes;
use std::io::{BufRead, Cursor};
use std::path::{Path, PathBuf};

const MANIFEST_FILE: &str = ".manifest";

/// Content-addressed object store plus the per-commit tree manifests
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
    trees_path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>, trees_path: Box<Path>) -> Self {
        Database { path, trees_path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn trees_path(&self) -> &Path {
        &self.trees_path
    }

    /// Store an object under its ID and return the ID.
    ///
    /// Storing the same object twice is a no-op.
    pub fn store(&self, object: impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = self.path.join(object_id.to_path());

        // write the object to disk unless it already exists
        if !object_path.exists() {
            write_atomic(&object_path, &object.serialize()?)?;
            tracing::debug!(oid = %object_id, kind = %object.object_type(), "stored object");
        }

        Ok(object_id)
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.path.join(object_id.to_path());

        if !object_path.is_file() {
            anyhow::bail!(RepositoryError::ObjectNotFound(object_id.to_string()));
        }

        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Ok(object_content.into())
    }

    pub fn parse_object(&self, object_id: &ObjectId) -> anyhow::Result<ObjectBox> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Blob => Ok(ObjectBox::Blob(Box::new(Blob::deserialize(object_reader)?))),
            ObjectType::Commit => Ok(ObjectBox::Commit(Box::new(Commit::deserialize(
                object_reader,
            )?))),
            ObjectType::Tree => anyhow::bail!("Trees are not stored as objects: {object_id}"),
        }
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        match self.parse_object(object_id)? {
            ObjectBox::Blob(blob) => Ok(*blob),
            ObjectBox::Commit(_) => anyhow::bail!("Object {object_id} is not a blob"),
        }
    }

    /// Load a commit, failing with `RevisionNotFound` when there is none under that ID.
    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        if !self.contains(object_id) {
            anyhow::bail!(RepositoryError::RevisionNotFound(object_id.to_string()));
        }

        match self.parse_object(object_id)? {
            ObjectBox::Commit(commit) => Ok(*commit),
            ObjectBox::Blob(_) => {
                anyhow::bail!(RepositoryError::RevisionNotFound(object_id.to_string()))
            }
        }
    }

    /// Whether `object_id` names a stored commit
    pub fn is_commit(&self, object_id: &ObjectId) -> bool {
        self.parse_object_as_commit(object_id).is_ok()
    }

    fn parse_object_as_bytes(
        &self,
        object_id: &ObjectId,
    ) -> anyhow::Result<(ObjectType, impl BufRead)> {
        let mut object_reader = Cursor::new(self.load(object_id)?);
        let object_type = ObjectType::parse_object_type(&mut object_reader)?;

        Ok((object_type, object_reader))
    }

    /// Snapshot recorded by a commit
    pub fn load_tree(&self, commit_oid: &ObjectId) -> anyhow::Result<Tree> {
        Tree::load(self, commit_oid)
    }

    pub fn write_manifest(
        &self,
        commit_oid: &ObjectId,
        dir: &Path,
        records: &[ManifestRecord],
    ) -> anyhow::Result<()> {
        write_json(&self.manifest_path(commit_oid, dir), records)
    }

    pub fn read_manifest(
        &self,
        commit_oid: &ObjectId,
        dir: &Path,
    ) -> anyhow::Result<Vec<ManifestRecord>> {
        let manifest_path = self.manifest_path(commit_oid, dir);

        if !manifest_path.is_file() {
            anyhow::bail!(RepositoryError::ObjectNotFound(format!(
                "tree {} of commit {}",
                dir.display(),
                commit_oid
            )));
        }

        read_json(&manifest_path)
    }

    fn manifest_path(&self, commit_oid: &ObjectId, dir: &Path) -> PathBuf {
        self.trees_path
            .join(commit_oid.as_ref())
            .join(dir)
            .join(MANIFEST_FILE)
    }

    /// Remove a commit object and its tree manifests. Blobs are left in place.
    pub fn delete_commit(&self, commit_oid: &ObjectId) -> anyhow::Result<()> {
        let object_path = self.path.join(commit_oid.to_path());
        if object_path.exists() {
            std::fs::remove_file(&object_path).context(format!(
                "Unable to delete object file {}",
                object_path.display()
            ))?;

            if let Some(shard) = object_path.parent()
                && shard.read_dir()?.next().is_none()
            {
                std::fs::remove_dir(shard)
                    .context(format!("Unable to remove directory {}", shard.display()))?;
            }
        }

        let tree_path = self.trees_path.join(commit_oid.as_ref());
        if tree_path.exists() {
            std::fs::remove_dir_all(&tree_path).context(format!(
                "Unable to delete tree directory {}",
                tree_path.display()
            ))?;
        }

        tracing::info!(oid = %commit_oid, "deleted commit");
        Ok(())
    }
}
