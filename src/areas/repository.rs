use crate::JOT_DIR;
use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::merge_state::MergeJournal;
use crate::areas::refs::Refs;
use crate::areas::stage::Stage;
use crate::areas::states::StatusCache;
use crate::areas::workspace::Workspace;
use crate::artifacts::status::file_status::FileStatus;
use crate::artifacts::status::inspector::Inspector;
use crate::artifacts::status::status_info::StatusInfo;
use crate::error::RepositoryError;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Everything one command invocation works with.
///
/// Built once per command; `rehydrate` loads the ref table and the stage, the
/// index is loaded by each command while it holds the index lock.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: Arc<Mutex<Index>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
    stage: Stage,
    merge_journal: MergeJournal,
    status_cache: StatusCache,
}

impl Repository {
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(path)
                .context(format!("Unable to create directory {}", path.display()))?;
        }
        let path = path
            .canonicalize()
            .context(format!("Unable to resolve {}", path.display()))?;
        let jot_path = path.join(JOT_DIR);

        Ok(Repository {
            writer: RefCell::new(writer),
            index: Arc::new(Mutex::new(Index::new(
                jot_path.join("index").into_boxed_path(),
            ))),
            database: Database::new(
                jot_path.join("objects").into_boxed_path(),
                jot_path.join("trees").into_boxed_path(),
            ),
            workspace: Workspace::new(path.clone().into_boxed_path()),
            refs: Refs::new(jot_path.join("refs").into_boxed_path()),
            stage: Stage::new(jot_path.join("stage").into_boxed_path()),
            merge_journal: MergeJournal::new(
                jot_path.join("merge").into_boxed_path(),
                jot_path.join("conflicts").into_boxed_path(),
            ),
            status_cache: StatusCache::new(jot_path.join("states").into_boxed_path()),
            path: path.into_boxed_path(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn jot_path(&self) -> PathBuf {
        self.path.join(JOT_DIR)
    }

    pub fn is_initialized(&self) -> bool {
        self.jot_path().is_dir()
    }

    /// Load the ref table and the stage, failing outside a repository.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        if !self.is_initialized() {
            anyhow::bail!(RepositoryError::NotARepository(self.path.to_path_buf()));
        }

        self.refs.rehydrate()?;
        self.stage.rehydrate()?;
        Ok(())
    }

    /// Persist the ref table, the stage and the given index.
    pub fn write_updates(&self, index: &Index) -> anyhow::Result<()> {
        index.write_updates()?;
        self.stage.write_updates()?;
        self.refs.write_updates()
    }

    pub fn ensure_not_merging(&self) -> anyhow::Result<()> {
        if self.merge_journal.is_merging() {
            anyhow::bail!(RepositoryError::RepositoryInMergingState);
        }
        Ok(())
    }

    /// Classify the work tree and remember the result in the status cache.
    pub fn inspect(&mut self, index: &mut Index) -> anyhow::Result<StatusInfo> {
        let status = Inspector::new(&self.workspace, index, &mut self.stage).inspect()?;
        self.status_cache.save(status.states())?;

        Ok(status)
    }

    /// Statuses from the last `inspect`, without looking at the work tree.
    pub fn cached_status(&self) -> anyhow::Result<BTreeMap<PathBuf, FileStatus>> {
        self.status_cache.load()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> Arc<Mutex<Index>> {
        self.index.clone()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn refs_mut(&mut self) -> &mut Refs {
        &mut self.refs
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    pub fn merge_journal(&self) -> &MergeJournal {
        &self.merge_journal
    }

    /// Split borrow for the movement engine, which needs the store, the work
    /// tree and the stage at once.
    pub fn movement_parts(&mut self) -> (&Database, &Workspace, &mut Stage) {
        (&self.database, &self.workspace, &mut self.stage)
    }
}
