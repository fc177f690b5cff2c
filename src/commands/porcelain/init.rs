use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::error::RepositoryError;
use anyhow::Context;
use std::fs;
use std::io::Write;

impl Repository {
    pub async fn init(&mut self) -> anyhow::Result<()> {
        if self.is_initialized() {
            anyhow::bail!(RepositoryError::RepositoryAlreadyInitialized(
                self.path().to_path_buf()
            ));
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .jot/objects directory")?;
        fs::create_dir_all(self.database().trees_path())
            .context("Failed to create .jot/trees directory")?;

        self.refs_mut()
            .set_head(Head::Branch(BranchName::default_branch()));

        let index = self.index();
        let index = index.lock().await;
        self.write_updates(&index)
            .context("Failed to create the initial ref table, index and stage")?;

        writeln!(
            self.writer(),
            "Initialized empty jot repository in {}",
            self.path().display()
        )?;

        Ok(())
    }
}
