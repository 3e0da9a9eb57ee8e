use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::objects::commit::{
    Commit, INITIAL_COMMIT_MESSAGE, TrackedFiles, load_timestamp_from_env,
};
use anyhow::Context;
use std::fs;

impl Repository {
    pub async fn init(&mut self) -> anyhow::Result<()> {
        if self.is_initialized() {
            return Err(RepositoryError::AlreadyInitialized.into());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .grove/objects directory")?;
        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .grove/refs/heads directory")?;

        let staging = self.staging();
        let mut staging = staging.lock().await;
        fs::create_dir_all(staging.path()).context("Failed to create .grove/staging directory")?;
        staging.rehydrate()?;

        let root_commit = Commit::new(
            INITIAL_COMMIT_MESSAGE.to_string(),
            load_timestamp_from_env(),
            None,
            TrackedFiles::new(),
        );
        let root_oid = self.database().store(&root_commit)?;

        let default_branch = BranchName::default_branch();
        self.refs()
            .update_branch(&default_branch, &root_oid)
            .context("Failed to create the default branch")?;
        self.refs().set_current_branch(&default_branch)?;
        self.refs()
            .update_head(&root_oid)
            .context("Failed to create initial HEAD reference")?;

        writeln!(
            self.writer(),
            "Initialized empty grove repository in {}",
            self.path().display()
        )?;

        Ok(())
    }
}
