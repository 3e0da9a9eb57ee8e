use crate::areas::repository::Repository;
use crate::areas::staging::StagingArea;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// Restore a file from HEAD, leaving the staging area alone
    pub fn checkout_file(&self, name: &str) -> anyhow::Result<()> {
        let (_, head_commit) = self.head_commit()?;

        self.restore_file(&head_commit, name)
    }

    /// Restore a file from a commit given by full or abbreviated ID
    pub fn checkout_file_at(&self, commit_id: &str, name: &str) -> anyhow::Result<()> {
        let commit_oid = self.database().resolve_commit(commit_id)?;
        let commit = self.database().load_commit(&commit_oid)?;

        self.restore_file(&commit, name)
    }

    pub async fn checkout_branch(&mut self, branch: &str) -> anyhow::Result<()> {
        let branch =
            BranchName::try_parse(branch.to_string()).map_err(|_| RepositoryError::NoSuchBranch)?;

        if self.refs().is_current_branch(&branch)? {
            return Err(RepositoryError::AlreadyOnBranch.into());
        }

        let staging = self.staging();
        let mut staging = staging.lock().await;
        staging.rehydrate()?;

        self.switch_branch(&mut staging, &branch)?;
        staging.write_updates()?;

        Ok(())
    }

    /// Make `branch` the current branch and check out its tip
    pub(crate) fn switch_branch(
        &self,
        staging: &mut StagingArea,
        branch: &BranchName,
    ) -> anyhow::Result<()> {
        let target_oid = self
            .refs()
            .read_branch(branch)?
            .ok_or(RepositoryError::NoSuchBranch)?;

        self.checkout_commit(staging, &target_oid)?;
        self.refs().set_current_branch(branch)
    }

    /// Replace the working tree with the files of a commit and move HEAD to it
    ///
    /// Refused with no change at all when an untracked file would be
    /// overwritten. Clears the staging area on success.
    pub(crate) fn checkout_commit(
        &self,
        staging: &mut StagingArea,
        target_oid: &ObjectId,
    ) -> anyhow::Result<()> {
        let (_, current) = self.head_commit()?;
        let target = self.database().load_commit(target_oid)?;

        let mut migration = Migration::new(self, &current, &target);
        migration.apply_changes(staging)?;

        self.refs().update_head(target_oid)
    }

    fn restore_file(&self, commit: &Commit, name: &str) -> anyhow::Result<()> {
        let blob_oid = commit
            .blob_for(name)
            .ok_or(RepositoryError::FileNotInCommit)?;
        let content = self.database().blob_contents(blob_oid)?;

        self.workspace().write_file(name, &content)
    }
}
