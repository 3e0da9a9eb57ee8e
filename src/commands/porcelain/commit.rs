use crate::areas::repository::Repository;
use crate::areas::staging::StagingArea;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::objects::commit::{Commit, load_timestamp_from_env};
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    pub async fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        let staging = self.staging();
        let mut staging = staging.lock().await;

        staging.rehydrate()?;

        let (commit_id, commit) = self.write_commit(&mut staging, message, None)?;
        staging.write_updates()?;

        writeln!(
            self.writer(),
            "[{} {}] {}",
            self.refs().current_branch()?,
            commit_id.to_short_oid(),
            commit.message()
        )?;

        Ok(())
    }

    /// Fold the staging area over HEAD into a new commit
    ///
    /// Stores the commit, advances HEAD and the current branch, and clears the
    /// staging area. Nothing is written when the message is empty or nothing
    /// is staged.
    pub(crate) fn write_commit(
        &self,
        staging: &mut StagingArea,
        message: &str,
        merge_parent: Option<ObjectId>,
    ) -> anyhow::Result<(ObjectId, Commit)> {
        if message.trim().is_empty() {
            return Err(RepositoryError::EmptyCommitMessage.into());
        }
        if staging.is_empty() {
            return Err(RepositoryError::NoChangesToCommit.into());
        }

        let (parent_oid, parent) = self.head_commit()?;
        let tracked = staging.apply_to(parent.tracked());

        let commit = Commit::new(
            message.to_string(),
            load_timestamp_from_env(),
            Some(parent_oid),
            tracked,
        );
        let commit = match merge_parent {
            Some(merge_parent) => commit.with_merge_parent(merge_parent),
            None => commit,
        };

        let commit_id = self.database().store(&commit)?;
        self.refs().advance_current_branch(&commit_id)?;
        staging.clear();

        Ok((commit_id, commit))
    }
}
