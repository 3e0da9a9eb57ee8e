use crate::areas::repository::Repository;

impl Repository {
    /// Check out an arbitrary commit and move the current branch to it
    pub async fn reset(&mut self, commit_id: &str) -> anyhow::Result<()> {
        let target_oid = self.database().resolve_commit(commit_id)?;

        let staging = self.staging();
        let mut staging = staging.lock().await;
        staging.rehydrate()?;

        self.checkout_commit(&mut staging, &target_oid)?;
        self.refs().advance_current_branch(&target_oid)?;

        staging.write_updates()?;

        Ok(())
    }
}
