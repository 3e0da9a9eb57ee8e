use crate::areas::repository::Repository;
use crate::artifacts::core::error::RepositoryError;

impl Repository {
    pub async fn rm(&mut self, name: &str) -> anyhow::Result<()> {
        let staging = self.staging();
        let mut staging = staging.lock().await;

        staging.rehydrate()?;

        let (_, head_commit) = self.head_commit()?;
        let tracked_blob = head_commit.blob_for(name);

        if !staging.is_staged_for_addition(name) && tracked_blob.is_none() {
            return Err(RepositoryError::NothingToRemove.into());
        }

        staging.unstage_addition(name);

        if let Some(blob_oid) = tracked_blob {
            staging.stage_removal(name, blob_oid.clone());
            self.workspace().remove_file(name)?;
        }

        staging.write_updates()?;

        Ok(())
    }
}
