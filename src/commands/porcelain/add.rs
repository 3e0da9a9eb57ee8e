use crate::areas::repository::Repository;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::objects::object::Object;

impl Repository {
    pub async fn add(&mut self, name: &str) -> anyhow::Result<()> {
        let staging = self.staging();
        let mut staging = staging.lock().await;

        staging.rehydrate()?;

        if !self.workspace().file_exists(name) {
            return Err(RepositoryError::FileNotFound.into());
        }

        let (_, head_commit) = self.head_commit()?;
        let blob = self.workspace().parse_blob(name)?;
        let blob_id = blob.object_id()?;

        if head_commit.blob_for(name) == Some(&blob_id) {
            // back to the committed version: nothing left to stage
            staging.unstage_addition(name);
            staging.unstage_removal(name);
        } else {
            self.database().store(&blob)?;
            staging.stage_addition(name, blob_id);
        }

        staging.write_updates()?;

        Ok(())
    }
}
