use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use derive_new::new;

#[derive(new)]
pub struct Inspector<'r> {
    repository: &'r Repository,
}

impl<'r> Inspector<'r> {
    /// Blob ID the working tree file would get if it were added now
    pub fn workspace_blob_id(&self, name: &str) -> anyhow::Result<ObjectId> {
        self.repository.workspace().parse_blob(name)?.object_id()
    }

    /// Compare a working tree file against a known blob
    ///
    /// # Returns
    ///
    /// None when the file exists with exactly that content
    pub fn check_against_workspace(
        &self,
        name: &str,
        blob_oid: &ObjectId,
    ) -> anyhow::Result<Option<WorkspaceChangeType>> {
        if !self.repository.workspace().file_exists(name) {
            return Ok(Some(WorkspaceChangeType::Deleted));
        }

        if &self.workspace_blob_id(name)? != blob_oid {
            Ok(Some(WorkspaceChangeType::Modified))
        } else {
            Ok(None)
        }
    }
}
