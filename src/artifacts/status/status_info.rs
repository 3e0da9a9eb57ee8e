use crate::areas::repository::Repository;
use crate::areas::staging::StagingArea;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use crate::artifacts::status::inspector::Inspector;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};

pub type ChangeSet = BTreeMap<String, WorkspaceChangeType>;
pub type FileSet = BTreeSet<String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub(crate) branches: Vec<BranchName>,
    pub(crate) current_branch: BranchName,
    pub(crate) staged_files: FileSet,
    pub(crate) removed_files: FileSet,
    pub(crate) workspace_changeset: ChangeSet,
    pub(crate) untracked_files: FileSet,
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    pub fn initialize(&self, staging: &StagingArea) -> anyhow::Result<StatusInfo> {
        let (_, head_commit) = self.repository.head_commit()?;
        let inspector = Inspector::new(self.repository);

        let mut workspace_changeset = ChangeSet::new();

        // staged content that no longer matches the working tree
        for (name, staged_oid) in staging.additions() {
            if let Some(change) = inspector.check_against_workspace(name, staged_oid)? {
                workspace_changeset.insert(name.clone(), change);
            }
        }

        // committed content changed without staging
        for (name, head_oid) in head_commit.tracked() {
            if staging.is_staged_for_addition(name) || staging.is_staged_for_removal(name) {
                continue;
            }

            if let Some(change) = inspector.check_against_workspace(name, head_oid)? {
                workspace_changeset.insert(name.clone(), change);
            }
        }

        let untracked_files = self
            .repository
            .workspace()
            .list_files()?
            .into_iter()
            .filter(|name| {
                staging.is_staged_for_removal(name)
                    || (!staging.is_staged_for_addition(name) && !head_commit.tracks(name))
            })
            .collect::<FileSet>();

        Ok(StatusInfo {
            branches: self.repository.refs().list_branches()?,
            current_branch: self.repository.refs().current_branch()?,
            staged_files: staging.additions().keys().cloned().collect(),
            removed_files: staging.removals().keys().cloned().collect(),
            workspace_changeset,
            untracked_files,
        })
    }
}
