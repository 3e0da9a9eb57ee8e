use crate::areas::repository::Repository;
use crate::areas::staging::StagingArea;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::merge::conflict::conflict_content;
use crate::artifacts::merge::resolution::{FileVersions, MergeRule, merge_candidates};
use crate::artifacts::merge::split_point::SplitPointFinder;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;

/// How a merge was resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The given branch tip is already in the current history, nothing changed
    AncestorOfCurrent,
    /// The current tip is an ancestor of the given tip, the given branch was checked out
    FastForwarded,
    /// A merge commit with both tips as parents was created
    Merged { commit: ObjectId, conflicted: bool },
}

impl Repository {
    pub async fn merge(&mut self, branch: &str) -> anyhow::Result<MergeOutcome> {
        let staging = self.staging();
        let mut staging = staging.lock().await;
        staging.rehydrate()?;

        if !staging.is_empty() {
            return Err(RepositoryError::UncommittedChanges.into());
        }

        let current_branch = self.refs().current_branch()?;
        if branch == current_branch.as_ref() {
            return Err(RepositoryError::MergeWithSelf.into());
        }

        let given_branch = BranchName::try_parse(branch.to_string())
            .map_err(|_| RepositoryError::BranchDoesNotExist)?;
        let given_oid = self
            .refs()
            .read_branch(&given_branch)?
            .ok_or(RepositoryError::BranchDoesNotExist)?;

        let (current_oid, current) = self.head_commit()?;
        let given = self.database().load_commit(&given_oid)?;

        let mut migration = Migration::new(self, &current, &given);
        migration.plan_changes()?;
        if !migration.conflicts().is_empty() {
            return Err(RepositoryError::UntrackedFileInTheWay.into());
        }

        let split_oid = SplitPointFinder::new(|oid: &ObjectId| self.database().load_slim_commit(oid))
            .find_split_point(&current_oid, &given_oid)?;

        let outcome = if split_oid == given_oid {
            MergeOutcome::AncestorOfCurrent
        } else if split_oid == current_oid {
            self.switch_branch(&mut staging, &given_branch)?;
            MergeOutcome::FastForwarded
        } else {
            let split = self.database().load_commit(&split_oid)?;
            let conflicted = self.merge_files(&mut staging, &split, &current, &given)?;

            let message = format!("Merged {given_branch} into {current_branch}.");
            let (commit, _) = self.write_commit(&mut staging, &message, Some(given_oid))?;

            MergeOutcome::Merged { commit, conflicted }
        };

        staging.write_updates()?;

        match &outcome {
            MergeOutcome::AncestorOfCurrent => writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?,
            MergeOutcome::FastForwarded => {
                writeln!(self.writer(), "Current branch fast-forwarded.")?
            }
            MergeOutcome::Merged {
                conflicted: true, ..
            } => writeln!(self.writer(), "Encountered a merge conflict.")?,
            MergeOutcome::Merged { .. } => {}
        }

        Ok(outcome)
    }

    /// Apply the three-way decision to every file of the merge
    ///
    /// Updates the working tree and stages the results.
    ///
    /// # Returns
    ///
    /// Whether any file ended up with conflict markers
    fn merge_files(
        &self,
        staging: &mut StagingArea,
        split: &Commit,
        current: &Commit,
        given: &Commit,
    ) -> anyhow::Result<bool> {
        let mut conflicted = false;

        for name in merge_candidates(split, current, given) {
            let versions = FileVersions::of(&name, split, current, given);

            match MergeRule::classify(&versions) {
                rule if rule.takes_given() => {
                    let blob_oid = versions
                        .given
                        .with_context(|| format!("{name} is missing from the given commit"))?;
                    let content = self.database().blob_contents(blob_oid)?;

                    self.workspace().write_file(&name, &content)?;
                    staging.stage_addition(&name, blob_oid.clone());
                }
                MergeRule::DeletedInGiven => {
                    if let Some(blob_oid) = versions.current {
                        staging.stage_removal(&name, blob_oid.clone());
                    }
                    self.workspace().remove_file(&name)?;
                }
                MergeRule::Conflict => {
                    let current_content = versions
                        .current
                        .map(|oid| self.database().blob_contents(oid))
                        .transpose()?;
                    let given_content = versions
                        .given
                        .map(|oid| self.database().blob_contents(oid))
                        .transpose()?;
                    let content =
                        conflict_content(current_content.as_deref(), given_content.as_deref());

                    self.workspace().write_file(&name, &content)?;
                    let blob_oid = self.database().store(&Blob::new(name.clone(), content))?;
                    staging.stage_addition(&name, blob_oid);

                    conflicted = true;
                }
                _ => {}
            }
        }

        Ok(conflicted)
    }
}
