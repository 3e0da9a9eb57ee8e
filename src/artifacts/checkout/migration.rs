use crate::areas::repository::Repository;
use crate::areas::staging::StagingArea;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::objects::commit::Commit;
use anyhow::Context;
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};

/// Type of file system action required for checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActionType {
    /// Delete a working tree file
    Delete,
    /// Write a file tracked by the target commit
    Write,
}

/// Planned file names grouped by action
pub type ActionsSet = BTreeMap<ActionType, BTreeSet<String>>;

/// Checkout migration planner and executor
///
/// Moves the working tree from the `current` commit to the `target` commit.
pub struct Migration<'r> {
    repository: &'r Repository,
    current: &'r Commit,
    target: &'r Commit,
    actions: ActionsSet,
    /// Untracked files the target commit would overwrite
    conflicts: BTreeSet<String>,
}

impl<'r> Migration<'r> {
    pub fn new(repository: &'r Repository, current: &'r Commit, target: &'r Commit) -> Self {
        let actions = BTreeMap::from([
            (ActionType::Delete, BTreeSet::new()),
            (ActionType::Write, BTreeSet::new()),
        ]);

        Self {
            repository,
            current,
            target,
            actions,
            conflicts: BTreeSet::new(),
        }
    }

    pub fn actions(&self, action: ActionType) -> impl Iterator<Item = &String> {
        self.actions.get(&action).into_iter().flatten()
    }

    pub fn conflicts(&self) -> &BTreeSet<String> {
        &self.conflicts
    }

    /// Plan the checkout and refuse it when untracked files are in the way
    ///
    /// On success the working tree matches the target commit and the staging
    /// area is empty. HEAD is left to the caller.
    pub fn apply_changes(&mut self, staging: &mut StagingArea) -> anyhow::Result<()> {
        self.plan_changes()?;

        if !self.conflicts.is_empty() {
            return Err(RepositoryError::UntrackedFileInTheWay.into());
        }

        self.repository.workspace().apply_migration(self)?;
        staging.clear();

        Ok(())
    }

    pub fn plan_changes(&mut self) -> anyhow::Result<()> {
        self.conflicts.clear();
        self.actions.values_mut().for_each(BTreeSet::clear);

        for name in self.repository.workspace().list_files()? {
            if !self.current.tracks(&name) && self.target.tracks(&name) {
                self.conflicts.insert(name.clone());
            }

            self.actions
                .entry(ActionType::Delete)
                .or_default()
                .insert(name);
        }

        for name in self.target.tracked().keys() {
            self.actions
                .entry(ActionType::Write)
                .or_default()
                .insert(name.clone());
        }

        Ok(())
    }

    pub fn load_blob_data(&self, name: &str) -> anyhow::Result<Bytes> {
        let blob_oid = self
            .target
            .blob_for(name)
            .with_context(|| format!("file {name} is not tracked by the checkout target"))?;

        self.repository.database().blob_contents(blob_oid)
    }
}
