//! References (branches, HEAD, current branch)
//!
//! References are plain text files naming a commit or a branch:
//!
//! - `HEAD`: ID of the currently checked-out commit
//! - `BRANCH`: name of the current branch
//! - `refs/heads/<name>`: ID of the branch tip (names may contain `/`)
//!
//! HEAD always equals the tip of the current branch once a command finishes.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;
use walkdir::WalkDir;

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// Name of the file holding the current branch name
pub const BRANCH_REF_NAME: &str = "BRANCH";

/// References manager
///
/// Every write takes an exclusive lock on the reference file.
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository state directory (typically `.grove`)
    path: Box<Path>,
}

impl Refs {
    pub fn read_head(&self) -> anyhow::Result<ObjectId> {
        let content = Self::read_ref_file(&self.head_path())?;
        ObjectId::try_parse(content).context("HEAD does not contain a valid commit ID")
    }

    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        self.update_ref_file(self.head_path(), oid.as_ref())
    }

    pub fn current_branch(&self) -> anyhow::Result<BranchName> {
        let content = Self::read_ref_file(&self.branch_path())?;
        BranchName::try_parse(content).context("BRANCH does not contain a valid branch name")
    }

    pub fn set_current_branch(&self, name: &BranchName) -> anyhow::Result<()> {
        self.update_ref_file(self.branch_path(), name.as_ref())
    }

    pub fn is_current_branch(&self, name: &BranchName) -> anyhow::Result<bool> {
        Ok(&self.current_branch()? == name)
    }

    pub fn branch_exists(&self, name: &BranchName) -> bool {
        self.branch_ref_path(name).is_file()
    }

    /// Tip of a branch, None if the branch does not exist
    pub fn read_branch(&self, name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.branch_ref_path(name);
        if !branch_path.is_file() {
            return Ok(None);
        }

        let content = Self::read_ref_file(&branch_path)?;
        Ok(Some(ObjectId::try_parse(content).with_context(|| {
            format!("branch {name} does not point to a valid commit ID")
        })?))
    }

    pub fn update_branch(&self, name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        self.update_ref_file(self.branch_ref_path(name), oid.as_ref())
    }

    /// Create a branch, refusing to overwrite an existing one
    ///
    /// Hierarchical names share the `refs/heads` tree, so `a` and `a/b` cannot
    /// both exist.
    pub fn create_branch(&self, name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        if self.branch_exists(name) {
            return Err(RepositoryError::BranchAlreadyExists.into());
        }

        if let Some(existing) = self.clashing_branch(name)? {
            return Err(RepositoryError::BranchNameConflict {
                name: name.to_string(),
                existing: existing.to_string(),
            }
            .into());
        }

        self.update_branch(name, oid)
    }

    /// Existing branch that is a path prefix of `name`, or nested under it
    fn clashing_branch(&self, name: &BranchName) -> anyhow::Result<Option<BranchName>> {
        let components = name.as_ref().split('/').collect::<Vec<_>>();
        for depth in 1..components.len() {
            let prefix = components[..depth].join("/");
            if self.heads_path().join(&prefix).is_file() {
                return Ok(Some(BranchName::try_parse(prefix)?));
            }
        }

        let nested_prefix = format!("{name}/");
        Ok(self
            .list_branches()?
            .into_iter()
            .find(|branch| branch.as_ref().starts_with(&nested_prefix)))
    }

    /// Delete a branch reference and return the commit it pointed to
    ///
    /// Only the pointer goes away, commits stay in the object database.
    pub fn delete_branch(&self, name: &BranchName) -> anyhow::Result<ObjectId> {
        let oid = self
            .read_branch(name)?
            .ok_or(RepositoryError::BranchDoesNotExist)?;
        let branch_path = self.branch_ref_path(name);

        std::fs::remove_file(&branch_path)
            .with_context(|| format!("failed to delete branch file at {branch_path:?}"))?;
        self.prune_branch_empty_parent_dirs(&branch_path)?;

        Ok(oid)
    }

    /// All branch names in lexicographic order
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let heads_path = self.heads_path();
        if !heads_path.is_dir() {
            return Ok(Vec::new());
        }

        let mut branches = Vec::new();
        for entry in WalkDir::new(&heads_path).min_depth(1) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative_path = entry.path().strip_prefix(&heads_path)?;
            let name = relative_path
                .components()
                .map(|component| component.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            branches.push(BranchName::try_parse(name)?);
        }
        branches.sort();

        Ok(branches)
    }

    /// Move HEAD and the current branch tip to a new commit
    pub fn advance_current_branch(&self, oid: &ObjectId) -> anyhow::Result<()> {
        let branch = self.current_branch()?;

        self.update_branch(&branch, oid)?;
        self.update_head(oid)
    }

    fn update_ref_file(&self, path: Box<Path>, raw_ref: &str) -> anyhow::Result<()> {
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!("failed to create parent directories for ref file at {path:?}")
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .with_context(|| format!("failed to open ref file at {path:?}"))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    fn read_ref_file(path: &Path) -> anyhow::Result<String> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read ref file at {path:?}"))?;

        Ok(content.trim().to_string())
    }

    fn prune_branch_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.heads_path().as_ref()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent).with_context(|| {
                format!("failed to remove empty branch directory at {parent:?}")
            })?;
            self.prune_branch_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    fn branch_ref_path(&self, name: &BranchName) -> Box<Path> {
        self.heads_path().join(name.as_ref()).into_boxed_path()
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn branch_path(&self) -> Box<Path> {
        self.path.join(BRANCH_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }
}
