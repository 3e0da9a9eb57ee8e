//! Staging area
//!
//! Holds the changes that the next commit applies on top of HEAD:
//!
//! - additions: file name mapped to the blob ID of the staged content
//! - removals: file name mapped to the blob ID HEAD tracks for it
//!
//! A name is never staged for addition and removal at the same time.
//!
//! ## Layout
//!
//! ```text
//! .grove/staging/add/<name>   (blob ID)
//! .grove/staging/rm/<name>    (blob ID)
//! ```
//!
//! The in-memory state is loaded with `rehydrate` at the start of a command
//! and persisted with `write_updates` at its end.

use crate::artifacts::objects::commit::TrackedFiles;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use file_guard::Lock;
use std::collections::BTreeMap;
use std::io::Write;
use std::ops::DerefMut;
use std::path::{Path, PathBuf};

const ADDITIONS_DIR: &str = "add";
const REMOVALS_DIR: &str = "rm";

#[derive(Debug, Clone)]
pub struct StagingArea {
    /// Path to the staging directory (typically `.grove/staging`)
    path: Box<Path>,
    additions: BTreeMap<String, ObjectId>,
    removals: BTreeMap<String, ObjectId>,
    /// Whether the in-memory state diverged from disk since loading
    changed: bool,
}

impl StagingArea {
    pub fn new(path: Box<Path>) -> Self {
        StagingArea {
            path,
            additions: BTreeMap::new(),
            removals: BTreeMap::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the staging area from disk
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.additions = Self::read_entries(&self.additions_path())?;
        self.removals = Self::read_entries(&self.removals_path())?;
        self.changed = false;

        Ok(())
    }

    /// Persist pending changes, if any
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if !self.changed {
            return Ok(());
        }

        Self::write_entries(&self.additions_path(), &self.additions)?;
        Self::write_entries(&self.removals_path(), &self.removals)?;
        self.changed = false;

        Ok(())
    }

    pub fn clear(&mut self) {
        if !self.is_empty() {
            self.changed = true;
        }
        self.additions.clear();
        self.removals.clear();
    }

    pub fn stage_addition(&mut self, name: &str, blob_oid: ObjectId) {
        self.removals.remove(name);
        self.additions.insert(name.to_string(), blob_oid);
        self.changed = true;
    }

    pub fn stage_removal(&mut self, name: &str, blob_oid: ObjectId) {
        self.additions.remove(name);
        self.removals.insert(name.to_string(), blob_oid);
        self.changed = true;
    }

    /// Drop a staged addition, returning whether one existed
    pub fn unstage_addition(&mut self, name: &str) -> bool {
        let existed = self.additions.remove(name).is_some();
        self.changed |= existed;
        existed
    }

    /// Drop a staged removal, returning whether one existed
    pub fn unstage_removal(&mut self, name: &str) -> bool {
        let existed = self.removals.remove(name).is_some();
        self.changed |= existed;
        existed
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    pub fn additions(&self) -> &BTreeMap<String, ObjectId> {
        &self.additions
    }

    pub fn removals(&self) -> &BTreeMap<String, ObjectId> {
        &self.removals
    }

    pub fn is_staged_for_addition(&self, name: &str) -> bool {
        self.additions.contains_key(name)
    }

    pub fn is_staged_for_removal(&self, name: &str) -> bool {
        self.removals.contains_key(name)
    }

    /// Tracked files of a commit built from the given parent snapshot
    pub fn apply_to(&self, tracked: &TrackedFiles) -> TrackedFiles {
        let mut next = tracked.clone();

        for (name, blob_oid) in &self.additions {
            next.insert(name.clone(), blob_oid.clone());
        }
        for name in self.removals.keys() {
            next.remove(name);
        }

        next
    }

    fn additions_path(&self) -> PathBuf {
        self.path.join(ADDITIONS_DIR)
    }

    fn removals_path(&self) -> PathBuf {
        self.path.join(REMOVALS_DIR)
    }

    fn read_entries(dir: &Path) -> anyhow::Result<BTreeMap<String, ObjectId>> {
        let mut entries = BTreeMap::new();
        if !dir.is_dir() {
            return Ok(entries);
        }

        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_string();
            let content = std::fs::read_to_string(entry.path())
                .with_context(|| format!("failed to read staging entry {:?}", entry.path()))?;
            let blob_oid = ObjectId::try_parse(content.trim().to_string())
                .with_context(|| format!("corrupt staging entry {:?}", entry.path()))?;

            entries.insert(name, blob_oid);
        }

        Ok(entries)
    }

    fn write_entries(dir: &Path, entries: &BTreeMap<String, ObjectId>) -> anyhow::Result<()> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create staging directory {dir:?}"))?;

        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if !entries.contains_key(&name) {
                std::fs::remove_file(entry.path()).with_context(|| {
                    format!("failed to remove staging entry {:?}", entry.path())
                })?;
            }
        }

        for (name, blob_oid) in entries {
            let entry_path = dir.join(name);
            let mut entry_file = std::fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&entry_path)
                .with_context(|| format!("failed to open staging entry {entry_path:?}"))?;
            let mut lock = file_guard::lock(&mut entry_file, Lock::Exclusive, 0, 1)?;
            lock.deref_mut().write_all(blob_oid.as_ref().as_bytes())?;
        }

        Ok(())
    }
}
