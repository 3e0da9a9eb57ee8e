use crate::areas::repository::GROVE_DIR;
use crate::artifacts::checkout::migration::{ActionType, Migration};
use crate::artifacts::objects::blob::Blob;
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Working tree
///
/// Only plain files directly under the root take part in version control.
/// Subdirectories (and the `.grove` state directory) are ignored.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a user-supplied name can denote a working tree file
    pub fn is_valid_name(name: &str) -> bool {
        !name.is_empty()
            && name != "."
            && name != ".."
            && name != GROVE_DIR
            && !name.contains(['/', '\\', '\n', '\0'])
    }

    /// Names of all plain files in the working tree, in name order
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.path).min_depth(1).max_depth(1) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_string();
            if Self::is_valid_name(&name) {
                files.push(name);
            }
        }
        files.sort();

        Ok(files)
    }

    pub fn file_exists(&self, name: &str) -> bool {
        Self::is_valid_name(name) && self.file_path(name).is_file()
    }

    pub fn read_file(&self, name: &str) -> anyhow::Result<Bytes> {
        let file_path = self.file_path(name);
        let content = std::fs::read(&file_path)
            .with_context(|| format!("Failed to read file: {file_path:?}"))?;

        Ok(content.into())
    }

    /// Snapshot a working tree file as a blob
    pub fn parse_blob(&self, name: &str) -> anyhow::Result<Blob> {
        Ok(Blob::new(name.to_string(), self.read_file(name)?))
    }

    pub fn write_file(&self, name: &str, content: &[u8]) -> anyhow::Result<()> {
        let file_path = self.file_path(name);

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&file_path)
            .with_context(|| format!("Failed to open file: {file_path:?}"))?;
        file.write_all(content)
            .with_context(|| format!("Failed to write to file: {file_path:?}"))?;

        Ok(())
    }

    /// Delete a working tree file, a missing file is not an error
    pub fn remove_file(&self, name: &str) -> anyhow::Result<()> {
        let file_path = self.file_path(name);

        if file_path.is_file() {
            std::fs::remove_file(&file_path)
                .with_context(|| format!("Failed to remove file: {file_path:?}"))?;
        }

        Ok(())
    }

    // Deletions run before writes: a file deleted and rewritten ends up with the new content
    pub fn apply_migration(&self, migration: &Migration) -> anyhow::Result<()> {
        for name in migration.actions(ActionType::Delete) {
            self.remove_file(name)?;
        }

        for name in migration.actions(ActionType::Write) {
            let content = migration.load_blob_data(name)?;
            self.write_file(name, &content)?;
        }

        Ok(())
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}
