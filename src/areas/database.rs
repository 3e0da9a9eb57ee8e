//! Content-addressed object database
//!
//! Objects live under `.grove/objects/<kind>/<2 hex>/<38 hex>`, one directory
//! per object type. Files are written once: storing an object whose ID already
//! exists is a no-op, and new files appear through a temp file plus rename so
//! readers never observe a partially written object.

use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::log::SlimCommit;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{BufRead, Cursor, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Store an object and return its ID
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = self.path.join(object.object_path()?);

        if !object_path.exists() {
            std::fs::create_dir_all(
                object_path
                    .parent()
                    .context(format!("Invalid object path {}", object_path.display()))?,
            )
            .context(format!(
                "Unable to create object directory {}",
                object_path.display()
            ))?;

            self.write_object(object_path, object.serialize()?)?;
        }

        Ok(object_id)
    }

    pub fn load_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        let reader = self.parse_object_as_bytes(ObjectType::Blob, object_id)?;
        Blob::deserialize(reader)
    }

    /// Raw content of a stored blob
    pub fn blob_contents(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        Ok(self.load_blob(object_id)?.into_content())
    }

    pub fn blob_exists(&self, object_id: &ObjectId) -> bool {
        self.object_file(ObjectType::Blob, object_id).is_file()
    }

    pub fn load_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        let reader = self.parse_object_as_bytes(ObjectType::Commit, object_id)?;
        Commit::deserialize(reader)
    }

    /// Parent links of a stored commit, for graph walks
    pub fn load_slim_commit(&self, object_id: &ObjectId) -> anyhow::Result<SlimCommit> {
        let commit = self.load_commit(object_id)?;

        Ok(SlimCommit {
            oid: object_id.clone(),
            parent: commit.parent().cloned(),
            merge_parent: commit.merge_parent().cloned(),
        })
    }

    pub fn commit_exists(&self, object_id: &ObjectId) -> bool {
        self.object_file(ObjectType::Commit, object_id).is_file()
    }

    /// Resolve a full or abbreviated commit ID
    ///
    /// Fails with `CommitNotFound` when nothing matches (or the input is not
    /// hex at all) and with `AmbiguousCommitId` when several commits match.
    pub fn resolve_commit(&self, prefix: &str) -> anyhow::Result<ObjectId> {
        if !ObjectId::is_valid_prefix(prefix) {
            return Err(RepositoryError::CommitNotFound.into());
        }

        let mut matches = self.find_commits_by_prefix(prefix)?;
        match matches.len() {
            0 => Err(RepositoryError::CommitNotFound.into()),
            1 => Ok(matches.remove(0)),
            count => Err(RepositoryError::AmbiguousCommitId {
                prefix: prefix.to_string(),
                matches: count,
            }
            .into()),
        }
    }

    /// Find all commits whose ID starts with the given prefix
    ///
    /// Prefixes of two or more characters only scan their fanout directory.
    pub fn find_commits_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let prefix = prefix.to_ascii_lowercase();

        if prefix.len() >= 2 {
            let dir_name = &prefix[..2];
            let file_prefix = &prefix[2..];
            let dir_path = self.kind_path(ObjectType::Commit).join(dir_name);

            if !dir_path.is_dir() {
                return Ok(Vec::new());
            }

            let mut matches = Vec::new();
            for entry in std::fs::read_dir(&dir_path)? {
                let file_name = entry?.file_name();
                let file_name = file_name.to_string_lossy();

                if file_name.starts_with(file_prefix)
                    && let Ok(oid) = ObjectId::try_parse(format!("{dir_name}{file_name}"))
                {
                    matches.push(oid);
                }
            }
            matches.sort();

            Ok(matches)
        } else {
            Ok(self
                .list_commits()?
                .into_iter()
                .filter(|oid| oid.starts_with(&prefix))
                .collect())
        }
    }

    /// Every stored commit ID, in ascending order
    pub fn list_commits(&self) -> anyhow::Result<Vec<ObjectId>> {
        let commits_path = self.kind_path(ObjectType::Commit);
        if !commits_path.is_dir() {
            return Ok(Vec::new());
        }

        let mut commits = Vec::new();
        for entry in WalkDir::new(&commits_path).min_depth(2).max_depth(2) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let dir_name = entry
                .path()
                .parent()
                .and_then(Path::file_name)
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_default();
            let file_name = entry.file_name().to_string_lossy();

            // temp files of interrupted writes are not objects
            if let Ok(oid) = ObjectId::try_parse(format!("{dir_name}{file_name}")) {
                commits.push(oid);
            }
        }
        commits.sort();

        Ok(commits)
    }

    fn kind_path(&self, object_type: ObjectType) -> PathBuf {
        self.path.join(object_type.dir_name())
    }

    fn object_file(&self, object_type: ObjectType, object_id: &ObjectId) -> PathBuf {
        self.kind_path(object_type).join(object_id.to_path())
    }

    fn parse_object_as_bytes(
        &self,
        expected_type: ObjectType,
        object_id: &ObjectId,
    ) -> anyhow::Result<impl BufRead> {
        let object_path = self.object_file(expected_type, object_id);
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;
        let mut object_reader = Cursor::new(Bytes::from(object_content));

        let object_type = ObjectType::parse_object_type(&mut object_reader)?;
        if object_type != expected_type {
            anyhow::bail!(
                "Object {} is a {}, expected a {}",
                object_id,
                object_type,
                expected_type
            );
        }

        Ok(object_reader)
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;
        file.sync_all()?;

        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
