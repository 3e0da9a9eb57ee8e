//! Commit object
//!
//! Commits are immutable snapshots of the tracked files. They contain:
//! - The commit message and timestamp
//! - Up to two parent commit IDs (the second one only for merge commits)
//! - The tracked files, mapped by name to blob IDs
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! parent <parent-sha>
//! parent <merge-parent-sha>
//! timestamp <unix-seconds> <timezone>
//! file <blob-sha> <name>
//!
//! <commit message>
//! ```

use crate::artifacts::log::ParentLinks;
use crate::artifacts::objects::object::{Object, Packable, Unpackable, with_header};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::{BufRead, Read};

/// Environment variable overriding the timestamp of new commits
pub const COMMIT_DATE_ENV: &str = "GROVE_COMMIT_DATE";

/// Message of the root commit created by `init`
pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

/// Tracked files of a commit, mapped by file name to blob ID
pub type TrackedFiles = BTreeMap<String, ObjectId>;

pub type Timestamp = chrono::DateTime<chrono::FixedOffset>;

/// Load the timestamp for a new commit
///
/// Reads GROVE_COMMIT_DATE (RFC 2822 or `%Y-%m-%d %H:%M:%S %z`) and falls back
/// to the local clock when it is unset or unparsable.
pub fn load_timestamp_from_env() -> Timestamp {
    std::env::var(COMMIT_DATE_ENV)
        .ok()
        .and_then(|date_str| {
            chrono::DateTime::parse_from_rfc2822(&date_str)
                .or_else(|_| chrono::DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                .ok()
        })
        .unwrap_or_else(|| chrono::Local::now().fixed_offset())
}

/// Commit object
///
/// A node of the commit graph. `parent` is the mainline parent, `merge_parent`
/// is the merged-in branch tip and is only set on merge commits.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    message: String,
    timestamp: Timestamp,
    parent: Option<ObjectId>,
    merge_parent: Option<ObjectId>,
    tracked: TrackedFiles,
}

impl Commit {
    /// Create a new commit
    ///
    /// # Arguments
    ///
    /// * `message` - Commit message
    /// * `timestamp` - Commit time, truncated to whole seconds
    /// * `parent` - Mainline parent commit ID (None for the root commit)
    /// * `tracked` - Tracked file names mapped to blob IDs
    pub fn new(
        message: String,
        timestamp: Timestamp,
        parent: Option<ObjectId>,
        tracked: TrackedFiles,
    ) -> Self {
        let timestamp = chrono::DateTime::from_timestamp(timestamp.timestamp(), 0)
            .map(|utc| utc.with_timezone(timestamp.offset()))
            .unwrap_or(timestamp);

        Commit {
            message,
            timestamp,
            parent,
            merge_parent: None,
            tracked,
        }
    }

    /// Attach the merged-in parent
    ///
    /// Must happen before the object ID is computed, the ID covers both parents.
    pub fn with_merge_parent(mut self, merge_parent: ObjectId) -> Self {
        self.merge_parent = Some(merge_parent);
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn merge_parent(&self) -> Option<&ObjectId> {
        self.merge_parent.as_ref()
    }

    pub fn tracked(&self) -> &TrackedFiles {
        &self.tracked
    }

    /// Blob ID tracked under the given file name
    pub fn blob_for(&self, name: &str) -> Option<&ObjectId> {
        self.tracked.get(name)
    }

    pub fn tracks(&self, name: &str) -> bool {
        self.tracked.contains_key(name)
    }

    /// Check whether a file differs between two commits
    ///
    /// A file missing on one side only counts as different,
    /// a file missing on both sides does not.
    pub fn differs_from(&self, other: &Commit, name: &str) -> bool {
        self.blob_for(name) != other.blob_for(name)
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Mon Jan 1 12:34:56 2024 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    fn parse_timestamp(value: &str) -> anyhow::Result<Timestamp> {
        let (seconds, timezone) = value
            .split_once(' ')
            .context("Invalid commit object: invalid timestamp line")?;
        let seconds = seconds
            .parse::<i64>()
            .map_err(|_| anyhow::anyhow!("Invalid timestamp"))?;
        let offset = chrono::DateTime::parse_from_str(
            &format!("1970-01-01 00:00:00 {timezone}"),
            "%Y-%m-%d %H:%M:%S %z",
        )
        .map_err(|_| anyhow::anyhow!("Invalid timezone"))?
        .offset()
        .to_owned();

        chrono::DateTime::from_timestamp(seconds, 0)
            .map(|utc| utc.with_timezone(&offset))
            .ok_or_else(|| anyhow::anyhow!("Invalid timestamp"))
    }
}

impl ParentLinks for Commit {
    fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    fn merge_parent(&self) -> Option<&ObjectId> {
        self.merge_parent.as_ref()
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut object_content = vec![];

        for parent in self.parent.iter().chain(self.merge_parent.iter()) {
            object_content.push(format!("parent {}", parent.as_ref()));
        }
        object_content.push(format!(
            "timestamp {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        ));
        for (name, blob_oid) in &self.tracked {
            object_content.push(format!("file {} {}", blob_oid.as_ref(), name));
        }
        object_content.push(String::new());
        object_content.push(self.message.to_string());

        with_header(self.object_type(), object_content.join("\n").as_bytes())
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        let content = String::from_utf8(content)?;
        let mut lines = content.split('\n');

        // Parse all parent lines (there can be 0, 1 or 2 parents)
        let mut parents = Vec::new();
        let mut next_line = lines
            .next()
            .context("Invalid commit object: missing timestamp line")?;

        while let Some(parent_oid) = next_line.strip_prefix("parent ") {
            parents.push(ObjectId::try_parse(parent_oid.to_string())?);

            next_line = lines
                .next()
                .context("Invalid commit object: missing timestamp line")?;
        }
        if parents.len() > 2 {
            anyhow::bail!("Invalid commit object: more than two parents");
        }

        let timestamp = next_line
            .strip_prefix("timestamp ")
            .context("Invalid commit object: invalid timestamp line")?;
        let timestamp = Self::parse_timestamp(timestamp)?;

        let mut tracked = TrackedFiles::new();
        for line in lines.by_ref() {
            if line.is_empty() {
                break;
            }

            let (blob_oid, name) = line
                .strip_prefix("file ")
                .and_then(|entry| entry.split_once(' '))
                .context("Invalid commit object: invalid file line")?;
            tracked.insert(name.to_string(), ObjectId::try_parse(blob_oid.to_string())?);
        }

        let message = lines.collect::<Vec<&str>>().join("\n");

        let mut parents = parents.into_iter();
        let commit = Self::new(message, timestamp, parents.next(), tracked);

        Ok(match parents.next() {
            Some(merge_parent) => commit.with_merge_parent(merge_parent),
            None => commit,
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use rstest::{fixture, rstest};
    use std::io::Cursor;

    fn oid(seed: char) -> ObjectId {
        ObjectId::try_parse(seed.to_string().repeat(40)).unwrap()
    }

    #[fixture]
    fn timestamp() -> Timestamp {
        FixedOffset::west_opt(8 * 3600)
            .unwrap()
            .with_ymd_and_hms(2017, 11, 9, 20, 0, 5)
            .unwrap()
    }

    #[fixture]
    fn tracked() -> TrackedFiles {
        TrackedFiles::from([
            ("a.txt".to_string(), oid('a')),
            ("notes with spaces.md".to_string(), oid('b')),
        ])
    }

    #[rstest]
    fn test_identical_inputs_yield_identical_ids(timestamp: Timestamp, tracked: TrackedFiles) {
        let first = Commit::new("msg".into(), timestamp, Some(oid('c')), tracked.clone());
        let second = Commit::new("msg".into(), timestamp, Some(oid('c')), tracked);

        assert_eq!(first.object_id().unwrap(), second.object_id().unwrap());
    }

    #[rstest]
    fn test_changing_any_field_changes_the_id(timestamp: Timestamp, tracked: TrackedFiles) {
        let base = Commit::new("msg".into(), timestamp, Some(oid('c')), tracked.clone());
        let base_id = base.object_id().unwrap();

        let mut other_tracked = tracked.clone();
        other_tracked.insert("b.txt".to_string(), oid('d'));

        let variants = [
            Commit::new("other".into(), timestamp, Some(oid('c')), tracked.clone()),
            Commit::new(
                "msg".into(),
                timestamp + chrono::Duration::seconds(1),
                Some(oid('c')),
                tracked.clone(),
            ),
            Commit::new("msg".into(), timestamp, Some(oid('d')), tracked.clone()),
            Commit::new("msg".into(), timestamp, None, tracked.clone()),
            Commit::new("msg".into(), timestamp, Some(oid('c')), other_tracked),
            base.clone().with_merge_parent(oid('e')),
        ];

        for variant in variants {
            assert_ne!(variant.object_id().unwrap(), base_id, "{variant:?}");
        }
    }

    #[rstest]
    fn test_merge_commit_survives_storage_encoding(timestamp: Timestamp, tracked: TrackedFiles) {
        let commit = Commit::new(
            "Merged a into b.\nsecond line".into(),
            timestamp,
            Some(oid('c')),
            tracked,
        )
        .with_merge_parent(oid('d'));
        let mut reader = Cursor::new(commit.serialize().unwrap());

        ObjectType::parse_object_type(&mut reader).unwrap();
        let parsed = Commit::deserialize(reader).unwrap();

        pretty_assertions::assert_eq!(parsed, commit);
        assert_eq!(parsed.merge_parent(), Some(&oid('d')));
        assert_eq!(parsed.blob_for("notes with spaces.md"), Some(&oid('b')));
    }

    #[rstest]
    fn test_readable_timestamp(timestamp: Timestamp) {
        let commit = Commit::new("msg".into(), timestamp, None, TrackedFiles::new());

        assert_eq!(commit.readable_timestamp(), "Thu Nov 9 20:00:05 2017 -0800");
    }

    #[rstest]
    fn test_differs_from(timestamp: Timestamp, tracked: TrackedFiles) {
        let current = Commit::new("c".into(), timestamp, None, tracked.clone());
        let mut changed = tracked;
        changed.insert("a.txt".to_string(), oid('f'));
        let given = Commit::new("g".into(), timestamp, None, changed);

        assert!(current.differs_from(&given, "a.txt"));
        assert!(!current.differs_from(&given, "notes with spaces.md"));
        assert!(!current.differs_from(&given, "missing.txt"));
    }
}
