//! Working tree status inspection
//!
//! Compares the working tree against the staging area and the HEAD commit.
//!
//! ## Components
//!
//! - `file_change`: Kinds of unstaged working tree changes
//! - `inspector`: Content comparison between working tree files and blobs
//! - `status_info`: Status report aggregation

pub mod file_change;
pub mod inspector;
pub mod status_info;
