//! grove object types and operations
//!
//! grove stores all content as immutable objects identified by SHA-1 hashes.
//! There are two object types:
//!
//! - **Blob**: A file snapshot (file name and raw bytes)
//! - **Commit**: A snapshot of tracked files with message, timestamp and up to two parents
//!
//! All objects implement serialization/deserialization for the object format:
//! `<type> <size>\0<content>`

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of the abbreviated form of an object ID
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;
