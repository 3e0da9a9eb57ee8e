//! Core repository components
//!
//! This module contains the persistent building blocks of a grove repository:
//!
//! - `database`: Object database for storing blobs and commits
//! - `staging`: Staging area holding pending additions and removals
//! - `refs`: Branch pointers, HEAD and the current branch name
//! - `repository`: Repository context shared by every operation
//! - `workspace`: Working directory file system operations

pub mod database;
pub mod refs;
pub mod repository;
pub mod staging;
pub mod workspace;
