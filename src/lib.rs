//! grove: a minimal content-addressed version control engine
//!
//! - `areas`: persistent repository areas (object database, staging area, refs, workspace)
//! - `artifacts`: data structures and algorithms (objects, commit graph walks, merge, checkout)
//! - `commands`: user-facing operations implemented on top of the repository

pub mod areas;
pub mod artifacts;
pub mod commands;
