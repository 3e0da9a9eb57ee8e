//! Three-way merge between two branch tips
//!
//! - `split_point`: Finds the common ancestor used as the merge base
//! - `resolution`: Classifies every file into one of the three-way merge outcomes
//! - `conflict`: Synthesizes the content of conflicted files

pub mod conflict;
pub mod resolution;
pub mod split_point;
