//! Checkout of whole commits
//!
//! Switching the working tree to another commit (branch checkout, reset and
//! merge fast-forward) is planned before anything is touched:
//!
//! 1. Detect untracked working tree files the target commit would overwrite
//! 2. Plan the deletion of every working tree file
//! 3. Plan writing every file tracked by the target commit
//!
//! Any conflict from step 1 aborts the checkout with no change on disk.

pub mod migration;
