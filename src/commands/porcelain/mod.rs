//! Porcelain commands (user-facing operations)
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository with a root commit on `main`
//! - `add`: Stage a file for the next commit
//! - `rm`: Unstage a file or stage its removal
//! - `commit`: Fold the staging area into a new commit
//! - `log`: Show the primary-parent history of HEAD, or every commit
//! - `find`: Find commits by message
//! - `status`: Show branches, staged changes and working tree changes
//! - `checkout`: Restore files or switch branches
//! - `branch`: Create or delete branches
//! - `reset`: Move the current branch to an arbitrary commit
//! - `merge`: Three-way merge of another branch into the current one

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod find;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
