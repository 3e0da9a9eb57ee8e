//! User-facing precondition errors
//!
//! These errors abort an operation before it changes any repository state.
//! They are ordinary outcomes for the caller: the binary prints the message
//! and exits successfully. Anything else surfacing as an `anyhow::Error`
//! (I/O failures, corrupt objects, a commit graph without a split point) is
//! an internal failure and aborts loudly.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The working directory has no `.grove` directory.
    NotInitialized,
    /// `init` ran inside an existing repository.
    AlreadyInitialized,
    /// The named file is not in the working directory.
    FileNotFound,
    /// The file is neither staged for addition nor tracked by HEAD.
    NothingToRemove,
    /// `commit` was called with nothing staged.
    NoChangesToCommit,
    /// `commit` was called with an empty message.
    EmptyCommitMessage,
    /// `find` matched no commit.
    NoCommitWithMessage,
    /// The commit does not track the requested file.
    FileNotInCommit,
    /// No stored commit matches the given id or prefix.
    CommitNotFound,
    /// The abbreviated id matches several stored commits.
    AmbiguousCommitId { prefix: String, matches: usize },
    /// `checkout` was given a branch that does not exist.
    NoSuchBranch,
    /// `rm-branch` or `merge` was given a branch that does not exist.
    BranchDoesNotExist,
    /// `branch` was given the name of an existing branch.
    BranchAlreadyExists,
    /// The branch name nests under, or would contain, an existing branch.
    BranchNameConflict { name: String, existing: String },
    /// The branch name does not follow the reference naming rules.
    InvalidBranchName(String),
    /// `checkout` was given the current branch.
    AlreadyOnBranch,
    /// `rm-branch` was given the current branch.
    CannotRemoveCurrentBranch,
    /// An untracked working tree file would be overwritten.
    UntrackedFileInTheWay,
    /// `merge` was called with a non-empty staging area.
    UncommittedChanges,
    /// `merge` was given the current branch.
    MergeWithSelf,
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryError::NotInitialized => {
                write!(f, "Not in an initialized grove directory.")
            }
            RepositoryError::AlreadyInitialized => write!(
                f,
                "A grove version-control system already exists in the current directory."
            ),
            RepositoryError::FileNotFound => write!(f, "File does not exist."),
            RepositoryError::NothingToRemove => write!(f, "No reason to remove the file."),
            RepositoryError::NoChangesToCommit => write!(f, "No changes added to the commit."),
            RepositoryError::EmptyCommitMessage => write!(f, "Please enter a commit message."),
            RepositoryError::NoCommitWithMessage => {
                write!(f, "Found no commit with that message.")
            }
            RepositoryError::FileNotInCommit => write!(f, "File does not exist in that commit."),
            RepositoryError::CommitNotFound => write!(f, "No commit with that id exists."),
            RepositoryError::AmbiguousCommitId { prefix, matches } => write!(
                f,
                "Commit id {prefix} is ambiguous: it matches {matches} commits."
            ),
            RepositoryError::NoSuchBranch => write!(f, "No such branch exists."),
            RepositoryError::BranchDoesNotExist => {
                write!(f, "A branch with that name does not exist.")
            }
            RepositoryError::BranchAlreadyExists => {
                write!(f, "A branch with that name already exists.")
            }
            RepositoryError::BranchNameConflict { name, existing } => write!(
                f,
                "Cannot create branch {name}: it clashes with the existing branch {existing}."
            ),
            RepositoryError::InvalidBranchName(name) => write!(f, "Invalid branch name: {name}"),
            RepositoryError::AlreadyOnBranch => {
                write!(f, "No need to checkout the current branch.")
            }
            RepositoryError::CannotRemoveCurrentBranch => {
                write!(f, "Cannot remove the current branch.")
            }
            RepositoryError::UntrackedFileInTheWay => write!(
                f,
                "There is an untracked file in the way; delete it, or add and commit it first."
            ),
            RepositoryError::UncommittedChanges => write!(f, "You have uncommitted changes."),
            RepositoryError::MergeWithSelf => write!(f, "Cannot merge a branch with itself."),
        }
    }
}

impl std::error::Error for RepositoryError {}

/// Check whether an error is a user-facing precondition failure
pub fn as_repository_error(error: &anyhow::Error) -> Option<&RepositoryError> {
    error.downcast_ref::<RepositoryError>()
}
