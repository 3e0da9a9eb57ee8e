//! Branch names
//!
//! A branch is a named, movable pointer to a commit. Names may be
//! hierarchical (`feature/login`) and follow the git reference naming rules.

pub mod branch_name;

pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|\/\/|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";

/// Branch created by `init`
pub const DEFAULT_BRANCH_NAME: &str = "main";
