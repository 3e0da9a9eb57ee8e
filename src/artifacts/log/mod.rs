//! Commit graph traversal
//!
//! A commit is a node with at most two parent edges: the mainline `parent`
//! and, for merge commits only, the merged-in `merge_parent`. The graph is
//! walked in two distinct ways:
//!
//! - `rev_list`: Primary-parent walk following only `parent`, used for history listing
//! - `ancestors`: Full ancestor walk following both edges, used for ancestry queries
//!
//! Both walks load nodes lazily through a commit loader closure, so they run
//! over the object database as well as over in-memory graphs in tests.

use crate::artifacts::objects::object_id::ObjectId;

pub mod ancestors;
pub mod rev_list;

/// Parent edges of a commit graph node
pub trait ParentLinks {
    fn parent(&self) -> Option<&ObjectId>;

    fn merge_parent(&self) -> Option<&ObjectId>;

    fn parents(&self) -> impl Iterator<Item = &ObjectId> {
        self.parent().into_iter().chain(self.merge_parent())
    }
}

/// Parent links of a commit without its tracked files
///
/// Contains only what graph searches need, loaded once per visited commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlimCommit {
    pub oid: ObjectId,
    pub parent: Option<ObjectId>,
    pub merge_parent: Option<ObjectId>,
}

impl ParentLinks for SlimCommit {
    fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    fn merge_parent(&self) -> Option<&ObjectId> {
        self.merge_parent.as_ref()
    }
}
