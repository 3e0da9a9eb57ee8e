//! Split point finder for merge operations
//!
//! The split point is the common ancestor of the current and the given branch
//! tips that serves as the base of the three-way comparison.
//!
//! ## Algorithm
//!
//! 1. If both tips are the same commit, that commit is the split point.
//! 2. Collect every ancestor of the current tip with a full ancestor walk
//!    (both parent edges at every node, the tip itself included).
//! 3. Walk the given tip's primary-parent chain. At each commit, the commit
//!    itself wins if it is an ancestor of the current tip; otherwise its
//!    merged-in parent wins if that one is. The first hit is the split point.
//!
//! A walk that reaches the root without a hit means the two tips share no
//! history, which cannot happen in a repository grown from a single `init`.
//! It is reported as an error and never treated as a mergeable situation.
//!
//! ## Limitations
//!
//! The asymmetric walk returns *a* common ancestor, the first one met along
//! the given tip's mainline. With a single level of merges this is the lowest
//! common ancestor. In criss-cross histories with several merge levels it may
//! return an older ancestor than the best one.
//!
//! The merged-in parent is checked at every commit on the given tip's
//! mainline, not only at the given tip itself. A tip-only check would fall
//! back to an older fork point whenever the merge commit is not the tip;
//! both choices yield a common ancestor, and neither guarantees the lowest
//! one once merges nest.
//!
//! ## Debug Logging
//!
//! Build with `--features debug_merge` to trace the search on stderr.

use crate::artifacts::log::ParentLinks;
use crate::artifacts::log::ancestors::Ancestors;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::object_id::ObjectId;

/// Macro for debug logging that is enabled with the debug_merge feature flag
///
/// # Usage
/// ```rust,ignore
/// debug_log!("Processing commit {}", commit_id);
/// ```
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_merge")]
        {
            eprintln!($($arg)*);
        }
    };
}

/// Finds the split point between two commits
///
/// Takes a commit loader closure so the search runs over the object database
/// as well as over in-memory graphs.
///
/// # Type Parameters
///
/// * `CommitLoaderFn` - A function that takes an ObjectId reference and returns
///   the parent links of that commit.
pub struct SplitPointFinder<CommitLoaderFn> {
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn, C> SplitPointFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<C>,
    C: ParentLinks,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// Find the split point between the current and the given branch tips
    ///
    /// # Returns
    ///
    /// The split point commit ID, or an error if the tips share no ancestor
    /// or a commit on the way cannot be loaded.
    pub fn find_split_point(
        &self,
        current_oid: &ObjectId,
        given_oid: &ObjectId,
    ) -> anyhow::Result<ObjectId> {
        if current_oid == given_oid {
            debug_log!("Both tips are {}, split point is the tip", current_oid);
            return Ok(current_oid.clone());
        }

        let current_ancestors =
            Ancestors::new(&self.commit_loader, current_oid.clone()).into_set()?;

        debug_log!(
            "Current tip {} has {} ancestors",
            current_oid,
            current_ancestors.len()
        );

        for entry in RevList::new(&self.commit_loader, given_oid.clone()) {
            let (oid, commit) = entry?;
            debug_log!("Checking {} from the given tip's mainline", oid);

            if current_ancestors.contains(&oid) {
                debug_log!("Split point found: {}", oid);
                return Ok(oid);
            }

            if let Some(merge_parent) = commit.merge_parent()
                && current_ancestors.contains(merge_parent)
            {
                debug_log!("Split point found through merged-in parent: {}", merge_parent);
                return Ok(merge_parent.clone());
            }
        }

        anyhow::bail!(
            "no split point found between {} and {}: the commit graph is disconnected or corrupted",
            current_oid,
            given_oid
        )
    }
}
