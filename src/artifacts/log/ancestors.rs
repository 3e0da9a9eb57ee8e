use crate::artifacts::log::ParentLinks;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{HashSet, VecDeque};

/// Full ancestor walk
///
/// Visits the start commit and every commit reachable from it through either
/// parent edge, each exactly once, in breadth-first order. Unlike `RevList`
/// this walk enters merged-in histories.
pub struct Ancestors<CommitLoaderFn> {
    commit_loader: CommitLoaderFn,
    queue: VecDeque<ObjectId>,
    visited: HashSet<ObjectId>,
}

impl<CommitLoaderFn, C> Ancestors<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<C>,
    C: ParentLinks,
{
    pub fn new(commit_loader: CommitLoaderFn, start_oid: ObjectId) -> Self {
        Self {
            commit_loader,
            queue: VecDeque::from([start_oid.clone()]),
            visited: HashSet::from([start_oid]),
        }
    }

    /// Drain the walk into the set of all visited commit IDs
    pub fn into_set(self) -> anyhow::Result<HashSet<ObjectId>> {
        self.collect()
    }
}

impl<CommitLoaderFn, C> Iterator for Ancestors<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<C>,
    C: ParentLinks,
{
    type Item = anyhow::Result<ObjectId>;

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.queue.pop_front()?;

        let commit = match (self.commit_loader)(&commit_oid) {
            Ok(commit) => commit,
            Err(err) => {
                self.queue.clear();
                return Some(Err(err));
            }
        };

        for parent in commit.parents() {
            if self.visited.insert(parent.clone()) {
                self.queue.push_back(parent.clone());
            }
        }

        Some(Ok(commit_oid))
    }
}
