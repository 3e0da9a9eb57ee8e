use crate::artifacts::log::ParentLinks;
use crate::artifacts::objects::object_id::ObjectId;

/// Primary-parent history walk
///
/// Yields the start commit and then follows `parent` edges only, until the
/// root commit has been yielded. Merged-in parents are never visited.
/// The walk is lazy: each commit is loaded when the iterator reaches it.
#[derive(Clone)]
pub struct RevList<CommitLoaderFn> {
    commit_loader: CommitLoaderFn,
    start_oid: ObjectId,
    current_commit_oid: Option<ObjectId>,
}

impl<CommitLoaderFn, C> RevList<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<C>,
    C: ParentLinks,
{
    pub fn new(commit_loader: CommitLoaderFn, start_oid: ObjectId) -> Self {
        Self {
            commit_loader,
            current_commit_oid: Some(start_oid.clone()),
            start_oid,
        }
    }

    /// Rewind the walk to its start commit
    pub fn restart(&mut self) {
        self.current_commit_oid = Some(self.start_oid.clone());
    }
}

impl<CommitLoaderFn, C> Iterator for RevList<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<C>,
    C: ParentLinks,
{
    type Item = anyhow::Result<(ObjectId, C)>;

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.current_commit_oid.take()?;

        match (self.commit_loader)(&commit_oid) {
            Ok(commit) => {
                // Move to the parent commit for the next iteration
                self.current_commit_oid = commit.parent().cloned();
                Some(Ok((commit_oid, commit)))
            }
            // a commit that cannot be loaded ends the iteration
            Err(err) => Some(Err(err)),
        }
    }
}
