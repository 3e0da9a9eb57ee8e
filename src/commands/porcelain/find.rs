use crate::areas::repository::Repository;
use crate::artifacts::core::error::RepositoryError;

impl Repository {
    /// Print the ID of every commit whose message is exactly `message`
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        let mut matches = Vec::new();

        for commit_oid in self.database().list_commits()? {
            if self.database().load_commit(&commit_oid)?.message() == message {
                matches.push(commit_oid);
            }
        }

        if matches.is_empty() {
            return Err(RepositoryError::NoCommitWithMessage.into());
        }

        for commit_oid in matches {
            writeln!(self.writer(), "{commit_oid}")?;
        }

        Ok(())
    }
}
