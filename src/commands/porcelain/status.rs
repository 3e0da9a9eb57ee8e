use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::StatusInfo;
use colored::Colorize;

impl Repository {
    pub async fn status(&mut self) -> anyhow::Result<()> {
        let staging = self.staging();
        let mut staging = staging.lock().await;
        staging.rehydrate()?;

        let status_info = self.inspect_status().initialize(&staging)?;

        self.print_branches(&status_info)?;
        self.print_section("Staged Files", status_info.staged_files.iter())?;
        self.print_section("Removed Files", status_info.removed_files.iter())?;
        self.print_section(
            "Modifications Not Staged For Commit",
            status_info
                .workspace_changeset
                .iter()
                .map(|(name, change)| format!("{name} {change}")),
        )?;
        self.print_section("Untracked Files", status_info.untracked_files.iter())?;

        Ok(())
    }

    fn print_branches(&self, status_info: &StatusInfo) -> anyhow::Result<()> {
        writeln!(self.writer(), "=== Branches ===")?;

        for branch in &status_info.branches {
            if branch == &status_info.current_branch {
                writeln!(self.writer(), "{}", format!("*{branch}").green())?;
            } else {
                writeln!(self.writer(), "{branch}")?;
            }
        }

        Ok(())
    }

    fn print_section(
        &self,
        title: &str,
        entries: impl Iterator<Item = impl std::fmt::Display>,
    ) -> anyhow::Result<()> {
        writeln!(self.writer())?;
        writeln!(self.writer(), "=== {title} ===")?;

        for entry in entries {
            writeln!(self.writer(), "{entry}")?;
        }

        Ok(())
    }
}
