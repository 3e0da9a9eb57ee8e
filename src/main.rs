use anyhow::Result;
use clap::{Parser, Subcommand};
use grove::areas::repository::Repository;
use grove::artifacts::core::PagerWriter;
use grove::artifacts::core::error::as_repository_error;
use is_terminal::IsTerminal;
use minus::Pager;

#[derive(Parser)]
#[command(
    name = "grove",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A minimal version-control system",
    long_about = "grove snapshots plain files of a directory into content-addressed \
    commits, and supports branches and three-way merges between them.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command creates a .grove directory in the current directory, \
        with a root commit on the main branch."
    )]
    Init,
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1, help = "The file to stage")]
        file: String,
    },
    #[command(
        name = "commit",
        about = "Create a new commit from the staged changes",
        long_about = "This command folds the staged additions and removals over the HEAD \
        commit and records the result as a new commit on the current branch."
    )]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: String,
    },
    #[command(name = "rm", about = "Unstage a file or stage its removal")]
    Rm {
        #[arg(index = 1, help = "The file to remove")]
        file: String,
    },
    #[command(name = "log", about = "Show the history of the current commit")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(name = "find", about = "Print the IDs of the commits with the given message")]
    Find {
        #[arg(index = 1, help = "The exact commit message")]
        message: String,
    },
    #[command(name = "status", about = "Show the working tree status")]
    Status,
    #[command(
        name = "checkout",
        about = "Restore a file or switch branches",
        long_about = "grove checkout -- <file> restores a file from HEAD, \
        grove checkout <commit> -- <file> restores it from the given commit, \
        grove checkout <branch> switches to the given branch."
    )]
    Checkout {
        #[arg(index = 1, help = "The branch to switch to, or the commit to restore from")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "The file to restore")]
        file: Option<String>,
    },
    #[command(name = "branch", about = "Create a new branch at HEAD")]
    Branch {
        #[arg(index = 1, help = "The name of the new branch")]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch")]
    RmBranch {
        #[arg(index = 1, help = "The branch to delete")]
        name: String,
    },
    #[command(
        name = "reset",
        about = "Check out a commit and move the current branch to it"
    )]
    Reset {
        #[arg(index = 1, help = "The full or abbreviated commit ID")]
        commit_id: String,
    },
    #[command(name = "merge", about = "Merge the given branch into the current branch")]
    Merge {
        #[arg(index = 1, help = "The branch to merge")]
        branch: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    match run(&cli.command).await {
        Ok(()) => Ok(()),
        Err(error) => match as_repository_error(&error) {
            Some(repository_error) => {
                println!("{repository_error}");
                Ok(())
            }
            None => Err(error),
        },
    }
}

async fn run(command: &Commands) -> Result<()> {
    let pwd = std::env::current_dir()?;
    let pwd = pwd.to_string_lossy();

    match command {
        Commands::Init => {
            let mut repository = Repository::new(&pwd, Box::new(std::io::stdout()))?;
            repository.init().await?
        }
        Commands::Add { file } => open(&pwd)?.add(file).await?,
        Commands::Commit { message } => open(&pwd)?.commit(message).await?,
        Commands::Rm { file } => open(&pwd)?.rm(file).await?,
        Commands::Log => with_pager(&pwd, |repository| repository.log())?,
        Commands::GlobalLog => with_pager(&pwd, |repository| repository.global_log())?,
        Commands::Find { message } => open(&pwd)?.find(message)?,
        Commands::Status => open(&pwd)?.status().await?,
        Commands::Checkout { target, file } => match (target, file) {
            (None, Some(file)) => open(&pwd)?.checkout_file(file)?,
            (Some(commit_id), Some(file)) => open(&pwd)?.checkout_file_at(commit_id, file)?,
            (Some(branch), None) => open(&pwd)?.checkout_branch(branch).await?,
            (None, None) => anyhow::bail!("Incorrect operands."),
        },
        Commands::Branch { name } => open(&pwd)?.branch(name)?,
        Commands::RmBranch { name } => open(&pwd)?.rm_branch(name)?,
        Commands::Reset { commit_id } => open(&pwd)?.reset(commit_id).await?,
        Commands::Merge { branch } => {
            open(&pwd)?.merge(branch).await?;
        }
    }

    Ok(())
}

fn open(pwd: &str) -> Result<Repository> {
    Repository::open(pwd, Box::new(std::io::stdout()))
}

/// Run a history command, paging its output when stdout is a terminal
fn with_pager(pwd: &str, command: impl FnOnce(&Repository) -> Result<()>) -> Result<()> {
    let use_pager = std::io::stdout().is_terminal() && std::env::var_os("NO_PAGER").is_none();

    if !use_pager {
        return command(&open(pwd)?);
    }

    let pager = Pager::new();
    let repository = Repository::open(pwd, Box::new(PagerWriter::new(pager.clone())))?;
    command(&repository)?;

    minus::page_all(pager)?;

    Ok(())
}
