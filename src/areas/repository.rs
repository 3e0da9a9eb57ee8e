use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::staging::StagingArea;
use crate::areas::workspace::Workspace;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::status_info::Status;
use std::cell::{RefCell, RefMut};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Name of the repository state directory
pub const GROVE_DIR: &str = ".grove";

/// Repository context
///
/// Bundles the working tree root with every persistent area. Each command
/// runs against one `Repository` value, nothing is kept in global state.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    staging: Arc<Mutex<StagingArea>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path).canonicalize()?;
        let grove_path = path.join(GROVE_DIR);

        let staging = StagingArea::new(grove_path.join("staging").into_boxed_path());
        let database = Database::new(grove_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(grove_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            staging: Arc::new(Mutex::new(staging)),
            database,
            workspace,
            refs,
        })
    }

    /// Open an existing repository
    ///
    /// Fails with `NotInitialized` when the directory holds no `.grove` state.
    pub fn open(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let repository = Self::new(path, writer)?;

        if !repository.is_initialized() {
            return Err(RepositoryError::NotInitialized.into());
        }

        Ok(repository)
    }

    pub fn is_initialized(&self) -> bool {
        self.grove_path().is_dir()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn grove_path(&self) -> Box<Path> {
        self.path.join(GROVE_DIR).into_boxed_path()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn staging(&self) -> Arc<Mutex<StagingArea>> {
        self.staging.clone()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn inspect_status(&'_ self) -> Status<'_> {
        Status::new(self)
    }

    /// The commit HEAD points to, along with its ID
    pub fn head_commit(&self) -> anyhow::Result<(ObjectId, Commit)> {
        let head_oid = self.refs.read_head()?;
        let commit = self.database.load_commit(&head_oid)?;

        Ok((head_oid, commit))
    }
}
