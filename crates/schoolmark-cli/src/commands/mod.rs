//! Subcommand implementations.

pub mod export;
pub mod init;
pub mod review;
pub mod schools;
pub mod users;
pub mod view;

use std::path::{Path, PathBuf};

use anyhow::Result;

use schoolmark_core::model::{School, SchoolId, User};
use schoolmark_core::repository::Repository;
use schoolmark_core::snapshot::Snapshot;

/// A loaded data file plus where to save it back.
///
/// Every subcommand opens one of these; mutating commands call [`save`]
/// once their operation succeeds, so the file on disk always holds the
/// last completed state.
///
/// [`save`]: Session::save
pub struct Session {
    pub repo: Repository,
    data_path: PathBuf,
}

impl Session {
    /// Load the data file, or start empty when none exists yet.
    pub fn open(data_path: &Path) -> Result<Self> {
        let mut repo = Repository::new();
        if data_path.exists() {
            Snapshot::load(data_path)?.restore(&mut repo);
        }
        Ok(Session {
            repo,
            data_path: data_path.to_path_buf(),
        })
    }

    /// Persist the current stores atomically.
    pub fn save(&self) -> Result<()> {
        Snapshot::capture(&self.repo).save(&self.data_path)
    }

    /// Resolve the acting user injected via `--user`.
    pub fn current_user(&self, username: Option<&str>) -> Result<User> {
        let name = username
            .ok_or_else(|| anyhow::anyhow!("this command needs --user <username>"))?;
        self.repo
            .user_by_name(name)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("unknown user '{name}'"))
    }

    /// Look up a school by its id argument.
    pub fn school(&self, raw: &str) -> Result<School> {
        let id = SchoolId::from(raw);
        self.repo
            .school_by_id(&id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no school with id {id}"))
    }
}
