//! Builder for creating and configuring Repository instances.

use std::path::{Path, PathBuf};

use tokio::task;

use super::Repository;
use crate::{
    db::Database,
    error::{ConveyorError, Result},
};

/// Builder for creating and configuring Repository instances.
#[derive(Debug, Clone, Default)]
pub struct RepositoryBuilder {
    database_path: Option<PathBuf>,
}

impl RepositoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses the XDG data directory:
    /// `$XDG_DATA_HOME/conveyor/conveyor.db` or `~/.local/share/conveyor/conveyor.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Creates the database file and its schema if needed.
    ///
    /// # Errors
    ///
    /// Returns `ConveyorError::FileSystem` if the database directory cannot be
    /// created and `ConveyorError::Database` if schema initialization fails.
    pub async fn build(self) -> Result<Repository> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConveyorError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let init_path = db_path.clone();
        task::spawn_blocking(move || Database::new(&init_path).map(drop))
            .await
            .map_err(ConveyorError::join)??;

        Ok(Repository::new(db_path))
    }

    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("conveyor")
            .place_data_file("conveyor.db")
            .map_err(|e| ConveyorError::XdgDirectory(e.to_string()))
    }
}
