use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure that ends the walk of one folder.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("create directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("stat local file {}: {source}", path.display())]
    LocalStat { path: PathBuf, source: io::Error },

    #[error("open remote file {path}: {source:#}")]
    OpenRemote { path: String, source: anyhow::Error },

    #[error("copy {remote} to {}: {source}", local.display())]
    Copy {
        remote: String,
        local: PathBuf,
        source: io::Error,
    },
}

impl SyncError {
    /// The remote or local path the failure is about.
    pub fn path(&self) -> String {
        match self {
            SyncError::CreateDir { path, .. } | SyncError::LocalStat { path, .. } => {
                path.display().to_string()
            }
            SyncError::OpenRemote { path, .. } => path.clone(),
            SyncError::Copy { remote, .. } => remote.clone(),
        }
    }
}
