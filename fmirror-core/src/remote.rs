use anyhow::Result;
use async_trait::async_trait;
use std::fmt;
use std::pin::Pin;
use tokio::io::AsyncRead;

/// One node of the remote tree as reported by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    pub path: String,
    pub is_dir: bool,
    /// Byte length; zero for directories.
    pub size: u64,
}

impl RemoteEntry {
    pub fn dir(path: impl Into<String>) -> Self {
        Self { path: path.into(), is_dir: true, size: 0 }
    }

    pub fn file(path: impl Into<String>, size: u64) -> Self {
        Self { path: path.into(), is_dir: false, size }
    }

    /// Last path component.
    pub fn name(&self) -> &str {
        let trimmed = self.path.trim_end_matches('/');
        trimmed.rsplit('/').next().unwrap_or(trimmed)
    }
}

/// A remote file opened for reading, with the size seen at open time.
pub struct RemoteFile {
    pub size: u64,
    pub reader: Pin<Box<dyn AsyncRead + Send>>,
}

impl RemoteFile {
    pub fn new(size: u64, reader: impl AsyncRead + Send + 'static) -> Self {
        Self { size, reader: Box::pin(reader) }
    }
}

impl fmt::Debug for RemoteFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteFile").field("size", &self.size).finish_non_exhaustive()
    }
}

/// Read-only view of a remote filesystem, used strictly one call at a time.
#[async_trait]
pub trait RemoteFs: Send + Sync {
    /// Stat `path` without following a trailing symlink.
    async fn lstat(&self, path: &str) -> Result<RemoteEntry>;

    /// List the direct children of `path`, excluding `.` and `..`.
    async fn read_dir(&self, path: &str) -> Result<Vec<RemoteEntry>>;

    async fn open(&self, path: &str) -> Result<RemoteFile>;
}
