//! Local side of the mirror: directory creation and file state queries.

use std::io;
use std::path::Path;
use tokio::fs;

/// Observed state of a candidate local file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalFileState {
    pub exists: bool,
    pub size: u64,
}

impl LocalFileState {
    pub const MISSING: Self = Self { exists: false, size: 0 };

    pub fn present(size: u64) -> Self {
        Self { exists: true, size }
    }
}

/// Create `path` and any missing ancestors. No-op when it already exists.
///
/// Returns whether anything was created.
pub async fn ensure_dir(path: &Path) -> io::Result<bool> {
    if fs::metadata(path).await.is_ok() {
        return Ok(false);
    }
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(0o777);
    builder.create(path).await?;
    Ok(true)
}

/// Size of the file at `path`, or [`LocalFileState::MISSING`] if nothing is there.
pub async fn stat_local(path: &Path) -> io::Result<LocalFileState> {
    match fs::metadata(path).await {
        Ok(meta) => Ok(LocalFileState::present(meta.len())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(LocalFileState::MISSING),
        Err(e) => Err(e),
    }
}
