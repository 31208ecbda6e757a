use crate::error::SyncError;
use crate::remote::RemoteFile;
use std::io;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncWriteExt};

/// Result of one successful file copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferOutcome {
    pub bytes_copied: u64,
}

/// Stream `file` into `local`, truncating whatever was there, and sync it to disk.
///
/// The destination is written in place: an interrupted copy leaves a partial file.
pub async fn copy_remote_file(
    mut file: RemoteFile,
    remote: &str,
    local: &Path,
) -> Result<TransferOutcome, SyncError> {
    let bytes_copied = write_synced(&mut file.reader, local)
        .await
        .map_err(|source| SyncError::Copy {
            remote: remote.to_string(),
            local: local.to_path_buf(),
            source,
        })?;
    Ok(TransferOutcome { bytes_copied })
}

async fn write_synced<R>(src: &mut R, dest: &Path) -> io::Result<u64>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut out = File::create(dest).await?;
    let bytes = tokio::io::copy(src, &mut out).await?;
    out.flush().await?;
    out.sync_all().await?;
    Ok(bytes)
}
