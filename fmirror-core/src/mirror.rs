use crate::{
    compare::CopyPolicy,
    config::SyncFolder,
    copier::copy_remote_file,
    error::SyncError,
    local::{ensure_dir, stat_local},
    remote::RemoteFs,
    utils::{byte_count_iec, local_path, relative_path},
    walk::RemoteWalker,
};
use tracing::{debug, info, warn};

/// Counters for one folder walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderReport {
    pub files_copied: u64,
    pub files_skipped: u64,
    pub bytes_copied: u64,
    pub dirs_created: u64,
    pub listing_errors: u64,
}

/// Mirror one remote tree into its local root.
///
/// Listing errors only skip the affected entry. Any error while handling a
/// file, or while creating a directory, ends the walk and is returned.
pub async fn sync_folder<R, P>(
    remote: &R,
    policy: &P,
    folder: &SyncFolder,
) -> Result<FolderReport, SyncError>
where
    R: RemoteFs + ?Sized,
    P: CopyPolicy + ?Sized,
{
    let mut report = FolderReport::default();
    ensure_dir(&folder.local)
        .await
        .map_err(|source| SyncError::CreateDir {
            path: folder.local.clone(),
            source,
        })?;

    let mut walker = RemoteWalker::new(remote, &folder.remote);
    while let Some(step) = walker.step().await {
        let entry = match step.entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skip {}: {e:#}", step.path);
                report.listing_errors += 1;
                continue;
            }
        };

        let mut rel = relative_path(&entry.path, &folder.remote);
        if entry.is_dir {
            if rel.is_empty() {
                continue;
            }
            let dir = local_path(&folder.local, rel);
            let created = ensure_dir(&dir)
                .await
                .map_err(|source| SyncError::CreateDir { path: dir.clone(), source })?;
            if created {
                report.dirs_created += 1;
            }
            continue;
        }

        // the configured root is itself a file
        if rel.is_empty() {
            rel = entry.name();
        }
        let dest = local_path(&folder.local, rel);

        let file = remote
            .open(&entry.path)
            .await
            .map_err(|source| SyncError::OpenRemote {
                path: entry.path.clone(),
                source,
            })?;
        let state = stat_local(&dest)
            .await
            .map_err(|source| SyncError::LocalStat {
                path: dest.clone(),
                source,
            })?;

        if !policy.should_copy(&state, file.size) {
            debug!(
                "{} unchanged ({}), skip",
                entry.path,
                byte_count_iec(file.size)
            );
            report.files_skipped += 1;
            continue;
        }

        if state.exists {
            debug!(
                "{} size differs (local {}, remote {})",
                entry.path, state.size, file.size
            );
        } else {
            debug!("{} not present locally", dest.display());
        }
        info!("Copy {} ...", entry.path);
        let outcome = copy_remote_file(file, &entry.path, &dest).await?;
        info!("{} copied ({})", entry.path, byte_count_iec(outcome.bytes_copied));
        report.files_copied += 1;
        report.bytes_copied += outcome.bytes_copied;
    }

    Ok(report)
}
