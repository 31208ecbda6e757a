use crate::{
    compare::{CopyPolicy, SizePolicy},
    config::SyncFolder,
    error::SyncError,
    mirror::{sync_folder, FolderReport},
    remote::RemoteFs,
    utils::byte_count_iec,
};
use tracing::{error, info};

/// Outcome of one configured folder.
#[derive(Debug)]
pub struct FolderOutcome {
    pub folder: SyncFolder,
    pub result: Result<FolderReport, SyncError>,
}

/// Outcome of a whole run, in configuration order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub folders: Vec<FolderOutcome>,
}

impl RunReport {
    pub fn failed(&self) -> usize {
        self.folders.iter().filter(|f| f.result.is_err()).count()
    }

    /// Sum of the counters of every folder that finished.
    pub fn totals(&self) -> FolderReport {
        self.folders
            .iter()
            .filter_map(|f| f.result.as_ref().ok())
            .fold(FolderReport::default(), |mut acc, r| {
                acc.files_copied += r.files_copied;
                acc.files_skipped += r.files_skipped;
                acc.bytes_copied += r.bytes_copied;
                acc.dirs_created += r.dirs_created;
                acc.listing_errors += r.listing_errors;
                acc
            })
    }
}

/// Runs the configured folders one after another against a single remote.
pub struct SyncManager<P: CopyPolicy = SizePolicy> {
    policy: P,
}

impl SyncManager<SizePolicy> {
    pub fn new() -> Self {
        Self { policy: SizePolicy }
    }
}

impl Default for SyncManager<SizePolicy> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: CopyPolicy> SyncManager<P> {
    pub fn with_policy(policy: P) -> Self {
        Self { policy }
    }

    /// Walk every folder in order. A failed folder is logged and the run goes on.
    pub async fn run<R>(&self, remote: &R, folders: &[SyncFolder]) -> RunReport
    where
        R: RemoteFs + ?Sized,
    {
        let mut report = RunReport::default();
        for folder in folders {
            info!("sync {} -> {}", folder.remote, folder.local.display());
            let result = sync_folder(remote, &self.policy, folder).await;
            match &result {
                Ok(r) => info!(
                    "{}: {} copied ({}), {} unchanged, {} skipped on error",
                    folder.remote,
                    r.files_copied,
                    byte_count_iec(r.bytes_copied),
                    r.files_skipped,
                    r.listing_errors
                ),
                Err(e) => error!("Error syncing {}: {e}", folder.remote),
            }
            report.folders.push(FolderOutcome {
                folder: folder.clone(),
                result,
            });
        }
        report
    }
}
