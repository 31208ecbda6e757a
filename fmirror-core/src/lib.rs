//! Core library for fmirror – one-way mirror of remote trees onto local storage.

mod compare;
mod config;
mod copier;
mod error;
mod local;
mod manager;
mod mirror;
mod remote;
mod walk;

pub mod utils;

pub use compare::{should_copy, CopyPolicy, SizePolicy};
pub use config::{AuthCfg, ConfigError, MirrorConfig, SyncFolder};
pub use config::{
    DEFAULT_KEY_NAME, ENV_FINGERPRINTS, ENV_HOST, ENV_KEY, ENV_KEY_PASSPHRASE, ENV_LOCAL_PATHS,
    ENV_PASSWORD, ENV_PORT, ENV_REMOTE_PATHS, ENV_TIMEOUT, ENV_USER,
};
pub use copier::{copy_remote_file, TransferOutcome};
pub use error::SyncError;
pub use local::{ensure_dir, stat_local, LocalFileState};
pub use manager::{FolderOutcome, RunReport, SyncManager};
pub use mirror::{sync_folder, FolderReport};
pub use remote::{RemoteEntry, RemoteFile, RemoteFs};
pub use walk::{RemoteWalker, WalkStep};
