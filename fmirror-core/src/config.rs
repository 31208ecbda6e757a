use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ENV_HOST: &str = "SFTP_HOST";
pub const ENV_PORT: &str = "SFTP_PORT";
pub const ENV_USER: &str = "SFTP_USER";
pub const ENV_REMOTE_PATHS: &str = "REMOTE_PATHS";
pub const ENV_LOCAL_PATHS: &str = "LOCAL_PATHS";
pub const ENV_KEY: &str = "SFTP_KEY";
pub const ENV_KEY_PASSPHRASE: &str = "SFTP_KEY_PASSPHRASE";
pub const ENV_PASSWORD: &str = "SFTP_PASSWORD";
pub const ENV_FINGERPRINTS: &str = "SFTP_FINGERPRINTS";
pub const ENV_TIMEOUT: &str = "SFTP_TIMEOUT";

/// Key file used when `SFTP_KEY` is not set, relative to `$HOME/.ssh`.
pub const DEFAULT_KEY_NAME: &str = "id_rsa";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("not found {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
    #[error("REMOTE_PATHS entry {index} is empty")]
    EmptyRemotePath { index: usize },
    #[error("LOCAL_PATHS has {locals} entries but REMOTE_PATHS has only {remotes}")]
    TooManyLocalPaths { locals: usize, remotes: usize },
    #[error("no home directory to resolve the default key path, set SFTP_KEY")]
    NoHomeDir,
    #[error("key file does not exist: {}", .0.display())]
    KeyNotFound(PathBuf),
    #[error("no folders configured")]
    NoFolders,
}

/// One mirrored tree: everything under `remote` is copied into `local`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncFolder {
    pub remote: String,
    #[serde(default = "SyncFolder::default_local")]
    pub local: PathBuf,
}

impl SyncFolder {
    pub fn new(remote: impl Into<String>, local: impl Into<PathBuf>) -> Self {
        Self {
            remote: remote.into(),
            local: local.into(),
        }
    }

    fn default_local() -> PathBuf {
        PathBuf::from(".")
    }
}

/// How the transport authenticates. The core never looks at this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AuthCfg {
    Key {
        path: PathBuf,
        #[serde(default)]
        passphrase: Option<String>,
    },
    Password {
        password: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MirrorConfig {
    pub host: String,
    #[serde(default = "MirrorConfig::default_port")]
    pub port: u16,
    pub user: String,
    pub auth: AuthCfg,
    /// Allowed host key fingerprints (OpenSSH SHA256 form or base64 key).
    #[serde(default)]
    pub fingerprints: Option<Vec<String>>,
    #[serde(default = "MirrorConfig::default_timeout_secs")]
    pub timeout_secs: u64,
    pub folders: Vec<SyncFolder>,
}

impl MirrorConfig {
    fn default_port() -> u16 { 22 }
    fn default_timeout_secs() -> u64 { 3 }

    /// Build the configuration from environment-style variables.
    ///
    /// `lookup` resolves a variable name, `home` is used for the default key
    /// location. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F, home: Option<&Path>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let host = get(ENV_HOST).ok_or(ConfigError::Missing(ENV_HOST))?;
        let user = get(ENV_USER).ok_or(ConfigError::Missing(ENV_USER))?;
        let remotes = get(ENV_REMOTE_PATHS).ok_or(ConfigError::Missing(ENV_REMOTE_PATHS))?;
        let folders = parse_folders(&remotes, lookup(ENV_LOCAL_PATHS).as_deref())?;

        let port = match get(ENV_PORT) {
            Some(v) => parse_number(ENV_PORT, &v)?,
            None => Self::default_port(),
        };
        let timeout_secs = match get(ENV_TIMEOUT) {
            Some(v) => parse_number(ENV_TIMEOUT, &v)?,
            None => Self::default_timeout_secs(),
        };

        let auth = match (get(ENV_PASSWORD), get(ENV_KEY)) {
            (Some(password), None) => AuthCfg::Password { password },
            (_, key) => {
                let path = match key {
                    Some(k) => PathBuf::from(k),
                    None => home
                        .ok_or(ConfigError::NoHomeDir)?
                        .join(".ssh")
                        .join(DEFAULT_KEY_NAME),
                };
                AuthCfg::Key {
                    path,
                    passphrase: get(ENV_KEY_PASSPHRASE),
                }
            }
        };

        let fingerprints = get(ENV_FINGERPRINTS)
            .map(|v| split_list(&v).map(str::to_string).filter(|s| !s.is_empty()).collect::<Vec<_>>())
            .filter(|v| !v.is_empty());

        Ok(Self {
            host,
            port,
            user,
            auth,
            fingerprints,
            timeout_secs,
            folders,
        })
    }

    /// Checks that must pass before any connection is attempted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.folders.is_empty() {
            return Err(ConfigError::NoFolders);
        }
        if let Some((index, _)) = self.folders.iter().enumerate().find(|(_, f)| f.remote.is_empty()) {
            return Err(ConfigError::EmptyRemotePath { index });
        }
        if let AuthCfg::Key { path, .. } = &self.auth {
            if !path.is_file() {
                return Err(ConfigError::KeyNotFound(path.clone()));
            }
        }
        Ok(())
    }
}

fn split_list(s: &str) -> impl Iterator<Item = &str> {
    s.split(',').map(str::trim)
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}

/// Pair each remote root with its local slot; a missing or empty slot means `.`.
fn parse_folders(remotes: &str, locals: Option<&str>) -> Result<Vec<SyncFolder>, ConfigError> {
    let mut folders = Vec::new();
    for (index, remote) in split_list(remotes).enumerate() {
        if remote.is_empty() {
            return Err(ConfigError::EmptyRemotePath { index });
        }
        folders.push(SyncFolder::new(remote, SyncFolder::default_local()));
    }

    if let Some(locals) = locals {
        let locals: Vec<&str> = split_list(locals).collect();
        if locals.len() > folders.len() {
            return Err(ConfigError::TooManyLocalPaths {
                locals: locals.len(),
                remotes: folders.len(),
            });
        }
        for (folder, local) in folders.iter_mut().zip(locals) {
            if !local.is_empty() {
                folder.local = PathBuf::from(local);
            }
        }
    }
    Ok(folders)
}
