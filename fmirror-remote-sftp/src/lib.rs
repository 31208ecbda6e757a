mod ssh_client;
mod utils;

pub use crate::utils::split_host_port;

use crate::utils::to_entry;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use fmirror_core::utils::join_remote;
use fmirror_core::{AuthCfg, MirrorConfig, RemoteEntry, RemoteFile, RemoteFs};
use russh::client::{AuthResult, Handle};
use russh::keys::{load_secret_key, PrivateKeyWithHashAlg};
use russh::Disconnect;
use russh_sftp::client::SftpSession;
use ssh_client::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub struct SftpRemote {
    session: Handle<Client>,
    sftp: SftpSession,
}

impl SftpRemote {
    /// Dial, authenticate and start the `sftp` subsystem.
    pub async fn connect(cfg: &MirrorConfig) -> Result<Self> {
        let (host, port) = split_host_port(&cfg.host, cfg.port)?;

        let config = russh::client::Config::default();
        let handler = Client {
            allowed_fingerprints: cfg.fingerprints.clone(),
        };
        let dial = russh::client::connect(Arc::new(config), (host.as_str(), port), handler);
        let mut session = tokio::time::timeout(Duration::from_secs(cfg.timeout_secs), dial)
            .await
            .map_err(|_| anyhow!("connect to {host}:{port}: timed out after {}s", cfg.timeout_secs))?
            .with_context(|| format!("connect to {host}:{port}"))?;

        let res = match &cfg.auth {
            AuthCfg::Password { password } => {
                session
                    .authenticate_password(cfg.user.as_str(), password.as_str())
                    .await?
            }
            AuthCfg::Key { path, passphrase } => {
                let key = load_secret_key(path, passphrase.as_deref())
                    .with_context(|| format!("load private key {}", path.display()))?;
                let hash_alg = session.best_supported_rsa_hash().await?.flatten();
                session
                    .authenticate_publickey(
                        cfg.user.as_str(),
                        PrivateKeyWithHashAlg::new(Arc::new(key), hash_alg),
                    )
                    .await?
            }
        };
        if let AuthResult::Failure {
            remaining_methods,
            partial_success,
        } = res
        {
            return Err(anyhow!(
                "Authentication failed for {}, remaining_methods: {:?}, partial_success: {}",
                cfg.user,
                remaining_methods,
                partial_success
            ));
        }

        let channel = session.channel_open_session().await?;
        channel.request_subsystem(true, "sftp").await?;
        let sftp = SftpSession::new(channel.into_stream()).await?;
        info!("connected to {host}:{port}, current path: {:?}", sftp.canonicalize(".").await?);
        Ok(Self { session, sftp })
    }

    /// Close the SFTP session, then end the SSH session.
    pub async fn close(self) -> Result<()> {
        self.sftp.close().await.context("close sftp session")?;
        self.session
            .disconnect(Disconnect::ByApplication, "", "en")
            .await?;
        Ok(())
    }
}

#[async_trait]
impl RemoteFs for SftpRemote {
    async fn lstat(&self, path: &str) -> Result<RemoteEntry> {
        let attrs = self
            .sftp
            .symlink_metadata(path)
            .await
            .with_context(|| format!("lstat {path}"))?;
        Ok(to_entry(path.to_string(), &attrs))
    }

    async fn read_dir(&self, path: &str) -> Result<Vec<RemoteEntry>> {
        let entries = self
            .sftp
            .read_dir(path)
            .await
            .with_context(|| format!("read dir {path}"))?;
        let mut out = Vec::new();
        for entry in entries {
            let name = entry.file_name();
            if name == "." || name == ".." {
                continue;
            }
            out.push(to_entry(join_remote(path, &name), &entry.metadata()));
        }
        debug!("{path}: {} entries", out.len());
        Ok(out)
    }

    async fn open(&self, path: &str) -> Result<RemoteFile> {
        let file = self.sftp.open(path).await?;
        let size = file.metadata().await?.size.unwrap_or(0);
        Ok(RemoteFile::new(size, file))
    }
}
