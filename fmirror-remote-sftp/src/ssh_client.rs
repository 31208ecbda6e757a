use crate::utils::fingerprint_allowed;
use russh::client::Handler;
use russh::keys::PublicKeyBase64;
use tracing::{info, warn};

pub(crate) struct Client {
    pub allowed_fingerprints: Option<Vec<String>>, // OpenSSH SHA256 or raw base64 keys
}

impl Handler for Client {
    type Error = anyhow::Error;

    async fn check_server_key(
        &mut self,
        server_public_key: &russh::keys::PublicKey,
    ) -> Result<bool, Self::Error> {
        let fp_sha256 = server_public_key
            .fingerprint(russh::keys::HashAlg::Sha256)
            .to_string();
        match &self.allowed_fingerprints {
            Some(allowed) => {
                let key_b64 = server_public_key.public_key_base64();
                let ok = fingerprint_allowed(allowed, &fp_sha256, &key_b64);
                if ok {
                    info!("server key fp sha256: {}", fp_sha256);
                } else {
                    warn!("server key {} is not in the allowed list", fp_sha256);
                }
                Ok(ok)
            }
            None => {
                warn!(
                    "server key {} accepted without verification, pin it with SFTP_FINGERPRINTS",
                    fp_sha256
                );
                Ok(true)
            }
        }
    }
}
