use anyhow::{anyhow, Result};
use fmirror_core::RemoteEntry;
use russh_sftp::client::fs::Metadata;

/// Split `host[:port]`, falling back to `default_port`.
///
/// Bare IPv6 addresses are left alone; use `[addr]:port` to give them a port.
pub fn split_host_port(host_with_port: &str, default_port: u16) -> Result<(String, u16)> {
    if let Some(rest) = host_with_port.strip_prefix('[') {
        let (addr, tail) = rest
            .split_once(']')
            .ok_or_else(|| anyhow!("invalid host: {host_with_port}"))?;
        let port = match tail.strip_prefix(':') {
            Some(p) => parse_port(p, host_with_port)?,
            None if tail.is_empty() => default_port,
            None => return Err(anyhow!("invalid host: {host_with_port}")),
        };
        return Ok((addr.to_string(), port));
    }
    match host_with_port.rsplit_once(':') {
        Some((h, p)) if !h.contains(':') => Ok((h.to_string(), parse_port(p, host_with_port)?)),
        _ => Ok((host_with_port.to_string(), default_port)),
    }
}

fn parse_port(p: &str, host_with_port: &str) -> Result<u16> {
    p.parse()
        .map_err(|_| anyhow!("invalid port in host: {host_with_port}"))
}

pub(crate) fn to_entry(path: String, attrs: &Metadata) -> RemoteEntry {
    if attrs.is_dir() {
        RemoteEntry::dir(path)
    } else {
        RemoteEntry::file(path, attrs.size.unwrap_or(0))
    }
}

pub(crate) fn fingerprint_allowed(allowed: &[String], fp_sha256: &str, key_b64: &str) -> bool {
    allowed.iter().any(|s| s == fp_sha256 || s == key_b64)
}
