use std::path::{Path, PathBuf};

/// Join a remote directory and a child name with `/`.
pub fn join_remote(dir: &str, name: &str) -> String {
    let dir = dir.trim_end_matches('/');
    format!("{dir}/{name}")
}

/// Strip `root` from `path` and drop leading separators.
///
/// Returns the empty string for the root itself.
pub fn relative_path<'a>(path: &'a str, root: &str) -> &'a str {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.trim_start_matches('/')
}

/// Local counterpart of a `/`-separated relative path under `root`.
pub fn local_path(root: &Path, rel: &str) -> PathBuf {
    let mut out = root.to_path_buf();
    for part in rel.split('/').filter(|p| !p.is_empty() && *p != "." && *p != "..") {
        out.push(part);
    }
    out
}

/// Human readable byte count with 1024-based units and one decimal.
pub fn byte_count_iec(bytes: u64) -> String {
    const UNIT: u64 = 1024;
    if bytes < UNIT {
        return format!("{bytes} B");
    }
    let mut div = UNIT;
    let mut exp = 0;
    let mut n = bytes / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }
    let prefix = b"KMGTPE"[exp] as char;
    format!("{:.1} {prefix}B", bytes as f64 / div as f64)
}
