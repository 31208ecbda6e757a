//! In-memory remote tree for driving the engine without a server.

#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use fmirror_core::utils::join_remote;
use fmirror_core::{RemoteEntry, RemoteFile, RemoteFs};
use std::collections::{BTreeMap, HashSet};
use std::io::Cursor;
use std::path::Path;
use std::sync::Mutex;
use walkdir::WalkDir;

#[derive(Debug, Clone)]
enum Node {
    Dir,
    File(Vec<u8>),
}

#[derive(Default)]
pub struct MemRemote {
    nodes: Mutex<BTreeMap<String, Node>>,
    fail_list: Mutex<HashSet<String>>,
    fail_open: Mutex<HashSet<String>>,
    opened: Mutex<Vec<String>>,
}

impl MemRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory and its missing ancestors.
    pub fn dir(&self, path: &str) -> &Self {
        let mut nodes = self.nodes.lock().unwrap();
        let mut cur = String::new();
        for part in path.split('/').filter(|p| !p.is_empty()) {
            cur = join_remote(&cur, part);
            nodes.insert(cur.clone(), Node::Dir);
        }
        self
    }

    /// Add or replace a file, creating its parent directories.
    pub fn file(&self, path: &str, data: &[u8]) -> &Self {
        if let Some((parent, _)) = path.rsplit_once('/') {
            self.dir(parent);
        }
        self.nodes
            .lock()
            .unwrap()
            .insert(path.to_string(), Node::File(data.to_vec()));
        self
    }

    pub fn file_of_len(&self, path: &str, len: usize) -> &Self {
        self.file(path, &vec![b'x'; len])
    }

    pub fn fail_listing(&self, path: &str) -> &Self {
        self.fail_list.lock().unwrap().insert(path.to_string());
        self
    }

    pub fn fail_opening(&self, path: &str) -> &Self {
        self.fail_open.lock().unwrap().insert(path.to_string());
        self
    }

    /// Paths passed to `open`, in call order.
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }

    fn entry(path: &str, node: &Node) -> RemoteEntry {
        match node {
            Node::Dir => RemoteEntry::dir(path),
            Node::File(data) => RemoteEntry::file(path, data.len() as u64),
        }
    }
}

fn normalize(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

#[async_trait]
impl RemoteFs for MemRemote {
    async fn lstat(&self, path: &str) -> Result<RemoteEntry> {
        let key = normalize(path);
        let nodes = self.nodes.lock().unwrap();
        if key == "/" {
            return Ok(RemoteEntry::dir("/"));
        }
        nodes
            .get(&key)
            .map(|n| Self::entry(&key, n))
            .ok_or_else(|| anyhow!("no such file: {path}"))
    }

    async fn read_dir(&self, path: &str) -> Result<Vec<RemoteEntry>> {
        let key = normalize(path);
        if self.fail_list.lock().unwrap().contains(&key) {
            return Err(anyhow!("permission denied: {path}"));
        }
        let nodes = self.nodes.lock().unwrap();
        let prefix = if key == "/" { "/".to_string() } else { format!("{key}/") };
        Ok(nodes
            .iter()
            .filter(|(p, _)| p.starts_with(&prefix) && !p[prefix.len()..].contains('/'))
            .map(|(p, n)| Self::entry(&join_remote(path, &p[prefix.len()..]), n))
            .collect())
    }

    async fn open(&self, path: &str) -> Result<RemoteFile> {
        self.opened.lock().unwrap().push(path.to_string());
        if self.fail_open.lock().unwrap().contains(path) {
            return Err(anyhow!("permission denied: {path}"));
        }
        match self.nodes.lock().unwrap().get(path) {
            Some(Node::File(data)) => Ok(RemoteFile::new(data.len() as u64, Cursor::new(data.clone()))),
            Some(Node::Dir) => Err(anyhow!("is a directory: {path}")),
            None => Err(anyhow!("no such file: {path}")),
        }
    }
}

/// Relative paths under `root` with their sizes (`None` for directories).
pub fn snapshot(root: &Path) -> BTreeMap<String, Option<u64>> {
    WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| {
            let rel = e
                .path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/");
            let size = if e.file_type().is_dir() {
                None
            } else {
                Some(e.metadata().unwrap().len())
            };
            (rel, size)
        })
        .collect()
}
