use crate::remote::{RemoteEntry, RemoteFs};

/// One unit of traversal: either a visited entry or the error that stopped it.
#[derive(Debug)]
pub struct WalkStep {
    pub path: String,
    pub entry: anyhow::Result<RemoteEntry>,
}

enum Pending {
    Root(String),
    Entry(RemoteEntry),
    /// Children of an already yielded directory.
    List(String),
}

/// Pre-order walk over a remote tree, one `lstat`/`read_dir` per step.
///
/// Children are visited in name order, so every directory is yielded before
/// anything beneath it. A directory is yielded first and listed on the next
/// step; if the listing fails that step carries the error, nothing below the
/// directory is visited, and the walk carries on with its siblings.
pub struct RemoteWalker<'a, R: RemoteFs + ?Sized> {
    remote: &'a R,
    stack: Vec<Pending>,
}

impl<'a, R: RemoteFs + ?Sized> RemoteWalker<'a, R> {
    pub fn new(remote: &'a R, root: &str) -> Self {
        Self {
            remote,
            stack: vec![Pending::Root(root.to_string())],
        }
    }

    pub async fn step(&mut self) -> Option<WalkStep> {
        loop {
            let entry = match self.stack.pop()? {
                Pending::Root(path) => match self.remote.lstat(&path).await {
                    // keep the configured spelling so the root's relative path is empty
                    Ok(entry) => RemoteEntry { path, ..entry },
                    Err(e) => return Some(WalkStep { path, entry: Err(e) }),
                },
                Pending::Entry(entry) => entry,
                Pending::List(path) => {
                    match self.remote.read_dir(&path).await {
                        Ok(mut children) => {
                            children.sort_by(|a, b| b.name().cmp(a.name()));
                            self.stack.extend(children.into_iter().map(Pending::Entry));
                        }
                        Err(e) => return Some(WalkStep { path, entry: Err(e) }),
                    }
                    continue;
                }
            };

            if entry.is_dir {
                self.stack.push(Pending::List(entry.path.clone()));
            }
            return Some(WalkStep {
                path: entry.path.clone(),
                entry: Ok(entry),
            });
        }
    }
}
