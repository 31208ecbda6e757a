mod common;

use common::MemRemote;
use fmirror_core::RemoteWalker;

async fn collect(remote: &MemRemote, root: &str) -> Vec<Result<String, String>> {
    let mut walker = RemoteWalker::new(remote, root);
    let mut steps = Vec::new();
    while let Some(step) = walker.step().await {
        steps.push(match step.entry {
            Ok(entry) if entry.is_dir => Ok(format!("{}/", entry.path)),
            Ok(entry) => Ok(entry.path),
            Err(_) => Err(step.path),
        });
    }
    steps
}

#[tokio::test]
async fn preorder_in_name_order() {
    let remote = MemRemote::new();
    remote
        .file_of_len("/data/z.txt", 1)
        .file_of_len("/data/b/inner.txt", 1)
        .file_of_len("/data/a.txt", 1)
        .dir("/data/b/empty");

    let steps = collect(&remote, "/data").await;
    assert_eq!(
        steps,
        vec![
            Ok("/data/".to_string()),
            Ok("/data/a.txt".to_string()),
            Ok("/data/b/".to_string()),
            Ok("/data/b/empty/".to_string()),
            Ok("/data/b/inner.txt".to_string()),
            Ok("/data/z.txt".to_string()),
        ]
    );
}

#[tokio::test]
async fn directories_come_before_their_contents() {
    let remote = MemRemote::new();
    remote
        .file_of_len("/r/x/y/z/deep.bin", 1)
        .file_of_len("/r/x/top.bin", 1)
        .file_of_len("/r/w.bin", 1);

    let steps: Vec<String> = collect(&remote, "/r").await.into_iter().map(Result::unwrap).collect();
    for (i, path) in steps.iter().enumerate() {
        let parent = match path.trim_end_matches('/').rsplit_once('/') {
            Some((parent, _)) if !parent.is_empty() && parent != "/r" => format!("{parent}/"),
            _ => continue,
        };
        let pos = steps.iter().position(|p| *p == parent).unwrap();
        assert!(pos < i, "{parent} visited after {path}");
    }
}

#[tokio::test]
async fn unlistable_directory_is_yielded_then_its_error() {
    let remote = MemRemote::new();
    remote
        .file_of_len("/data/a/1", 1)
        .file_of_len("/data/b/2", 1)
        .fail_listing("/data/a");

    let steps = collect(&remote, "/data").await;
    assert_eq!(
        steps,
        vec![
            Ok("/data/".to_string()),
            Ok("/data/a/".to_string()),
            Err("/data/a".to_string()),
            Ok("/data/b/".to_string()),
            Ok("/data/b/2".to_string()),
        ]
    );
}

#[tokio::test]
async fn trailing_slash_root_joins_cleanly() {
    let remote = MemRemote::new();
    remote.file_of_len("/data/a", 1);

    let steps = collect(&remote, "/data/").await;
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[1], Ok("/data/a".to_string()));
}

#[tokio::test]
async fn missing_root_yields_one_error() {
    let remote = MemRemote::new();
    let steps = collect(&remote, "/missing").await;
    assert_eq!(steps, vec![Err("/missing".to_string())]);
}
