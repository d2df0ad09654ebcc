use std::path::Path;
use std::sync::Arc;
use std::thread;

use taskgraph_viz::errors::TaskgraphError;
use taskgraph_viz::fs::mock::MockFileSystem;
use taskgraph_viz::fs::{FileSystem, RealFileSystem};

#[test]
fn real_read_error_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("graph.json");

    let err = RealFileSystem.read_to_string(&missing).unwrap_err();

    assert!(matches!(err, TaskgraphError::Other(_)));
    assert!(err.to_string().contains("graph.json"), "{err}");
    // The underlying OS error is still in the chain.
    let debug = format!("{:?}", anyhow::Error::from(err));
    assert!(debug.contains("Caused by"), "{debug}");
}

#[test]
fn real_write_error_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"a file, not a directory").unwrap();

    let err = RealFileSystem
        .write_atomic(&blocker.join("out.json"), b"{}")
        .unwrap_err();
    assert!(err.to_string().contains("blocker"), "{err}");
}

#[test]
fn write_atomic_creates_parents_and_replaces_contents() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("a").join("b").join("out.json");

    RealFileSystem.write_atomic(&out, b"first").unwrap();
    RealFileSystem.write_atomic(&out, b"second").unwrap();

    assert_eq!(RealFileSystem.read_to_string(&out).unwrap(), "second");
    assert_eq!(std::fs::read_dir(out.parent().unwrap()).unwrap().count(), 1);
}

#[test]
fn concurrent_writers_to_one_path_do_not_clobber_each_other() {
    let dir = tempfile::tempdir().unwrap();
    let out = Arc::new(dir.path().join("shared.json"));
    let payloads: Vec<String> = (0..8).map(|i| format!("{{\"writer\": {i}}}")).collect();

    let handles: Vec<_> = payloads
        .iter()
        .cloned()
        .map(|payload| {
            let out = Arc::clone(&out);
            thread::spawn(move || {
                for _ in 0..20 {
                    RealFileSystem.write_atomic(&out, payload.as_bytes()).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let final_contents = RealFileSystem.read_to_string(&out).unwrap();
    assert!(payloads.contains(&final_contents), "{final_contents}");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn mock_read_error_names_the_path() {
    let fs = MockFileSystem::new();
    let err = fs.read_to_string(Path::new("data/ship.json")).unwrap_err();
    assert!(err.to_string().contains("data/ship.json"), "{err}");
}

#[test]
fn mock_rejects_invalid_utf8() {
    let fs = MockFileSystem::new();
    fs.add_file("bin.json", vec![0xff, 0xfe]);
    assert!(matches!(
        fs.read_to_string(Path::new("bin.json")),
        Err(TaskgraphError::IoError(_))
    ));
}
