//! Integration test: manifest → HTTP downloads → extraction, against a local server.
//!
//! Each test lays out a temp data root with a manifest, serves fixture archives
//! from `common::static_server`, and runs the full pipeline.

mod common;

use std::fs;
use std::path::Path;

use common::fixtures;
use common::static_server::{self, Route};
use kfetch_core::config::{DownloadFailurePolicy, FetchConfig};
use kfetch_core::downloader::DownloadError;
use kfetch_core::layout::Layout;
use kfetch_core::pipeline::{self, FetchError, NullReporter};
use tempfile::tempdir;

const TAR_FILES: &[(&str, &[u8])] = &[
    ("videos/abseiling/0001.mp4", b"clip-one" as &[u8]),
    ("videos/juggling/0002.mp4", b"clip-two" as &[u8]),
    ("annotations.csv", b"label,youtube_id\n" as &[u8]),
];

/// Writes `<root>/data/kinetics-dataset/k400_subset.txt` and returns the layout for `root`.
fn setup(root: &Path, manifest: &str) -> Layout {
    let dataset = root.join("data/kinetics-dataset");
    fs::create_dir_all(&dataset).unwrap();
    fs::write(dataset.join("k400_subset.txt"), manifest).unwrap();
    Layout::resolve(&FetchConfig::default(), root, None)
}

fn archive_routes() -> Vec<(&'static str, Route)> {
    vec![
        ("/a.tar.gz", Route::ok(fixtures::tar_gz(TAR_FILES))),
        ("/b.gz", Route::ok(fixtures::gz(b"plain gzip payload\n"))),
    ]
}

#[test]
fn manifest_downloads_and_extracts_everything() {
    let base = static_server::start(archive_routes());
    let root = tempdir().unwrap();
    let manifest = format!("{base}/a.tar.gz\n# comment\n\n  {base}/b.gz  \n");
    let layout = setup(root.path(), &manifest);

    let summary = pipeline::run(&layout, &FetchConfig::default(), &mut NullReporter).unwrap();

    let dataset = root.path().join("data/kinetics-dataset");
    assert!(dataset.join("a.tar.gz").is_file());
    assert!(dataset.join("b.gz").is_file());
    assert!(!dataset.join("a.tar.gz.part").exists());

    let out = root.path().join("data/dataset");
    for (name, data) in TAR_FILES {
        assert_eq!(fs::read(out.join(name)).unwrap(), *data, "member {name}");
    }
    assert_eq!(fs::read(out.join("b")).unwrap(), b"plain gzip payload\n");

    assert_eq!(summary.downloaded.len(), 2);
    assert_eq!(summary.extracted.len(), 2);
    assert!(summary.is_clean());
    assert_eq!(summary.output_dir, out);
}

#[test]
fn not_found_halts_before_extraction() {
    let base = static_server::start(vec![(
        "/a.tar.gz",
        Route::ok(fixtures::tar_gz(TAR_FILES)),
    )]);
    let root = tempdir().unwrap();
    let manifest = format!("{base}/a.tar.gz\n{base}/missing.gz\n");
    let layout = setup(root.path(), &manifest);

    let err = pipeline::run(&layout, &FetchConfig::default(), &mut NullReporter).unwrap_err();
    match &err {
        FetchError::Download { url, source } => {
            assert!(url.ends_with("/missing.gz"));
            assert_eq!(source.http_status(), Some(404));
            assert!(matches!(source, DownloadError::Http { .. }));
        }
        other => panic!("expected Download error, got {other:?}"),
    }
    assert!(err.to_string().contains("missing.gz"));

    let dataset = root.path().join("data/kinetics-dataset");
    assert!(dataset.join("a.tar.gz").is_file(), "earlier download stays on disk");
    assert!(!dataset.join("missing.gz").exists());
    assert!(!dataset.join("missing.gz.part").exists());
    assert!(!root.path().join("data/dataset").exists(), "nothing extracted");
}

#[test]
fn keep_going_extracts_what_arrived() {
    let base = static_server::start(archive_routes());
    let root = tempdir().unwrap();
    let manifest = format!("{base}/gone.tar.gz\n{base}/b.gz\n");
    let layout = setup(root.path(), &manifest);
    let cfg = FetchConfig {
        on_download_error: DownloadFailurePolicy::KeepGoing,
        ..FetchConfig::default()
    };

    let summary = pipeline::run(&layout, &cfg, &mut NullReporter).unwrap();

    assert_eq!(summary.failed_downloads.len(), 1);
    assert!(summary.failed_downloads[0].0.ends_with("/gone.tar.gz"));
    assert!(!summary.is_clean());
    assert_eq!(
        fs::read(root.path().join("data/dataset/b")).unwrap(),
        b"plain gzip payload\n"
    );
}

#[test]
fn corrupt_archive_does_not_block_the_next_one() {
    let base = static_server::start(vec![
        ("/a.gz", Route::ok(b"this is not gzip".to_vec())),
        ("/b.gz", Route::ok(fixtures::gz(b"plain gzip payload\n"))),
    ]);
    let root = tempdir().unwrap();
    let layout = setup(root.path(), &format!("{base}/a.gz\n{base}/b.gz\n"));

    let summary = pipeline::run(&layout, &FetchConfig::default(), &mut NullReporter).unwrap();

    assert_eq!(summary.failed_extractions.len(), 1);
    assert_eq!(summary.extracted.len(), 1);
    let out = root.path().join("data/dataset");
    assert!(!out.join("a").exists());
    assert_eq!(fs::read(out.join("b")).unwrap(), b"plain gzip payload\n");
}

#[test]
fn body_without_content_length_is_saved() {
    let payload: Vec<u8> = (0u8..=250).cycle().take(300 * 1024).collect();
    let base = static_server::start(vec![(
        "/stream.gz",
        Route::ok_without_length(fixtures::gz(&payload)),
    )]);
    let root = tempdir().unwrap();
    let layout = setup(root.path(), &format!("{base}/stream.gz\n"));

    pipeline::run(&layout, &FetchConfig::default(), &mut NullReporter).unwrap();

    assert_eq!(fs::read(root.path().join("data/dataset/stream")).unwrap(), payload);
}

#[test]
fn clean_output_removes_stale_files() {
    let base = static_server::start(archive_routes());
    let root = tempdir().unwrap();
    let layout = setup(root.path(), &format!("{base}/b.gz\n"));
    let out = root.path().join("data/dataset");
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("stale.txt"), b"from an earlier run").unwrap();

    pipeline::run(&layout, &FetchConfig::default(), &mut NullReporter).unwrap();
    assert!(out.join("stale.txt").exists(), "merge keeps earlier output");

    let cfg = FetchConfig {
        clean_output: true,
        ..FetchConfig::default()
    };
    pipeline::run(&layout, &cfg, &mut NullReporter).unwrap();
    assert!(!out.join("stale.txt").exists());
    assert!(out.join("b").is_file());
}

#[test]
fn unrecognized_downloads_leave_nothing_to_extract() {
    let base = static_server::start(vec![("/clips.zip", Route::ok(b"PK\x03\x04".to_vec()))]);
    let root = tempdir().unwrap();
    let layout = setup(root.path(), &format!("{base}/clips.zip\n"));
    // The manifest itself sits in the download directory and must not count.
    let err = pipeline::run(&layout, &FetchConfig::default(), &mut NullReporter).unwrap_err();
    assert!(matches!(err, FetchError::NoArchives { .. }));
    assert!(root.path().join("data/kinetics-dataset/clips.zip").is_file());
}

#[test]
fn redownload_replaces_previous_file() {
    let base = static_server::start(archive_routes());
    let root = tempdir().unwrap();
    let layout = setup(root.path(), &format!("{base}/b.gz\n"));
    let dataset = root.path().join("data/kinetics-dataset");
    fs::write(dataset.join("b.gz"), b"truncated leftovers").unwrap();

    pipeline::run(&layout, &FetchConfig::default(), &mut NullReporter).unwrap();
    assert_eq!(
        fs::read(dataset.join("b.gz")).unwrap(),
        fixtures::gz(b"plain gzip payload\n")
    );
}
