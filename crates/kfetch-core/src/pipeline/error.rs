//! Run-level errors: everything that ends a run with a non-zero status.

use std::path::PathBuf;
use thiserror::Error;

use crate::downloader::DownloadError;

fn list_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("\n  - {}", p.display()))
        .collect()
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("could not find the URL manifest in any expected location:{}", list_paths(.checked))]
    ManifestNotFound { checked: Vec<PathBuf> },

    #[error("failed to read manifest {}", .path.display())]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no URLs found in {}", .path.display())]
    EmptyManifest { path: PathBuf },

    #[error("failed to download {url}")]
    Download {
        url: String,
        #[source]
        source: DownloadError,
    },

    #[error("no .gz/.tar.gz/.tgz files found to extract in {}", .dir.display())]
    NoArchives { dir: PathBuf },

    #[error("I/O error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
