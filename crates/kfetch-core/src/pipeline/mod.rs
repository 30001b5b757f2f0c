//! The fetch-and-extract run: locate manifest → read URLs → download all →
//! extract all.
//!
//! Downloads land beside the manifest; every `.gz`/`.tar.gz`/`.tgz` found
//! there afterwards is extracted into the layout's output directory. A failed
//! extraction is reported and the next file is attempted; what a failed
//! download does depends on `DownloadFailurePolicy`.

mod error;
mod report;
mod scan;

pub use error::FetchError;
pub use report::{NullReporter, Reporter, RunSummary};
pub use scan::find_archives;

use std::fs;
use std::path::{Path, PathBuf};

use crate::archive::{self, classify};
use crate::config::{DownloadFailurePolicy, FetchConfig};
use crate::downloader::{self, DownloadOptions};
use crate::layout::Layout;
use crate::manifest;
use crate::url_model::derive_filename;

/// Runs the whole pipeline for `layout` with the policies from `cfg`.
pub fn run(
    layout: &Layout,
    cfg: &FetchConfig,
    reporter: &mut dyn Reporter,
) -> Result<RunSummary, FetchError> {
    let manifest_path =
        manifest::locate(&layout.manifest_candidates).ok_or_else(|| FetchError::ManifestNotFound {
            checked: layout.manifest_candidates.clone(),
        })?;
    let download_dir = manifest_dir(&manifest_path);
    tracing::info!(
        manifest = %manifest_path.display(),
        download_dir = %download_dir.display(),
        output_dir = %layout.output_dir.display(),
        "manifest located"
    );
    reporter.manifest_found(&manifest_path, &download_dir, &layout.output_dir);

    let urls = manifest::read_urls(&manifest_path).map_err(|source| FetchError::ManifestRead {
        path: manifest_path.clone(),
        source,
    })?;
    if urls.is_empty() {
        return Err(FetchError::EmptyManifest {
            path: manifest_path,
        });
    }
    tracing::info!("{} URL(s) listed", urls.len());
    reporter.urls_loaded(urls.len());

    let mut summary = RunSummary {
        manifest: manifest_path.clone(),
        output_dir: layout.output_dir.clone(),
        ..RunSummary::default()
    };

    download_all(
        &urls,
        &download_dir,
        &cfg.download_options(),
        cfg.on_download_error,
        reporter,
        &mut summary,
    )?;
    reporter.downloads_complete(summary.downloaded.len(), summary.failed_downloads.len());

    if cfg.clean_output && layout.output_dir.exists() {
        fs::remove_dir_all(&layout.output_dir).map_err(|source| FetchError::Io {
            path: layout.output_dir.clone(),
            source,
        })?;
        tracing::info!("cleared {}", layout.output_dir.display());
        reporter.output_cleaned(&layout.output_dir);
    }

    let archives = find_archives(&download_dir).map_err(|source| FetchError::Io {
        path: download_dir.clone(),
        source,
    })?;
    if archives.is_empty() {
        return Err(FetchError::NoArchives { dir: download_dir });
    }
    tracing::debug!("{} file(s) to extract", archives.len());

    extract_all(&archives, &layout.output_dir, reporter, &mut summary);

    tracing::info!(
        extracted = summary.extracted.len(),
        failed = summary.failed_extractions.len(),
        "run finished"
    );
    Ok(summary)
}

/// Directory that holds the manifest (and receives the downloads).
fn manifest_dir(manifest: &Path) -> PathBuf {
    match manifest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn download_all(
    urls: &[String],
    download_dir: &Path,
    opts: &DownloadOptions,
    policy: DownloadFailurePolicy,
    reporter: &mut dyn Reporter,
    summary: &mut RunSummary,
) -> Result<(), FetchError> {
    for url in urls {
        let dest = download_dir.join(derive_filename(url));
        reporter.download_started(url, &dest);

        let result = downloader::download(url, &dest, opts, &mut |stats| {
            reporter.download_progress(&dest, stats)
        });
        match result {
            Ok(bytes) => {
                reporter.download_finished(&dest, bytes);
                summary.downloaded.push(dest);
            }
            Err(e) => {
                reporter.download_failed(url, &e);
                match policy {
                    DownloadFailurePolicy::Halt => {
                        return Err(FetchError::Download {
                            url: url.clone(),
                            source: e,
                        });
                    }
                    DownloadFailurePolicy::KeepGoing => {
                        summary.failed_downloads.push((url.clone(), e));
                    }
                }
            }
        }
    }
    Ok(())
}

fn extract_all(
    archives: &[PathBuf],
    output_dir: &Path,
    reporter: &mut dyn Reporter,
    summary: &mut RunSummary,
) {
    for src in archives {
        reporter.extraction_started(src, classify(src));
        match archive::extract(src, output_dir) {
            Ok(archive::ExtractOutcome::Skipped) => {
                reporter.extraction_finished(src, &archive::ExtractOutcome::Skipped);
                summary.skipped.push(src.clone());
            }
            Ok(outcome) => {
                tracing::info!("extracted {}: {:?}", src.display(), outcome);
                reporter.extraction_finished(src, &outcome);
                summary.extracted.push(src.clone());
            }
            Err(e) => {
                tracing::warn!("extraction failed for {}: {}", src.display(), e);
                reporter.extraction_failed(src, &e);
                summary.failed_extractions.push((src.clone(), e));
            }
        }
    }
}
