//! Reporting seam between the pipeline and whatever renders status lines.

use std::path::{Path, PathBuf};

use crate::archive::{ArchiveKind, ExtractError, ExtractOutcome};
use crate::downloader::DownloadError;
use crate::progress::ProgressStats;

/// Receives pipeline events in order. Every method defaults to a no-op.
#[allow(unused_variables)]
pub trait Reporter {
    fn manifest_found(&mut self, manifest: &Path, download_dir: &Path, output_dir: &Path) {}
    fn urls_loaded(&mut self, count: usize) {}
    fn download_started(&mut self, url: &str, dest: &Path) {}
    fn download_progress(&mut self, dest: &Path, stats: &ProgressStats) {}
    fn download_finished(&mut self, dest: &Path, bytes: u64) {}
    fn download_failed(&mut self, url: &str, err: &DownloadError) {}
    fn downloads_complete(&mut self, succeeded: usize, failed: usize) {}
    fn output_cleaned(&mut self, output_dir: &Path) {}
    fn extraction_started(&mut self, src: &Path, kind: ArchiveKind) {}
    fn extraction_finished(&mut self, src: &Path, outcome: &ExtractOutcome) {}
    fn extraction_failed(&mut self, src: &Path, err: &ExtractError) {}
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {}

/// Outcome of a completed run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub manifest: PathBuf,
    pub output_dir: PathBuf,
    /// Files downloaded this run.
    pub downloaded: Vec<PathBuf>,
    /// URLs that failed (only populated under the keep-going policy).
    pub failed_downloads: Vec<(String, DownloadError)>,
    /// Archives extracted successfully.
    pub extracted: Vec<PathBuf>,
    /// Files matched by the scan but left untouched.
    pub skipped: Vec<PathBuf>,
    pub failed_extractions: Vec<(PathBuf, ExtractError)>,
}

impl RunSummary {
    /// True when nothing failed along the way.
    pub fn is_clean(&self) -> bool {
        self.failed_downloads.is_empty() && self.failed_extractions.is_empty()
    }
}
