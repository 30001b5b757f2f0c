//! Human-readable status lines for a run.

use kfetch_core::archive::{ArchiveKind, ExtractError, ExtractOutcome};
use kfetch_core::downloader::DownloadError;
use kfetch_core::pipeline::{Reporter, RunSummary};
use kfetch_core::progress::ProgressStats;
use std::path::Path;
use std::time::{Duration, Instant};

const PROGRESS_INTERVAL: Duration = Duration::from_millis(500);
const MIB: f64 = 1_048_576.0;

#[derive(Debug, Default)]
pub struct ConsoleReporter {
    last_progress: Option<Instant>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self {
            last_progress: None,
        }
    }

    pub fn print_summary(&self, summary: &RunSummary) {
        if !summary.failed_downloads.is_empty() {
            println!("{} download(s) failed:", summary.failed_downloads.len());
            for (url, err) in &summary.failed_downloads {
                println!("  {}: {}", url, err);
            }
        }
        if !summary.failed_extractions.is_empty() {
            println!("{} file(s) could not be extracted:", summary.failed_extractions.len());
            for (src, err) in &summary.failed_extractions {
                println!("  {}: {}", display_name(src), err);
            }
        }
        println!(
            "Done: {} extracted into {}",
            summary.extracted.len(),
            summary.output_dir.display()
        );
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// "12.3 / 45.6 MiB (27.0%)  3.21 MiB/s  ETA 10s", or "12.3 MiB  3.21 MiB/s  ETA ?" without a total.
pub(crate) fn progress_line(stats: &ProgressStats) -> String {
    let done_mib = stats.bytes_done as f64 / MIB;
    let rate_mib = stats.bytes_per_sec() / MIB;
    let eta = stats
        .eta_secs()
        .map(|s| format!("{:.0}s", s))
        .unwrap_or_else(|| "?".to_string());
    match (stats.total_bytes, stats.fraction()) {
        (Some(total), Some(fraction)) => format!(
            "{:.1} / {:.1} MiB ({:.1}%)  {:.2} MiB/s  ETA {}",
            done_mib,
            total as f64 / MIB,
            fraction * 100.0,
            rate_mib,
            eta
        ),
        _ => format!("{:.1} MiB  {:.2} MiB/s  ETA {}", done_mib, rate_mib, eta),
    }
}

impl Reporter for ConsoleReporter {
    fn manifest_found(&mut self, manifest: &Path, download_dir: &Path, output_dir: &Path) {
        println!("Manifest:  {}", manifest.display());
        println!("Downloads: {}", download_dir.display());
        println!("Output:    {}", output_dir.display());
    }

    fn urls_loaded(&mut self, count: usize) {
        println!("{} URL(s) to download", count);
    }

    fn download_started(&mut self, url: &str, _dest: &Path) {
        self.last_progress = None;
        println!("Downloading {}", url);
    }

    fn download_progress(&mut self, _dest: &Path, stats: &ProgressStats) {
        let now = Instant::now();
        let due = self
            .last_progress
            .map_or(true, |last| now.duration_since(last) >= PROGRESS_INTERVAL);
        if due || stats.is_complete() {
            println!("\r  {}  ", progress_line(stats));
            self.last_progress = Some(now);
        }
    }

    fn download_finished(&mut self, dest: &Path, bytes: u64) {
        println!(
            "  saved {} ({:.1} MiB)",
            display_name(dest),
            bytes as f64 / MIB
        );
    }

    fn download_failed(&mut self, url: &str, err: &DownloadError) {
        println!("  failed {}: {}", url, err);
    }

    fn downloads_complete(&mut self, succeeded: usize, failed: usize) {
        if failed > 0 {
            println!("Downloads finished: {} ok, {} failed", succeeded, failed);
        } else {
            println!("Downloads finished: {} file(s)", succeeded);
        }
    }

    fn output_cleaned(&mut self, output_dir: &Path) {
        println!("Cleared {}", output_dir.display());
    }

    fn extraction_started(&mut self, src: &Path, kind: ArchiveKind) {
        println!("Extracting {} ({})", display_name(src), kind);
    }

    fn extraction_finished(&mut self, src: &Path, outcome: &ExtractOutcome) {
        match outcome {
            ExtractOutcome::Unpacked { members } => {
                println!("  {} member(s) unpacked", members)
            }
            ExtractOutcome::Decompressed { target, bytes } => println!(
                "  wrote {} ({} bytes)",
                display_name(target),
                bytes
            ),
            ExtractOutcome::Skipped => println!("  skipped {}", display_name(src)),
        }
    }

    fn extraction_failed(&mut self, src: &Path, err: &ExtractError) {
        println!("  could not extract {}: {}", display_name(src), err);
    }
}
