//! Single-stream HTTP GET downloader.
//!
//! Streams the response body into `<dest>.part` through libcurl and renames it
//! onto `dest` once the server answered 2xx and every byte is on disk. The
//! `Content-Length` of the final response only feeds progress reporting.

mod error;
mod headers;

pub use error::DownloadError;
pub use headers::{parse_status_line, ResponseHeaders, StatusLine};

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::Path;
use std::str;
use std::time::{Duration, Instant};

use crate::progress::ProgressStats;
use crate::storage::PartFile;

/// Transfer knobs for `download`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadOptions {
    /// Receive buffer handed to curl (bytes per write callback, at most).
    pub buffer_size: usize,
    /// Connect timeout; None keeps libcurl's default.
    pub connect_timeout: Option<Duration>,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            buffer_size: 256 * 1024,
            connect_timeout: None,
        }
    }
}

/// Downloads `url` to `dest`, creating parent directories and replacing any existing file.
/// Returns the number of bytes written.
///
/// `progress` is called after every chunk written to disk.
pub fn download(
    url: &str,
    dest: &Path,
    opts: &DownloadOptions,
    progress: &mut dyn FnMut(&ProgressStats),
) -> Result<u64, DownloadError> {
    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut part = PartFile::create(dest)?;
    match fetch_into(url, &mut part, opts, progress) {
        Ok(()) => {
            let written = part.finalize()?;
            tracing::info!(url, bytes = written, "saved {}", dest.display());
            Ok(written)
        }
        Err(e) => {
            tracing::warn!(url, "download failed: {}", e);
            part.discard();
            Err(e)
        }
    }
}

fn fetch_into(
    url: &str,
    part: &mut PartFile,
    opts: &DownloadOptions,
    progress: &mut dyn FnMut(&ProgressStats),
) -> Result<(), DownloadError> {
    let headers = RefCell::new(ResponseHeaders::default());
    let storage_error: RefCell<Option<io::Error>> = RefCell::new(None);
    let started = Instant::now();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.buffer_size(opts.buffer_size)?;
    if let Some(timeout) = opts.connect_timeout {
        easy.connect_timeout(timeout)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                headers.borrow_mut().feed(s);
            }
            true
        })?;
        transfer.write_function(|data| {
            let (success, total) = {
                let h = headers.borrow();
                let success = h
                    .status
                    .as_ref()
                    .map_or(true, |s| (200..300).contains(&s.code));
                (success, h.content_length)
            };
            // Error bodies are drained, not stored; the status is reported after perform().
            if !success {
                return Ok(data.len());
            }
            if let Err(e) = part.write_chunk(data) {
                let _ = storage_error.borrow_mut().replace(e);
                return Ok(0); // abort transfer
            }
            progress(&ProgressStats {
                bytes_done: part.written(),
                total_bytes: total,
                elapsed_secs: started.elapsed().as_secs_f64(),
            });
            Ok(data.len())
        })?;

        if let Err(e) = transfer.perform() {
            if e.is_write_error() {
                if let Some(io_err) = storage_error.borrow_mut().take() {
                    return Err(DownloadError::Io(io_err));
                }
            }
            return Err(DownloadError::Transport(e));
        }
    }

    // Non-HTTP schemes (file://) report 0.
    let code = easy.response_code()?;
    if code != 0 && !(200..300).contains(&code) {
        return Err(DownloadError::Http {
            code,
            reason: headers.borrow().reason().to_string(),
        });
    }
    tracing::debug!(url, code, content_length = ?headers.borrow().content_length, "GET finished");
    Ok(())
}
