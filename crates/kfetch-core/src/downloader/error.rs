//! Download error type.

use thiserror::Error;

/// Error returned by a single URL download.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Curl reported an error (DNS, connect, TLS, reset, invalid URL, ...).
    #[error(transparent)]
    Transport(#[from] curl::Error),
    /// Server answered with a non-2xx status.
    #[error("HTTP {code}{}", reason_suffix(.reason))]
    Http { code: u32, reason: String },
    /// Local disk write / rename failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn reason_suffix(reason: &str) -> String {
    if reason.is_empty() {
        String::new()
    } else {
        format!(" {}", reason)
    }
}

impl DownloadError {
    /// HTTP status code, if the failure was an HTTP status.
    pub fn http_status(&self) -> Option<u32> {
        match self {
            DownloadError::Http { code, .. } => Some(*code),
            _ => None,
        }
    }
}
