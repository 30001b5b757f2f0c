//! Local filename derivation for manifest URLs.
//!
//! Each download is saved beside the manifest under the last path segment of
//! its URL. The segment is used as written (no percent-decoding); only
//! characters a filename cannot hold are replaced.

mod path;
mod sanitize;

pub use path::filename_from_url_path;
pub use sanitize::sanitize_filename_for_linux;

/// Default filename when the URL path yields nothing usable.
const DEFAULT_FILENAME: &str = "download.bin";

/// Derives a safe filename for saving the download of `url`.
///
/// # Examples
///
/// - `derive_filename("https://example.com/k400/part_0.tar.gz")` → `"part_0.tar.gz"`
/// - `derive_filename("https://example.com/")` → `"download.bin"`
pub fn derive_filename(url: &str) -> String {
    let raw = match filename_from_url_path(url) {
        Some(c) => c,
        None => return DEFAULT_FILENAME.to_string(),
    };

    let sanitized = sanitize_filename_for_linux(&raw);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        DEFAULT_FILENAME.to_string()
    } else {
        sanitized
    }
}
