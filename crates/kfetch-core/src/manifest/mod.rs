//! URL manifest: locating the list file and reading URLs out of it.
//!
//! The manifest is plain UTF-8 text with one URL per line. Blank lines and
//! lines starting with `#` (after trimming) are ignored.

mod locate;
mod read;

pub use locate::locate;
pub use read::{parse_line, read_urls, UrlReader};
