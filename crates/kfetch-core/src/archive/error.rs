//! Extraction error type.

use std::path::PathBuf;
use thiserror::Error;

/// Error raised while extracting one archive. Never aborts the whole run.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Reading the source or writing into the output directory failed.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The gzip stream or tar structure could not be decoded.
    #[error("corrupt archive: {source}")]
    Corrupt {
        #[source]
        source: std::io::Error,
    },
    /// A member would land outside the output directory; nothing was extracted.
    #[error("blocked path traversal attempt: member {member:?} escapes the output directory")]
    PathTraversal { member: String },
    /// The tar crate refused to unpack a member during extraction.
    #[error("refused to unpack member {member:?}")]
    UnsafeMember { member: String },
}

impl ExtractError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExtractError::Io {
            path: path.into(),
            source,
        }
    }
}
