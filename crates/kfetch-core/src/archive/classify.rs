//! Suffix-based archive classification. File contents are never inspected.

use std::fmt;
use std::path::Path;

/// What kind of compressed file a path names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveKind {
    /// `.tar.gz` or `.tgz`
    TarGzip,
    /// `.gz` holding a single stream
    PlainGzip,
    Unknown,
}

impl fmt::Display for ArchiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ArchiveKind::TarGzip => "tar.gz",
            ArchiveKind::PlainGzip => "gz",
            ArchiveKind::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Classifies `path` by its file name. Matching is case-sensitive.
pub fn classify(path: &Path) -> ArchiveKind {
    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(n) => n,
        None => return ArchiveKind::Unknown,
    };
    if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
        ArchiveKind::TarGzip
    } else if gz_target_name(name).is_some() {
        ArchiveKind::PlainGzip
    } else {
        ArchiveKind::Unknown
    }
}

/// Output name for a plain gzip file: the name with `.gz` stripped, if anything is left.
pub fn gz_target_name(name: &str) -> Option<&str> {
    name.strip_suffix(".gz").filter(|stem| !stem.is_empty())
}
