//! Finding the extractable files in the download directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::archive::{classify, ArchiveKind};

/// Regular files in `dir` whose names end in `.gz` (tar or plain) or `.tgz`,
/// sorted by file name.
pub fn find_archives(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if classify(&path) != ArchiveKind::Unknown {
            found.push(path);
        }
    }
    found.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(found)
}
