//! Manifest lookup over an ordered candidate list.

use std::path::{Path, PathBuf};

/// Returns the first candidate that exists as a regular file, or `None`.
pub fn locate<P: AsRef<Path>>(candidates: &[P]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(AsRef::as_ref)
        .find(|p| p.is_file())
        .map(Path::to_path_buf)
}
