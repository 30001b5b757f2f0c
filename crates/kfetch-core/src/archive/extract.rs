//! Extract one downloaded file into the output directory.
//!
//! Tar archives are read twice: a header-only pass validates every member and
//! link target, and only if all of them are contained does the second pass
//! write anything. Plain gzip files are decompressed through a `.part` file.

use flate2::read::{GzDecoder, MultiGzDecoder};
use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use super::classify::{classify, gz_target_name, ArchiveKind};
use super::error::ExtractError;
use super::safety::{find_escape, LinkTarget, MemberEntry};
use crate::storage::PartFile;

const BUF_SIZE: usize = 64 * 1024;

/// What `extract` did with a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractOutcome {
    /// Tar archive unpacked; `members` entries were written.
    Unpacked { members: usize },
    /// Plain gzip stream written to `target`.
    Decompressed { target: PathBuf, bytes: u64 },
    /// Not a recognized archive; left untouched.
    Skipped,
}

/// Extracts `src` into `out_dir` (created if absent) according to its classification.
pub fn extract(src: &Path, out_dir: &Path) -> Result<ExtractOutcome, ExtractError> {
    fs::create_dir_all(out_dir).map_err(|e| ExtractError::io(out_dir, e))?;

    match classify(src) {
        ArchiveKind::TarGzip => {
            let scanned = scan_members(src)?;
            tracing::debug!(src = %src.display(), members = scanned, "tar members validated");
            let members = unpack_members(src, out_dir)?;
            Ok(ExtractOutcome::Unpacked { members })
        }
        ArchiveKind::PlainGzip => decompress_gz(src, out_dir),
        ArchiveKind::Unknown => {
            tracing::info!("skipping {} (unknown archive type)", src.display());
            Ok(ExtractOutcome::Skipped)
        }
    }
}

fn corrupt(source: io::Error) -> ExtractError {
    ExtractError::Corrupt { source }
}

fn open_tar_gz(src: &Path) -> Result<tar::Archive<GzDecoder<BufReader<File>>>, ExtractError> {
    let file = File::open(src).map_err(|e| ExtractError::io(src, e))?;
    Ok(tar::Archive::new(GzDecoder::new(BufReader::new(file))))
}

/// First pass: headers only. Collects every member, then checks the archive as
/// a whole so that symlinks appearing later still constrain earlier members.
fn scan_members(src: &Path) -> Result<usize, ExtractError> {
    let mut archive = open_tar_gz(src)?;
    let mut members = Vec::new();
    for entry in archive.entries().map_err(corrupt)? {
        let entry = entry.map_err(corrupt)?;
        let path = entry.path().map_err(corrupt)?.into_owned();
        let entry_type = entry.header().entry_type();
        let link = if entry_type.is_symlink() || entry_type.is_hard_link() {
            entry
                .link_name()
                .map_err(corrupt)?
                .map(|target| {
                    let target = target.into_owned();
                    if entry_type.is_symlink() {
                        LinkTarget::Symlink(target)
                    } else {
                        LinkTarget::Hard(target)
                    }
                })
        } else {
            None
        };
        members.push(MemberEntry { path, link });
    }

    if let Some(member) = find_escape(&members) {
        return Err(ExtractError::PathTraversal { member });
    }
    Ok(members.len())
}

/// Second pass: unpack every member under `out_dir`.
fn unpack_members(src: &Path, out_dir: &Path) -> Result<usize, ExtractError> {
    let mut archive = open_tar_gz(src)?;
    let mut count = 0usize;
    for entry in archive.entries().map_err(corrupt)? {
        let mut entry = entry.map_err(corrupt)?;
        let member = entry.path().map_err(corrupt)?.display().to_string();
        let unpacked = entry
            .unpack_in(out_dir)
            .map_err(|e| ExtractError::io(out_dir.join(&member), e))?;
        if !unpacked {
            return Err(ExtractError::UnsafeMember { member });
        }
        count += 1;
    }
    Ok(count)
}

fn decompress_gz(src: &Path, out_dir: &Path) -> Result<ExtractOutcome, ExtractError> {
    let name = match src
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(gz_target_name)
    {
        Some(n) => n,
        None => return Ok(ExtractOutcome::Skipped),
    };
    let target = out_dir.join(name);

    let file = File::open(src).map_err(|e| ExtractError::io(src, e))?;
    let mut decoder = MultiGzDecoder::new(BufReader::new(file));
    let mut part = PartFile::create(&target).map_err(|e| ExtractError::io(&target, e))?;

    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = match decoder.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                part.discard();
                return Err(corrupt(e));
            }
        };
        if let Err(e) = part.write_chunk(&buf[..n]) {
            part.discard();
            return Err(ExtractError::io(&target, e));
        }
    }

    let bytes = part.finalize().map_err(|e| ExtractError::io(&target, e))?;
    Ok(ExtractOutcome::Decompressed { target, bytes })
}
