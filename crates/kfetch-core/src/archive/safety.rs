//! Lexical containment checks for tar members.
//!
//! Member paths must be plain relative paths: no root, no drive prefix and no
//! `..` at all. Link targets may use `..` as long as they never climb above
//! the output directory.
//!
//! Symlinks change what later paths mean on disk, so the archive is checked
//! as a whole: no member may live under a symlink stored anywhere in the
//! archive, and no link target may walk through one.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

/// Link carried by a tar member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Resolved from the member's parent directory.
    Symlink(PathBuf),
    /// An archive path, resolved from the root.
    Hard(PathBuf),
}

/// One member as seen by the header-only pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberEntry {
    pub path: PathBuf,
    pub link: Option<LinkTarget>,
}

impl MemberEntry {
    fn describe(&self) -> String {
        match &self.link {
            Some(LinkTarget::Symlink(t)) | Some(LinkTarget::Hard(t)) => {
                format!("{} -> {}", self.path.display(), t.display())
            }
            None => self.path.display().to_string(),
        }
    }
}

/// Depth of `path` below its starting point after applying `.`/`..`, or None if
/// it is absolute or climbs above the start at any point.
fn contained_depth(start_depth: usize, path: &Path) -> Option<usize> {
    let mut depth = start_depth;
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => return None,
            Component::CurDir => {}
            Component::ParentDir => depth = depth.checked_sub(1)?,
            Component::Normal(_) => depth += 1,
        }
    }
    Some(depth)
}

/// True if a member stored as `path` stays inside the extraction root.
pub fn check_member_path(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::CurDir | Component::Normal(_)))
}

/// True if a link stored at `member` pointing to `target` stays inside the root.
///
/// Symlink targets resolve from the member's parent directory; hard link
/// targets are archive paths and resolve from the root.
pub fn check_link_target(member: &Path, target: &Path, symlink: bool) -> bool {
    if !symlink {
        return check_member_path(target);
    }
    let parent_depth = match member.parent().and_then(|p| contained_depth(0, p)) {
        Some(d) => d,
        None => return false,
    };
    contained_depth(parent_depth, target).is_some()
}

/// `path` without `.` components. Only meaningful for paths that passed `check_member_path`.
fn normalized(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect()
}

/// True if any proper ancestor of `path` is a stored symlink.
fn under_symlink(path: &Path, symlinks: &HashSet<PathBuf>) -> bool {
    path.ancestors()
        .skip(1)
        .filter(|a| !a.as_os_str().is_empty())
        .any(|a| symlinks.contains(a))
}

/// True if resolving `target` from `base` steps through a stored symlink.
/// Landing on a symlink as the last component is allowed.
fn walks_through_symlink(base: &Path, target: &Path, symlinks: &HashSet<PathBuf>) -> bool {
    let mut current = base.to_path_buf();
    for component in target.components() {
        if component == Component::CurDir {
            continue;
        }
        if !current.as_os_str().is_empty() && symlinks.contains(&current) {
            return true;
        }
        match component {
            Component::ParentDir => {
                current.pop();
            }
            Component::Normal(name) => current.push(name),
            // Absolute targets never get here; check_link_target rejects them first.
            _ => return true,
        }
    }
    false
}

/// Checks every member of one archive. Returns a description of the first
/// member or link that could place data outside the extraction root.
pub fn find_escape(members: &[MemberEntry]) -> Option<String> {
    for member in members {
        if !check_member_path(&member.path) {
            return Some(member.describe());
        }
    }

    let symlinks: HashSet<PathBuf> = members
        .iter()
        .filter(|m| matches!(m.link, Some(LinkTarget::Symlink(_))))
        .map(|m| normalized(&m.path))
        .collect();

    for member in members {
        let path = normalized(&member.path);
        if under_symlink(&path, &symlinks) {
            return Some(member.describe());
        }
        let escapes = match &member.link {
            None => false,
            Some(LinkTarget::Symlink(target)) => {
                let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
                !check_link_target(&path, target, true)
                    || walks_through_symlink(&base, target, &symlinks)
            }
            Some(LinkTarget::Hard(target)) => {
                !check_link_target(&path, target, false)
                    || walks_through_symlink(Path::new(""), target, &symlinks)
            }
        };
        if escapes {
            return Some(member.describe());
        }
    }
    None
}
