//! Archive classification and extraction (tar.gz / tgz and plain gzip).

mod classify;
mod error;
mod extract;
mod safety;

pub use classify::{classify, gz_target_name, ArchiveKind};
pub use error::ExtractError;
pub use extract::{extract, ExtractOutcome};
pub use safety::{check_link_target, check_member_path, find_escape, LinkTarget, MemberEntry};
