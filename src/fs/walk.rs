//! Deterministic directory walking
//!
//! Every call re-lists from the filesystem; nothing is cached between
//! computations.

use std::ffi::OsStr;
use std::fs::FileType;
use std::path::{Component, Path};
use walkdir::WalkDir;

/// Separator between relative path segments, on every platform
pub const PATH_SEPARATOR: u8 = b'/';

/// Type of a walked entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file
    File,
    /// Directory
    Directory,
    /// Symbolic link that was not followed
    Symlink,
    /// FIFO, socket, device or anything else
    Other,
}

impl EntryKind {
    /// Classify a `FileType` as reported by the walk
    pub fn from_file_type(file_type: FileType) -> Self {
        if file_type.is_symlink() {
            Self::Symlink
        } else if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_file() {
            Self::File
        } else {
            Self::Other
        }
    }
}

/// Pre-order walk below `root`, children sorted bytewise by name.
///
/// The root itself is not yielded. With `follow_links` set, links are
/// resolved to their targets and links back to an ancestor come out as
/// loop errors.
pub fn sorted_walk(root: &Path, follow_links: bool) -> WalkDir {
    WalkDir::new(root)
        .min_depth(1)
        .follow_links(follow_links)
        .sort_by_file_name()
}

/// Relative path bytes of `path` below `root`, joined with `/`
pub fn relative_bytes(root: &Path, path: &Path) -> Vec<u8> {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let mut bytes = Vec::new();

    for component in relative.components() {
        if let Component::Normal(name) = component {
            if !bytes.is_empty() {
                bytes.push(PATH_SEPARATOR);
            }
            bytes.extend_from_slice(&os_bytes(name));
        }
    }

    bytes
}

/// Raw bytes of an OS string
#[cfg(unix)]
pub fn os_bytes(name: &OsStr) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    name.as_bytes().to_vec()
}

/// Raw bytes of an OS string
#[cfg(not(unix))]
pub fn os_bytes(name: &OsStr) -> Vec<u8> {
    name.to_string_lossy().into_owned().into_bytes()
}
