//! Folder traversal and digest computation
//!
//! The walk is a sorted pre-order `walkdir` traversal below the root. Both
//! hashing modes share it; [`HashMode`] only decides whether relative paths
//! are fed alongside file contents.
//!
//! Failures below the root never abort a computation. Unlistable
//! directories, unreadable files, dangling links, link cycles and special
//! files are reported to the [`DiagnosticSink`] and contribute nothing.

use super::{ContentReader, HashState, StreamingReader};
use crate::config::{HashAlgorithm, HashMode, HashOptions};
use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::error::{FolderHashError, IoResultExt, Result};
use crate::fs::{relative_bytes, sorted_walk, EntryKind};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::Metadata;
use std::io;
use std::path::{Path, PathBuf};

/// Result of one folder hash computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderDigest {
    /// Root that was hashed
    pub root: PathBuf,
    /// Algorithm used
    pub algorithm: HashAlgorithm,
    /// Mode used
    pub mode: HashMode,
    /// Digest as lowercase hex
    pub digest: String,
    /// Files whose contents were fed
    pub files: u64,
    /// Directories visited, excluding the root
    pub directories: u64,
    /// Content bytes fed
    pub bytes: u64,
    /// Entries left out because of a failure
    pub skipped: u64,
}

impl std::fmt::Display for FolderDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.digest)
    }
}

#[derive(Debug, Default)]
struct WalkTotals {
    files: u64,
    directories: u64,
    bytes: u64,
    skipped: u64,
}

/// Sorted walk feeding one shared hash state
struct Walker<'a, R> {
    root: &'a Path,
    options: &'a HashOptions,
    sink: &'a dyn DiagnosticSink,
    reader: R,
    totals: WalkTotals,
}

impl<'a, R: ContentReader> Walker<'a, R> {
    fn new(root: &'a Path, options: &'a HashOptions, sink: &'a dyn DiagnosticSink, reader: R) -> Self {
        Self {
            root,
            options,
            sink,
            reader,
            totals: WalkTotals::default(),
        }
    }

    fn walk(&mut self, state: &mut HashState) {
        for entry in sorted_walk(self.root, self.options.follow_links) {
            match entry {
                Ok(entry) => self.visit(&entry, state),
                Err(err) => self.report(&err),
            }
        }
    }

    fn visit(&mut self, entry: &walkdir::DirEntry, state: &mut HashState) {
        let emits_paths = self.options.mode.emits_paths();

        match EntryKind::from_file_type(entry.file_type()) {
            EntryKind::Directory => {
                self.totals.directories += 1;
                if emits_paths {
                    state.update(&relative_bytes(self.root, entry.path()));
                }
            }
            EntryKind::File => {
                let prefix = if emits_paths {
                    relative_bytes(self.root, entry.path())
                } else {
                    Vec::new()
                };
                self.feed_file(entry.path(), &prefix, state);
            }
            // Followed links arrive as their targets
            EntryKind::Symlink => {}
            EntryKind::Other => self.skip(Diagnostic::SpecialFileSkipped {
                path: entry.path().to_path_buf(),
            }),
        }
    }

    /// Path and contents of a file are committed together or not at all
    fn feed_file(&mut self, path: &Path, prefix: &[u8], state: &mut HashState) {
        match self.reader.hash_entry(path, prefix, state, self.sink) {
            Ok(bytes) => {
                self.totals.files += 1;
                self.totals.bytes += bytes;
            }
            Err(e) => self.skip(Diagnostic::FileSkipped {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Classify a walk error; the walk itself carries on past it
    fn report(&mut self, err: &walkdir::Error) {
        let path = err.path().unwrap_or(self.root).to_path_buf();

        if let Some(ancestor) = err.loop_ancestor() {
            self.skip(Diagnostic::SymlinkCycle {
                path,
                target: ancestor.to_path_buf(),
            });
            return;
        }

        let message = match err.io_error() {
            Some(e) => e.to_string(),
            None => err.to_string(),
        };
        let event = match (std::fs::symlink_metadata(&path), std::fs::metadata(&path)) {
            (Ok(link), Err(_)) if link.file_type().is_symlink() => {
                Diagnostic::DanglingSymlink { path, message }
            }
            (_, Ok(target)) if target.is_dir() => Diagnostic::ListFailed { path, message },
            _ => Diagnostic::EntryFailed { path, message },
        };
        self.skip(event);
    }

    fn skip(&mut self, event: Diagnostic) {
        self.totals.skipped += 1;
        self.sink.report(event);
    }
}

fn metadata_of(path: &Path) -> Result<Metadata> {
    match std::fs::metadata(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(FolderHashError::NotFound(path.to_path_buf()))
        }
        result => result.with_path(path),
    }
}

/// Check that `path` exists and is a directory
pub fn validate_root(path: &Path) -> Result<()> {
    if !metadata_of(path)?.is_dir() {
        return Err(FolderHashError::NotADirectory(path.to_path_buf()));
    }
    Ok(())
}

/// Hash a folder with explicit options and diagnostics sink.
///
/// Options are validated before the filesystem is touched, then the root is
/// validated; after that the computation always produces a digest.
pub fn hash_folder_with(
    path: &Path,
    options: &HashOptions,
    sink: &dyn DiagnosticSink,
) -> Result<FolderDigest> {
    options.validate()?;
    validate_root(path)?;
    Ok(digest_tree(path, options, sink, StreamingReader::new(options.buffer_size)))
}

fn digest_tree<R: ContentReader>(
    path: &Path,
    options: &HashOptions,
    sink: &dyn DiagnosticSink,
    reader: R,
) -> FolderDigest {
    let mut state = HashState::new(options.algorithm);
    let mut walker = Walker::new(path, options, sink, reader);
    walker.walk(&mut state);
    let totals = walker.totals;

    tracing::debug!(
        root = %path.display(),
        algorithm = %options.algorithm,
        files = totals.files,
        bytes = totals.bytes,
        skipped = totals.skipped,
        "folder hashed"
    );

    FolderDigest {
        root: path.to_path_buf(),
        algorithm: options.algorithm,
        mode: options.mode,
        digest: state.finalize_hex(),
        files: totals.files,
        directories: totals.directories,
        bytes: totals.bytes,
        skipped: totals.skipped,
    }
}

/// Digest of a folder's structure and contents.
///
/// Every entry's relative path is fed before its contents (or children), in
/// sorted depth-first order. Fails only if `algorithm` is unknown or `path`
/// is not an existing directory.
pub fn hash_folder(path: &Path, follow_links: bool, algorithm: &str) -> Result<String> {
    let algorithm = HashAlgorithm::select(algorithm)?;
    let options = HashOptions::structural(algorithm, follow_links);
    Ok(hash_folder_with(path, &options, &TracingSink)?.digest)
}

/// Digest of a folder's file contents only, in sorted depth-first order
pub fn hash_folder_contents(path: &Path, follow_links: bool, algorithm: &str) -> Result<String> {
    let algorithm = HashAlgorithm::select(algorithm)?;
    let options = HashOptions::contents_only(algorithm, follow_links);
    Ok(hash_folder_with(path, &options, &TracingSink)?.digest)
}

/// Recompute a folder digest and compare it with `expected`, ignoring case
pub fn verify_folder(path: &Path, expected: &str, options: &HashOptions) -> Result<bool> {
    let actual = hash_folder_with(path, options, &TracingSink)?;
    Ok(actual.digest.eq_ignore_ascii_case(expected.trim()))
}

/// Hash several folders in parallel, one independent computation each
pub fn hash_folders_parallel(paths: &[PathBuf], options: &HashOptions) -> Vec<Result<FolderDigest>> {
    paths
        .par_iter()
        .map(|path| hash_folder_with(path, options, &TracingSink))
        .collect()
}

/// Digest of a single file.
///
/// Unlike a folder walk, an unreadable file is an error here.
pub fn hash_single_file(path: &Path, algorithm: HashAlgorithm) -> Result<String> {
    if metadata_of(path)?.is_dir() {
        return Err(FolderHashError::io(
            path,
            io::Error::new(io::ErrorKind::Other, "is a directory"),
        ));
    }

    let mut state = HashState::new(algorithm);
    StreamingReader::default()
        .hash_file(path, &mut state, &TracingSink)
        .map_err(|e| match e {
            FolderHashError::Unreadable { message, .. } => FolderHashError::io(
                path,
                io::Error::new(io::ErrorKind::Other, message),
            ),
            other => other,
        })?;
    Ok(state.finalize_hex())
}
