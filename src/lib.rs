//! # FolderHash - Deterministic Digests of Directory Trees
//!
//! FolderHash reduces a directory tree to a single hex digest that is
//! reproducible across runs and machines. Entries are visited depth-first in
//! bytewise name order and streamed into one running hash.
//!
//! ## Features
//!
//! - **Two Modes**: structural (relative paths plus contents) or contents only
//! - **Four Algorithms**: SHA-256 (default), MD5, SHA-1, BLAKE2b
//! - **Bounded Memory**: files are streamed in fixed-size chunks
//! - **Fallback Reads**: a memory-mapped read retries files the primary path cannot read
//! - **Best Effort**: unreadable entries are reported and left out, never fatal
//! - **Folder Statistics**: file count and total size of a tree
//!
//! ## Quick Start
//!
//! ```no_run
//! use folderhash::hash::{hash_folder, hash_folder_contents};
//! use std::path::Path;
//!
//! let structural = hash_folder(Path::new("/data/project"), false, "sha256").unwrap();
//! let contents = hash_folder_contents(Path::new("/data/project"), false, "sha256").unwrap();
//!
//! println!("structure + data: {}", structural);
//! println!("data only:        {}", contents);
//! ```
//!
//! ## Options and Diagnostics
//!
//! ```no_run
//! use folderhash::config::{HashAlgorithm, HashOptions};
//! use folderhash::diagnostics::CollectingSink;
//! use folderhash::hash::hash_folder_with;
//! use std::path::Path;
//!
//! let options = HashOptions::structural(HashAlgorithm::Blake2b, true).with_buffer_size(1 << 20);
//! let sink = CollectingSink::new();
//!
//! let result = hash_folder_with(Path::new("/data/project"), &options, &sink).unwrap();
//! println!("{} ({} files, {} skipped)", result.digest, result.files, result.skipped);
//!
//! for event in sink.skipped() {
//!     eprintln!("warning: {}", event);
//! }
//! ```
//!
//! ## Statistics
//!
//! ```no_run
//! use folderhash::fs::get_folder_stats;
//! use std::path::Path;
//!
//! let stats = get_folder_stats(Path::new("/data/project")).unwrap();
//! println!("{} files, {:.2} MB", stats.file_count, stats.total_size_mb);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod fs;
pub mod hash;

// Re-export commonly used types
pub use config::{HashAlgorithm, HashMode, HashOptions};
pub use error::{FolderHashError, Result};
pub use hash::{hash_folder, hash_folder_contents, FolderDigest};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    //! Convenient re-exports for common usage
    //!
    //! ```no_run
    //! use folderhash::prelude::*;
    //! ```

    pub use crate::config::{HashAlgorithm, HashMode, HashOptions};
    pub use crate::diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, TracingSink};
    pub use crate::error::{FolderHashError, Result};
    pub use crate::fs::{get_folder_stats, FolderStats};
    pub use crate::hash::{
        hash_folder, hash_folder_contents, hash_folder_with, hash_folders_parallel,
        hash_single_file, verify_folder, FolderDigest,
    };
}
