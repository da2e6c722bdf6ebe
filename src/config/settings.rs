//! Configuration settings for FolderHash
//!
//! Defines the CLI arguments, the hash algorithm and mode enums, and the
//! per-computation options the traversal engine runs with.

use crate::error::{FolderHashError, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Chunk size used by the streaming reader unless overridden
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// FolderHash - deterministic digests of directory trees
#[derive(Parser, Debug, Clone)]
#[command(name = "folderhash")]
#[command(author = "FolderHash Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Deterministic digests of directory trees")]
#[command(long_about = r#"
FolderHash produces a single reproducible digest for a directory tree.

Modes:
  structural      relative paths and file contents (default)
  contents-only   file contents only, in sorted traversal order

Unreadable entries are reported as warnings and left out of the digest.

Examples:
  folderhash hash ./project                      # SHA-256 over layout + data
  folderhash hash ./a ./b -a md5 --contents-only # Two roots, contents only
  folderhash verify ./project <DIGEST>           # Exit 1 on mismatch
  folderhash stats ./project                     # File count and total size
"#)]
pub struct CliArgs {
    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (only errors are logged)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Output format for results
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub output_format: OutputFormat,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Hashing flags shared by `hash` and `verify`
#[derive(Args, Debug, Clone)]
pub struct HashArgs {
    /// Hash algorithm
    #[arg(short = 'a', long, value_enum, default_value = "sha256", value_name = "ALGO")]
    pub algorithm: HashAlgorithm,

    /// Follow symbolic links
    #[arg(short = 'L', long)]
    pub follow_links: bool,

    /// Hash file contents only, ignoring paths
    #[arg(long)]
    pub contents_only: bool,

    /// Read buffer size (e.g., 64K, 1M)
    #[arg(short = 'b', long, default_value = "64K", value_name = "SIZE")]
    pub buffer_size: String,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compute the digest of one or more directories
    #[command(name = "hash")]
    Hash {
        /// Directories to hash
        #[arg(required = true, value_name = "PATH")]
        paths: Vec<PathBuf>,
        #[command(flatten)]
        opts: HashArgs,
    },

    /// Recompute a directory digest and compare it with an expected value
    #[command(name = "verify")]
    Verify {
        /// Directory to verify
        path: PathBuf,
        /// Expected hex digest
        expected: String,
        #[command(flatten)]
        opts: HashArgs,
    },

    /// Show file count and total size of a directory
    #[command(name = "stats")]
    Stats {
        /// Directory to inspect
        path: PathBuf,
    },

    /// Compute the digest of a single file
    #[command(name = "file")]
    File {
        /// File to hash
        path: PathBuf,
        /// Hash algorithm
        #[arg(short = 'a', long, value_enum, default_value = "sha256")]
        algorithm: HashAlgorithm,
    },

    /// List supported hash algorithms
    #[command(name = "algorithms")]
    Algorithms,
}

/// Hash algorithm used for the running digest
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// SHA-256 (256-bit)
    #[default]
    #[value(name = "sha256")]
    Sha256,
    /// MD5 (128-bit, not collision resistant)
    #[value(name = "md5")]
    Md5,
    /// SHA-1 (160-bit, not collision resistant)
    #[value(name = "sha1")]
    Sha1,
    /// BLAKE2b with its default 512-bit output
    #[value(name = "blake2b")]
    Blake2b,
}

impl HashAlgorithm {
    /// Every supported algorithm, in display order
    pub fn all() -> [HashAlgorithm; 4] {
        [Self::Sha256, Self::Md5, Self::Sha1, Self::Blake2b]
    }

    /// Map an algorithm name to its algorithm.
    ///
    /// Matching is exact and case-sensitive. Nothing touches the filesystem
    /// here, so a bad name fails before any traversal work.
    pub fn select(name: &str) -> Result<Self> {
        match name {
            "sha256" => Ok(Self::Sha256),
            "md5" => Ok(Self::Md5),
            "sha1" => Ok(Self::Sha1),
            "blake2b" => Ok(Self::Blake2b),
            other => Err(FolderHashError::UnsupportedAlgorithm(other.to_string())),
        }
    }

    /// Get the digest size in bytes
    pub fn output_size(&self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Md5 => 16,
            Self::Sha1 => 20,
            Self::Blake2b => 64,
        }
    }

    /// Canonical lowercase name, as accepted by [`HashAlgorithm::select`]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Blake2b => "blake2b",
        }
    }

    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sha256 => "SHA-256",
            Self::Md5 => "MD5",
            Self::Sha1 => "SHA-1",
            Self::Blake2b => "BLAKE2b",
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = FolderHashError;

    fn from_str(s: &str) -> Result<Self> {
        Self::select(s)
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the traversal feeds into the digest besides file contents
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum HashMode {
    /// Relative paths of every entry, then file contents
    #[default]
    Structural,
    /// File contents only; paths never reach the digest
    ContentsOnly,
}

impl HashMode {
    /// Whether relative paths are fed into the digest
    pub fn emits_paths(&self) -> bool {
        matches!(self, Self::Structural)
    }
}

/// Output format for results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON format
    Json,
}

/// Options for one hash computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashOptions {
    /// Hash algorithm
    pub algorithm: HashAlgorithm,
    /// Path-emission policy
    pub mode: HashMode,
    /// Traverse symbolic links instead of skipping them
    pub follow_links: bool,
    /// Chunk size for file reads in bytes
    pub buffer_size: usize,
}

impl Default for HashOptions {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::Sha256,
            mode: HashMode::Structural,
            follow_links: false,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl HashOptions {
    /// Structural-mode options with the given algorithm and link policy
    pub fn structural(algorithm: HashAlgorithm, follow_links: bool) -> Self {
        Self {
            algorithm,
            follow_links,
            ..Default::default()
        }
    }

    /// Content-only options with the given algorithm and link policy
    pub fn contents_only(algorithm: HashAlgorithm, follow_links: bool) -> Self {
        Self {
            algorithm,
            follow_links,
            mode: HashMode::ContentsOnly,
            ..Default::default()
        }
    }

    /// Set the read buffer size
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Check the options before any filesystem access
    pub fn validate(&self) -> Result<()> {
        if self.buffer_size == 0 {
            return Err(FolderHashError::config("buffer size must be greater than zero"));
        }
        Ok(())
    }

    /// Create options from CLI arguments
    pub fn from_args(args: &HashArgs) -> Result<Self> {
        let buffer_size = parse_size(&args.buffer_size)
            .map_err(|e| FolderHashError::config(format!("Invalid buffer size: {}", e)))?
            as usize;

        let options = Self {
            algorithm: args.algorithm,
            mode: if args.contents_only {
                HashMode::ContentsOnly
            } else {
                HashMode::Structural
            },
            follow_links: args.follow_links,
            buffer_size,
        };
        options.validate()?;
        Ok(options)
    }
}

/// Parse human-readable size string to bytes
pub fn parse_size(size: &str) -> std::result::Result<u64, String> {
    let size = size.trim().to_uppercase();

    if size.is_empty() {
        return Err("Empty size string".to_string());
    }

    let (num_str, multiplier) = if size.ends_with("GB") || size.ends_with('G') {
        (size.trim_end_matches(|c| c == 'G' || c == 'B'), 1024u64 * 1024 * 1024)
    } else if size.ends_with("MB") || size.ends_with('M') {
        (size.trim_end_matches(|c| c == 'M' || c == 'B'), 1024u64 * 1024)
    } else if size.ends_with("KB") || size.ends_with('K') {
        (size.trim_end_matches(|c| c == 'K' || c == 'B'), 1024u64)
    } else if size.ends_with('B') {
        (size.trim_end_matches('B'), 1u64)
    } else {
        // Assume bytes if no suffix
        (size.as_str(), 1u64)
    };

    let num: f64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("Invalid number: {}", num_str))?;

    if num < 0.0 {
        return Err(format!("Negative size: {}", num_str));
    }

    Ok((num * multiplier as f64) as u64)
}
