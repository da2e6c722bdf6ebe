//! Folder statistics
//!
//! An observational walk, independent of hashing: counts regular files and
//! sums their sizes.

use crate::error::Result;
use crate::hash::validate_root;
use serde::{Deserialize, Serialize};
use std::path::Path;
use walkdir::WalkDir;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// File count and size totals for a directory tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderStats {
    /// Number of regular files
    pub file_count: u64,
    /// Sum of regular file sizes in bytes
    pub total_size: u64,
    /// `total_size` in mebibytes
    pub total_size_mb: f64,
}

impl FolderStats {
    fn from_totals(file_count: u64, total_size: u64) -> Self {
        Self {
            file_count,
            total_size,
            total_size_mb: total_size as f64 / BYTES_PER_MB,
        }
    }

    /// Human-readable total size
    pub fn human_size(&self) -> String {
        humansize::format_size(self.total_size, humansize::BINARY)
    }
}

/// Count regular files under `path` and sum their sizes.
///
/// Links are not followed. Entries that cannot be listed or whose size
/// cannot be read are skipped without error.
pub fn get_folder_stats(path: &Path) -> Result<FolderStats> {
    validate_root(path)?;

    let mut total_size = 0u64;
    let mut file_count = 0u64;

    for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
        if entry.file_type().is_file() {
            if let Ok(metadata) = entry.metadata() {
                total_size += metadata.len();
                file_count += 1;
            }
        }
    }

    Ok(FolderStats::from_totals(file_count, total_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FolderHashError;
    use tempfile::TempDir;

    #[test]
    fn test_stats_counts_nested_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("file1.txt"), b"Hello, World!").unwrap();
        std::fs::write(dir.path().join("file2.dat"), b"Binary data here").unwrap();
        std::fs::create_dir_all(dir.path().join("subdir2/nested")).unwrap();
        std::fs::write(dir.path().join("subdir2/nested/file4.bin"), b"Deeply nested file").unwrap();

        let stats = get_folder_stats(dir.path()).unwrap();
        assert_eq!(stats.file_count, 3);
        assert_eq!(stats.total_size, 13 + 16 + 18);
        assert!((stats.total_size_mb - 47.0 / BYTES_PER_MB).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stats_empty_folder() {
        let dir = TempDir::new().unwrap();
        let stats = get_folder_stats(dir.path()).unwrap();
        assert_eq!(stats.file_count, 0);
        assert_eq!(stats.total_size, 0);
        assert_eq!(stats.total_size_mb, 0.0);
    }

    #[test]
    fn test_stats_megabytes() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("big.bin"), vec![7u8; 2 * 1024 * 1024]).unwrap();

        let stats = get_folder_stats(dir.path()).unwrap();
        assert_eq!(stats.total_size_mb, 2.0);
        assert!(stats.human_size().contains("MiB"));
    }

    #[test]
    fn test_stats_serialized_keys() {
        let stats = FolderStats::from_totals(2, 1024);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["file_count"], 2);
        assert_eq!(json["total_size"], 1024);
        assert!(json["total_size_mb"].is_f64());
    }

    #[test]
    fn test_stats_requires_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("plain.txt");
        std::fs::write(&file, b"x").unwrap();

        assert!(matches!(get_folder_stats(&file), Err(FolderHashError::NotADirectory(_))));
        assert!(matches!(
            get_folder_stats(&dir.path().join("missing")),
            Err(FolderHashError::NotFound(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_stats_does_not_follow_links() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("real.txt"), b"12345").unwrap();
        std::os::unix::fs::symlink(dir.path().join("real.txt"), dir.path().join("alias.txt")).unwrap();

        let stats = get_folder_stats(dir.path()).unwrap();
        assert_eq!(stats.file_count, 1);
        assert_eq!(stats.total_size, 5);
    }
}
