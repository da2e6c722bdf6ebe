//! Error types for FolderHash
//!
//! Only precondition failures and single-file operations surface as errors.
//! Per-entry failures during a traversal are reported through
//! [`crate::diagnostics`] instead.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for FolderHash operations
#[derive(Error, Debug)]
pub enum FolderHashError {
    /// I/O error during file operations
    #[error("I/O error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File or directory not found
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// Path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Hash algorithm not supported
    #[error("Unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Both the primary and the fallback read failed for a file
    #[error("Unable to read '{path}': {message}")]
    Unreadable { path: PathBuf, message: String },
}

impl FolderHashError {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// Precondition errors are raised before any hashing work begins
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_)
                | Self::NotADirectory(_)
                | Self::UnsupportedAlgorithm(_)
                | Self::ConfigError(_)
        )
    }

    /// Get the path associated with this error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. }
            | Self::NotFound(path)
            | Self::NotADirectory(path)
            | Self::Unreadable { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Result type alias for FolderHash operations
pub type Result<T> = std::result::Result<T, FolderHashError>;

/// Extension trait for adding path context to std::io::Result
pub trait IoResultExt<T> {
    /// Add path context to an I/O error
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| FolderHashError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_with_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = FolderHashError::io("/test/path", io_err);
        assert_eq!(err.path(), Some(&PathBuf::from("/test/path")));
        assert!(!err.is_precondition());
    }

    #[test]
    fn test_precondition_classification() {
        assert!(FolderHashError::NotFound(PathBuf::from("/x")).is_precondition());
        assert!(FolderHashError::NotADirectory(PathBuf::from("/x")).is_precondition());
        assert!(FolderHashError::UnsupportedAlgorithm("crc32".into()).is_precondition());
        assert!(FolderHashError::UnsupportedAlgorithm("crc32".into()).path().is_none());
    }

    #[test]
    fn test_with_path_extension() {
        let res: std::io::Result<()> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = res.with_path("/locked").unwrap_err();
        assert!(err.to_string().contains("/locked"));
    }

    #[test]
    fn test_unsupported_algorithm_message() {
        let err = FolderHashError::UnsupportedAlgorithm("sha3".into());
        assert_eq!(err.to_string(), "Unsupported hash algorithm: sha3");
    }
}
