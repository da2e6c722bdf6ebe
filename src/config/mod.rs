//! Configuration module for FolderHash
//!
//! Provides CLI arguments, algorithm selection and the per-computation
//! hash options.

mod settings;

pub use settings::*;
