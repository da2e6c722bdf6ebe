//! Folder hashing
//!
//! A deterministic walk over a directory tree feeding one running digest,
//! with chunked file reads that fall back to a memory-mapped path when the
//! primary read fails.

mod folder;
mod reader;
mod state;

pub use folder::*;
pub(crate) use reader::ContentReader;
pub use reader::StreamingReader;
pub use state::*;
