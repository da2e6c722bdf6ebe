//! File system module
//!
//! Sorted directory walking for the traversal engine and the folder
//! statistics walk.

mod stats;
mod walk;

pub use stats::*;
pub use walk::*;
