//! Streaming file reader
//!
//! Feeds a file into a [`HashState`] in fixed-size chunks. The primary path
//! is a plain read loop over one reused buffer; if it fails at any point the
//! state is rolled back and a memory-mapped read feeds the same bytes in the
//! same chunk size. A file either contributes all of its bytes or none.

use super::HashState;
use crate::config::DEFAULT_BUFFER_SIZE;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::{FolderHashError, Result};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Source of file contents for a traversal.
///
/// Implementations feed `prefix` followed by the file's bytes, or leave
/// `state` untouched on error.
pub(crate) trait ContentReader {
    fn hash_entry(
        &mut self,
        path: &Path,
        prefix: &[u8],
        state: &mut HashState,
        sink: &dyn DiagnosticSink,
    ) -> Result<u64>;
}

/// Chunked reader with a buffer reused across files
#[derive(Debug)]
pub struct StreamingReader {
    chunk_size: usize,
    buffer: Vec<u8>,
}

impl Default for StreamingReader {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_SIZE)
    }
}

impl StreamingReader {
    /// Create a reader; the buffer is allocated on first use
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            buffer: Vec::new(),
        }
    }

    /// Feed the full contents of `path` into `state`.
    ///
    /// Returns the number of bytes fed. On error `state` is exactly as it
    /// was before the call.
    pub fn hash_file(
        &mut self,
        path: &Path,
        state: &mut HashState,
        sink: &dyn DiagnosticSink,
    ) -> Result<u64> {
        self.hash_entry(path, &[], state, sink)
    }

    fn read_primary(&mut self, path: &Path, state: &mut HashState) -> io::Result<u64> {
        let file = open_primary(path)?;
        self.ensure_buffer()?;
        pump(file, &mut self.buffer, state)
    }

    fn ensure_buffer(&mut self) -> io::Result<()> {
        if self.buffer.len() == self.chunk_size {
            return Ok(());
        }

        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(self.chunk_size)
            .map_err(|e| io::Error::new(io::ErrorKind::OutOfMemory, e))?;
        buffer.resize(self.chunk_size, 0);
        self.buffer = buffer;
        Ok(())
    }
}

impl ContentReader for StreamingReader {
    /// `prefix` is fed inside each attempt, so it is committed together
    /// with the contents.
    fn hash_entry(
        &mut self,
        path: &Path,
        prefix: &[u8],
        state: &mut HashState,
        sink: &dyn DiagnosticSink,
    ) -> Result<u64> {
        let primary = attempt(state, |scratch| {
            scratch.update(prefix);
            self.read_primary(path, scratch)
        });

        match primary {
            Ok(bytes) => Ok(bytes),
            Err(primary_err) => {
                sink.report(Diagnostic::PrimaryReadFailed {
                    path: path.to_path_buf(),
                    message: primary_err.to_string(),
                });

                let chunk_size = self.chunk_size;
                attempt(state, |scratch| {
                    scratch.update(prefix);
                    read_mapped(path, chunk_size, scratch)
                })
                .map_err(|fallback_err| FolderHashError::Unreadable {
                    path: path.to_path_buf(),
                    message: format!("{}; fallback: {}", primary_err, fallback_err),
                })
            }
        }
    }
}

/// Run one read strategy against a snapshot of `state`, committing only on
/// success.
fn attempt<F>(state: &mut HashState, read: F) -> io::Result<u64>
where
    F: FnOnce(&mut HashState) -> io::Result<u64>,
{
    let mut scratch = state.clone();
    let bytes = read(&mut scratch)?;
    *state = scratch;
    Ok(bytes)
}

/// Read chunks until a zero-length read, feeding each one immediately
pub(crate) fn pump<R: Read>(mut reader: R, buffer: &mut [u8], state: &mut HashState) -> io::Result<u64> {
    let mut total = 0u64;

    loop {
        let bytes_read = match reader.read(buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };

        state.update(&buffer[..bytes_read]);
        total += bytes_read as u64;
    }

    Ok(total)
}

/// Open without updating the access time where the platform allows it.
///
/// `O_NOATIME` is refused for files the caller does not own; those are
/// opened normally instead.
#[cfg(target_os = "linux")]
fn open_primary(path: &Path) -> io::Result<File> {
    use std::fs::OpenOptions;
    use std::os::unix::fs::OpenOptionsExt;

    match OpenOptions::new()
        .read(true)
        .custom_flags(libc::O_NOATIME)
        .open(path)
    {
        Err(e) if noatime_refused(&e) => File::open(path),
        opened => opened,
    }
}

#[cfg(target_os = "linux")]
fn noatime_refused(err: &io::Error) -> bool {
    err.raw_os_error() == Some(libc::EPERM)
}

#[cfg(not(target_os = "linux"))]
fn open_primary(path: &Path) -> io::Result<File> {
    File::open(path)
}

fn read_mapped(path: &Path, chunk_size: usize, state: &mut HashState) -> io::Result<u64> {
    use memmap2::Mmap;

    let file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Ok(0);
    }

    // SAFETY: the mapping is read-only and dropped before returning.
    let mmap = unsafe { Mmap::map(&file) }?;
    for chunk in mmap.chunks(chunk_size) {
        state.update(chunk);
    }

    Ok(mmap.len() as u64)
}
