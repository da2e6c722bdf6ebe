//! Diagnostic events and the sinks that receive them

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A failure the traversal recovered from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A directory could not be listed; its subtree contributes nothing
    ListFailed { path: PathBuf, message: String },
    /// The primary read failed and the fallback path is being tried
    PrimaryReadFailed { path: PathBuf, message: String },
    /// Both read paths failed; the file is excluded from the digest
    FileSkipped { path: PathBuf, message: String },
    /// One entry of a listing could not be inspected; its siblings are unaffected
    EntryFailed { path: PathBuf, message: String },
    /// A followed symlink does not resolve
    DanglingSymlink { path: PathBuf, message: String },
    /// A followed symlink leads back to one of its ancestors
    SymlinkCycle { path: PathBuf, target: PathBuf },
    /// Neither a regular file nor a directory (fifo, socket, device)
    SpecialFileSkipped { path: PathBuf },
}

impl Diagnostic {
    /// The entry this event is about
    pub fn path(&self) -> &Path {
        match self {
            Self::ListFailed { path, .. }
            | Self::PrimaryReadFailed { path, .. }
            | Self::FileSkipped { path, .. }
            | Self::EntryFailed { path, .. }
            | Self::DanglingSymlink { path, .. }
            | Self::SymlinkCycle { path, .. }
            | Self::SpecialFileSkipped { path } => path,
        }
    }

    /// Whether the entry was left out of the digest
    pub fn is_skip(&self) -> bool {
        !matches!(self, Self::PrimaryReadFailed { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ListFailed { path, message } => {
                write!(f, "cannot list '{}': {}", path.display(), message)
            }
            Self::PrimaryReadFailed { path, message } => {
                write!(f, "primary read of '{}' failed, retrying: {}", path.display(), message)
            }
            Self::FileSkipped { path, message } => {
                write!(f, "cannot read '{}': {}", path.display(), message)
            }
            Self::EntryFailed { path, message } => {
                write!(f, "cannot inspect '{}': {}", path.display(), message)
            }
            Self::DanglingSymlink { path, message } => {
                write!(f, "dangling symlink '{}': {}", path.display(), message)
            }
            Self::SymlinkCycle { path, target } => {
                write!(f, "symlink cycle at '{}' -> '{}'", path.display(), target.display())
            }
            Self::SpecialFileSkipped { path } => {
                write!(f, "skipping special file '{}'", path.display())
            }
        }
    }
}

/// Receiver for diagnostic events
pub trait DiagnosticSink: Send + Sync {
    /// Handle one event
    fn report(&self, event: Diagnostic);
}

/// Default sink: forwards events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, event: Diagnostic) {
        match &event {
            Diagnostic::PrimaryReadFailed { .. } | Diagnostic::SpecialFileSkipped { .. } => {
                tracing::debug!(path = %event.path().display(), "{}", event);
            }
            _ => {
                tracing::warn!(path = %event.path().display(), "{}", event);
            }
        }
    }
}

/// Sink that keeps every event in memory
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    /// Create an empty collecting sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far
    pub fn events(&self) -> Vec<Diagnostic> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Events that left an entry out of the digest
    pub fn skipped(&self) -> Vec<Diagnostic> {
        self.events().into_iter().filter(Diagnostic::is_skip).collect()
    }

    /// Number of events received
    pub fn len(&self) -> usize {
        self.events.lock().map(|events| events.len()).unwrap_or(0)
    }

    /// Whether nothing was reported
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, event: Diagnostic) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

/// Forward to a sink and also log through `tracing`
pub struct TeeSink<'a> {
    inner: &'a dyn DiagnosticSink,
}

impl<'a> TeeSink<'a> {
    /// Wrap a sink
    pub fn new(inner: &'a dyn DiagnosticSink) -> Self {
        Self { inner }
    }
}

impl DiagnosticSink for TeeSink<'_> {
    fn report(&self, event: Diagnostic) {
        TracingSink.report(event.clone());
        self.inner.report(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_sink_records_in_order() {
        let sink = CollectingSink::new();
        assert!(sink.is_empty());

        sink.report(Diagnostic::ListFailed {
            path: PathBuf::from("/a"),
            message: "denied".into(),
        });
        sink.report(Diagnostic::PrimaryReadFailed {
            path: PathBuf::from("/b"),
            message: "busy".into(),
        });

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].path(), Path::new("/a"));
        assert_eq!(events[1].path(), Path::new("/b"));
        assert_eq!(sink.skipped().len(), 1);
    }

    #[test]
    fn test_diagnostic_display() {
        let event = Diagnostic::FileSkipped {
            path: PathBuf::from("/x/y.bin"),
            message: "Permission denied".into(),
        };
        assert_eq!(event.to_string(), "cannot read '/x/y.bin': Permission denied");
        assert!(event.is_skip());

        let vanished = Diagnostic::EntryFailed {
            path: PathBuf::from("/x/gone"),
            message: "No such file or directory".into(),
        };
        assert_eq!(vanished.to_string(), "cannot inspect '/x/gone': No such file or directory");
        assert!(vanished.is_skip());
    }

    #[test]
    fn test_diagnostic_serializes_with_kind() {
        let event = Diagnostic::SpecialFileSkipped {
            path: PathBuf::from("/dev/fifo"),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "special_file_skipped");
        assert_eq!(json["path"], "/dev/fifo");
    }

    #[test]
    fn test_tee_sink_forwards() {
        let inner = CollectingSink::new();
        let tee = TeeSink::new(&inner);
        tee.report(Diagnostic::SpecialFileSkipped {
            path: PathBuf::from("/s"),
        });
        assert_eq!(inner.len(), 1);
    }
}
