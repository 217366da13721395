//! File hand-off store - the single slot a file rides in between tools.
//!
//! The store holds at most one in-flight file plus the slug of the tool
//! that produced it. It is the one piece of session-wide mutable state:
//! any tool view may read or overwrite it, and the newest write always
//! supersedes older ones. There is no queue and no consume-once semantics.
//!
//! The store is an injected object owned by the session, never a process
//! global, so tests can instantiate independent stores per case. Internally
//! it wraps a `tokio::sync::watch` channel: writes are synchronous, readers
//! always observe the most recent completed write, and subscribed views can
//! wait for changes when they want to re-render.

use bytes::Bytes;
use tokio::sync::watch;
use tracing::debug;

/// A single binary file riding between tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// File name, including extension.
    pub name: String,

    /// MIME type. Advisory only; validation is the receiving tool's job.
    pub mime: String,

    /// File content. `Bytes` keeps clones cheap while the file sits in the
    /// shared slot.
    pub bytes: Bytes,
}

impl StoredFile {
    /// Create a file from raw bytes, guessing the MIME type from the name.
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let name = name.into();
        let mime = mime_for_name(&name).to_string();
        Self {
            name,
            mime,
            bytes: bytes.into(),
        }
    }

    /// Create a UTF-8 text file.
    pub fn text(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self::new(name, contents.into().into_bytes())
    }

    /// Interpret the content as UTF-8 text, if it is.
    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }

    /// File size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the file has no content.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The file name without its extension.
    pub fn stem(&self) -> &str {
        self.name.rsplit_once('.').map_or(self.name.as_str(), |(stem, _)| stem)
    }

    /// The file extension, if any.
    pub fn extension(&self) -> Option<&str> {
        self.name.rsplit_once('.').map(|(_, ext)| ext)
    }
}

/// Guess a MIME type from a file name extension.
pub fn mime_for_name(name: &str) -> &'static str {
    match name.rsplit_once('.').map(|(_, ext)| ext) {
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        Some("html") | Some("htm") => "text/html",
        Some("json") => "application/json",
        Some("csv") => "text/csv",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// The (file, source tool) pair currently in flight.
///
/// The two fields are always set or cleared together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandoffState {
    /// The file being carried, if any.
    pub file: Option<StoredFile>,

    /// Slug of the tool that produced `file`. Present iff `file` is.
    pub source_tool: Option<String>,
}

impl HandoffState {
    /// Whether a hand-off is currently in flight.
    pub fn is_active(&self) -> bool {
        self.file.is_some()
    }
}

/// Session-scoped holder of the in-flight hand-off pair.
pub struct HandoffStore {
    state: watch::Sender<HandoffState>,
}

impl HandoffStore {
    /// Create an empty store.
    pub fn new() -> Self {
        let (state, _) = watch::channel(HandoffState::default());
        Self { state }
    }

    /// Establish a hand-off: store the file and the slug of the tool that
    /// produced it in a single write, so no reader can ever observe one
    /// half of the pair without the other.
    pub fn begin_handoff(&self, file: StoredFile, source_tool: impl Into<String>) {
        let source_tool = source_tool.into();
        debug!(file = %file.name, source = %source_tool, "beginning hand-off");
        self.state.send_replace(HandoffState {
            file: Some(file),
            source_tool: Some(source_tool),
        });
    }

    /// Replace the stored file unconditionally. No validation of type or
    /// size; that is the receiving tool's responsibility. Passing `None`
    /// also drops the source tool, keeping the pair invariant.
    pub fn set_file(&self, file: Option<StoredFile>) {
        self.state.send_modify(|state| {
            if file.is_none() {
                state.source_tool = None;
            }
            state.file = file;
        });
    }

    /// Clear both fields in one operation. Idempotent.
    pub fn clear_context(&self) {
        self.state.send_replace(HandoffState::default());
    }

    /// Snapshot of the current pair.
    pub fn snapshot(&self) -> HandoffState {
        self.state.borrow().clone()
    }

    /// The file currently in flight, if any.
    pub fn file(&self) -> Option<StoredFile> {
        self.state.borrow().file.clone()
    }

    /// The slug of the tool that produced the current file, if any.
    pub fn source_tool(&self) -> Option<String> {
        self.state.borrow().source_tool.clone()
    }

    /// Subscribe to state changes. The receiver always starts at the most
    /// recent completed write.
    pub fn subscribe(&self) -> watch::Receiver<HandoffState> {
        self.state.subscribe()
    }
}

impl Default for HandoffStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HandoffStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("HandoffStore")
            .field("file", &state.file.as_ref().map(|file| &file.name))
            .field("source_tool", &state.source_tool)
            .finish()
    }
}
