//! Content-addressed asset store.
//!
//! Writers fill a [`PendingFile`] obtained from [`ContentStore::get_file`];
//! committing it hashes the bytes and registers an immutable [`FileEntry`].
//! Entries are keyed by content hash, so identical payloads are stored once.
//!
//! Two flavours are provided:
//! - [`MemoryStore`]: bytes kept in memory (inline export)
//! - [`DirStore`]: bytes written to `<root>/<hash>.<ext>` (file export)

mod dir;
mod memory;
pub mod mime;

pub use dir::DirStore;
pub use memory::MemoryStore;

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::hash::{ContentHash, ContentHasher};

/// URI scheme used by asset nodes to reference store entries.
pub const REF_SCHEME: &str = "ref://";

// =============================================================================
// Errors
// =============================================================================

/// Content store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("entry kind mismatch: store holds {expected} entries, got {found}")]
    KindMismatch { expected: EntryKind, found: EntryKind },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// EntryKind
// =============================================================================

/// Concrete entry flavour a store produces.
///
/// A block's memoized entry is only reused when its kind matches the store
/// it is being exported into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Bytes held in memory
    Memory,
    /// Bytes persisted to a file
    Disk,
}

impl EntryKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Disk => "disk",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// FileEntry
// =============================================================================

/// Where an entry's bytes live.
#[derive(Debug, Clone)]
pub enum EntryData {
    Bytes(Arc<[u8]>),
    Path(PathBuf),
}

/// Immutable record for bytes written to a store.
#[derive(Debug, Clone)]
pub struct FileEntry {
    hash: ContentHash,
    ext: String,
    mime: String,
    size: u64,
    kind: EntryKind,
    data: EntryData,
}

impl FileEntry {
    pub(crate) fn new(
        hash: ContentHash,
        ext: impl Into<String>,
        mime: impl Into<String>,
        size: u64,
        kind: EntryKind,
        data: EntryData,
    ) -> Self {
        Self {
            hash,
            ext: ext.into(),
            mime: mime.into(),
            size,
            kind,
            data,
        }
    }

    pub fn hash(&self) -> ContentHash {
        self.hash
    }

    pub fn ext(&self) -> &str {
        &self.ext
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Size of the stored bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn data(&self) -> &EntryData {
        &self.data
    }

    /// `ref://<hash>` URI used as the `src` attribute of asset nodes.
    pub fn src(&self) -> String {
        format!("{REF_SCHEME}{}", self.hash)
    }

    /// Canonical file name: `<hash>.<ext>`.
    pub fn file_name(&self) -> String {
        if self.ext.is_empty() {
            self.hash.to_hex()
        } else {
            format!("{}.{}", self.hash, self.ext)
        }
    }

    /// Read the stored bytes back.
    pub fn read_bytes(&self) -> StoreResult<Vec<u8>> {
        match &self.data {
            EntryData::Bytes(bytes) => Ok(bytes.to_vec()),
            EntryData::Path(path) => std::fs::read(path).map_err(|e| io_error(path, e)),
        }
    }
}

// =============================================================================
// PendingFile - byte sink handed to asset writers
// =============================================================================

/// Freshly allocated entry that has not been hashed or registered yet.
///
/// Implements `io::Write`; the hash is computed incrementally as bytes arrive.
pub struct PendingFile {
    ext: String,
    mime: String,
    hasher: ContentHasher,
    buf: Vec<u8>,
}

impl PendingFile {
    pub fn new(ext: impl Into<String>, mime: impl Into<String>) -> Self {
        Self {
            ext: ext.into(),
            mime: mime.into(),
            hasher: ContentHasher::new(),
            buf: Vec::new(),
        }
    }

    pub fn ext(&self) -> &str {
        &self.ext
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Bytes written so far
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consume into (hash, ext, mime, bytes).
    pub(crate) fn finish(self) -> (ContentHash, String, String, Vec<u8>) {
        (self.hasher.finish(), self.ext, self.mime, self.buf)
    }
}

impl io::Write for PendingFile {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.hasher.update(data);
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// =============================================================================
// ContentStore trait
// =============================================================================

/// Content-addressable store consumed by the visitor.
pub trait ContentStore {
    /// Entry flavour produced by this store.
    fn entry_kind(&self) -> EntryKind;

    /// Allocate a fresh, empty entry for the given extension and mime type.
    fn get_file(&mut self, ext: &str, mime: &str) -> PendingFile {
        PendingFile::new(ext, mime)
    }

    /// Hash a filled entry and register it, returning the existing entry when
    /// the same content is already stored.
    fn commit(&mut self, file: PendingFile) -> StoreResult<Arc<FileEntry>>;

    /// Import an existing file as an entry.
    fn load_file(&mut self, path: &Path) -> StoreResult<Arc<FileEntry>>;

    /// Register an entry (idempotent for an already-stored hash).
    fn add_file(&mut self, entry: &Arc<FileEntry>) -> StoreResult<()>;

    /// Look up an entry by hash.
    fn get(&self, hash: &ContentHash) -> Option<Arc<FileEntry>>;

    /// Number of distinct entries held.
    fn files(&self) -> usize;
}

pub(crate) fn io_error(path: &Path, err: io::Error) -> StoreError {
    if err.kind() == io::ErrorKind::NotFound {
        StoreError::NotFound(path.to_path_buf())
    } else {
        StoreError::Io(err)
    }
}

/// Extension of `path` in lowercase, empty when there is none.
pub(crate) fn ext_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default()
}
