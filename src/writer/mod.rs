//! Asset writers.
//!
//! A writer knows how to turn one asset kind's payload into bytes: it reports
//! the (extension, mime) of the output and serializes into the store's sink.
//! The [`WriterRegistry`] maps asset kinds to writers; it is built once and
//! handed to the visitor.

mod builtin;

pub use builtin::{AttachmentWriter, DataTableWriter, HtmlTableWriter, PlotWriter};

use std::fmt;
use std::io::{self, Write};

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::block::{AssetKind, Payload};

// =============================================================================
// AssetMeta
// =============================================================================

/// File extension and mime type of a serialized payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetMeta {
    pub ext: String,
    pub mime: String,
}

impl AssetMeta {
    pub fn new(ext: impl Into<String>, mime: impl Into<String>) -> Self {
        Self {
            ext: ext.into(),
            mime: mime.into(),
        }
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Errors raised by asset writers
#[derive(Debug, Error)]
pub enum WriteError {
    /// The writer does not handle this payload type
    #[error("{0} payload not supported")]
    Unsupported(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for writer operations
pub type WriteResult<T> = Result<T, WriteError>;

// =============================================================================
// AssetWriter trait
// =============================================================================

/// Serializes payloads of one asset kind.
pub trait AssetWriter: Send + Sync {
    /// Extension and mime type the payload will be written as.
    fn get_meta(&self, payload: &Payload) -> WriteResult<AssetMeta>;

    /// Serialize the payload into `sink`.
    fn write_file(&self, payload: &Payload, sink: &mut dyn Write) -> WriteResult<()>;
}

// =============================================================================
// WriterRegistry
// =============================================================================

/// Maps asset kinds to their writers.
pub struct WriterRegistry {
    writers: FxHashMap<AssetKind, Box<dyn AssetWriter>>,
}

impl WriterRegistry {
    /// Registry with no writers.
    pub fn empty() -> Self {
        Self {
            writers: FxHashMap::default(),
        }
    }

    /// Registry with the built-in writers for Plot, Table, DataTable and
    /// Attachment.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(AssetKind::Plot, PlotWriter);
        registry.register(AssetKind::Table, HtmlTableWriter);
        registry.register(AssetKind::DataTable, DataTableWriter);
        registry.register(AssetKind::Attachment, AttachmentWriter);
        registry
    }

    /// Register (or replace) the writer for `kind`, returning the previous one.
    pub fn register<W>(&mut self, kind: AssetKind, writer: W) -> Option<Box<dyn AssetWriter>>
    where
        W: AssetWriter + 'static,
    {
        self.writers.insert(kind, Box::new(writer))
    }

    /// Look up the writer for `kind`.
    pub fn get(&self, kind: &AssetKind) -> Option<&dyn AssetWriter> {
        self.writers.get(kind).map(|w| w.as_ref())
    }

    pub fn contains(&self, kind: &AssetKind) -> bool {
        self.writers.contains_key(kind)
    }

    pub fn len(&self) -> usize {
        self.writers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writers.is_empty()
    }
}

impl Default for WriterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for WriterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.writers.keys().map(AssetKind::tag).collect();
        kinds.sort_unstable();
        f.debug_struct("WriterRegistry").field("kinds", &kinds).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullWriter;

    impl AssetWriter for NullWriter {
        fn get_meta(&self, _: &Payload) -> WriteResult<AssetMeta> {
            Ok(AssetMeta::new("bin", "application/octet-stream"))
        }

        fn write_file(&self, _: &Payload, _: &mut dyn Write) -> WriteResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_defaults() {
        let registry = WriterRegistry::with_defaults();
        assert_eq!(registry.len(), 4);
        assert!(registry.contains(&AssetKind::Plot));
        assert!(registry.contains(&AssetKind::Attachment));
        assert!(!registry.contains(&AssetKind::Custom("Map".into())));
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = WriterRegistry::empty();
        assert!(registry.is_empty());
        assert!(registry.register(AssetKind::Custom("Map".into()), NullWriter).is_none());
        assert!(registry.register(AssetKind::Custom("Map".into()), NullWriter).is_some());
        assert_eq!(registry.len(), 1);

        let writer = registry.get(&AssetKind::Custom("Map".into())).unwrap();
        let meta = writer.get_meta(&Payload::Text(String::new())).unwrap();
        assert_eq!(meta.ext, "bin");
    }

    #[test]
    fn test_debug_lists_kinds() {
        let debug = format!("{:?}", WriterRegistry::with_defaults());
        assert_eq!(
            debug,
            r#"WriterRegistry { kinds: ["Attachment", "DataTable", "Plot", "Table"] }"#
        );
    }

    #[test]
    fn test_registry_is_send_sync() {
        static_assertions::assert_impl_all!(WriterRegistry: Send, Sync);
    }
}
