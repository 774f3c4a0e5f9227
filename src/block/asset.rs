//! Asset blocks: payloads extracted into the content store.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::attr::{Attrs, AttrsExt, Tag};
use crate::store::FileEntry;

// =============================================================================
// AssetKind
// =============================================================================

/// Kind of asset block; selects the writer used to serialize its payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Plot,
    Table,
    DataTable,
    Attachment,
    /// User-defined kind; the string is also its tag name
    Custom(Tag),
}

impl AssetKind {
    /// Tag name of blocks of this kind
    pub fn tag(&self) -> &str {
        match self {
            Self::Plot => "Plot",
            Self::Table => "Table",
            Self::DataTable => "DataTable",
            Self::Attachment => "Attachment",
            Self::Custom(tag) => tag.as_str(),
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// =============================================================================
// Payload
// =============================================================================

/// Tabular data: a header row and string cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableData {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    pub fn new<C, S>(columns: C) -> Self
    where
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row (builder)
    pub fn row<R, S>(mut self, cells: R) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }
}

/// Inline data carried by an asset block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// SVG document
    Svg(String),
    /// HTML fragment
    Html(String),
    /// Tabular data
    Table(TableData),
    /// Opaque bytes, optionally with the original file name
    Bytes { data: Vec<u8>, name: Option<String> },
    /// Plain text
    Text(String),
}

impl Payload {
    /// Type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Svg(_) => "Svg",
            Self::Html(_) => "Html",
            Self::Table(_) => "Table",
            Self::Bytes { .. } => "Bytes",
            Self::Text(_) => "Text",
        }
    }
}

// =============================================================================
// Asset
// =============================================================================

/// Block whose content lives in the content store.
///
/// Holds either inline data or a file reference (inline data wins when both
/// are set). `prev_entry` caches the entry this block was last written to so
/// repeated conversions of the same tree skip re-serialization. The cache is
/// owned by this block only; clones start with an empty cache.
///
/// Content is only reachable through setters, and every setter drops the
/// cache, so a cached entry always describes the current content.
#[derive(Debug)]
pub struct Asset {
    kind: AssetKind,
    data: Option<Payload>,
    file: Option<PathBuf>,
    pub attrs: Attrs,
    pub caption: Option<String>,
    prev_entry: Mutex<Option<Arc<FileEntry>>>,
}

impl Asset {
    /// Asset with no content yet
    pub fn new(kind: AssetKind) -> Self {
        Self {
            kind,
            attrs: Vec::new(),
            data: None,
            file: None,
            caption: None,
            prev_entry: Mutex::new(None),
        }
    }

    /// Asset holding inline data
    pub fn with_data(kind: AssetKind, data: Payload) -> Self {
        Self {
            data: Some(data),
            ..Self::new(kind)
        }
    }

    /// Asset referencing a file on disk
    pub fn with_file(kind: AssetKind, path: impl Into<PathBuf>) -> Self {
        Self {
            file: Some(path.into()),
            ..Self::new(kind)
        }
    }

    /// SVG plot
    pub fn plot(svg: impl Into<String>) -> Self {
        Self::with_data(AssetKind::Plot, Payload::Svg(svg.into()))
    }

    /// Table rendered to HTML
    pub fn table(data: TableData) -> Self {
        Self::with_data(AssetKind::Table, Payload::Table(data))
    }

    /// Interactive data table, stored as CSV
    pub fn data_table(data: TableData) -> Self {
        Self::with_data(AssetKind::DataTable, Payload::Table(data))
    }

    /// Downloadable attachment
    pub fn attachment(data: impl Into<Vec<u8>>, name: impl Into<String>) -> Self {
        Self::with_data(
            AssetKind::Attachment,
            Payload::Bytes {
                data: data.into(),
                name: Some(name.into()),
            },
        )
    }

    /// Set the caption (builder)
    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Set an attribute (builder)
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set_attr(name, value);
        self
    }

    /// Tag name, derived from the kind
    pub fn tag(&self) -> &str {
        self.kind.tag()
    }

    pub fn kind(&self) -> &AssetKind {
        &self.kind
    }

    /// Inline payload, if any
    pub fn data(&self) -> Option<&Payload> {
        self.data.as_ref()
    }

    /// Referenced file, if any
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Replace the inline payload.
    pub fn set_data(&mut self, data: Payload) {
        self.data = Some(data);
        self.clear_prev_entry();
    }

    /// Point the block at a file on disk.
    pub fn set_file(&mut self, path: impl Into<PathBuf>) {
        self.file = Some(path.into());
        self.clear_prev_entry();
    }

    /// Drop both inline payload and file reference.
    pub fn clear_content(&mut self) {
        self.data = None;
        self.file = None;
        self.clear_prev_entry();
    }

    /// File-specific attributes contributed by this asset.
    ///
    /// These take precedence over `attrs` when both define a key.
    pub fn file_attrs(&self) -> Attrs {
        let mut attrs = Attrs::new();
        match (&self.kind, &self.data) {
            (AssetKind::DataTable, Some(Payload::Table(t))) => {
                attrs.set_attr("rows", t.num_rows().to_string());
                attrs.set_attr("columns", t.num_columns().to_string());
            }
            (AssetKind::Attachment, Some(Payload::Bytes { name: Some(name), .. })) => {
                attrs.set_attr("filename", name.as_str());
            }
            (AssetKind::Attachment, None) => {
                if let Some(name) = self.file.as_deref().and_then(file_name) {
                    attrs.set_attr("filename", name);
                }
            }
            _ => {}
        }
        attrs
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Entry cache
    // ─────────────────────────────────────────────────────────────────────────

    /// Entry this block was last written to, if any
    pub fn prev_entry(&self) -> Option<Arc<FileEntry>> {
        self.prev_entry.lock().clone()
    }

    /// Record the entry this block was written to
    pub fn set_prev_entry(&self, entry: Arc<FileEntry>) {
        *self.prev_entry.lock() = Some(entry);
    }

    /// Forget the cached entry, forcing the next conversion to rewrite
    pub fn clear_prev_entry(&self) {
        self.prev_entry.lock().take();
    }
}

impl Clone for Asset {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            attrs: self.attrs.clone(),
            data: self.data.clone(),
            file: self.file.clone(),
            caption: self.caption.clone(),
            prev_entry: Mutex::new(None),
        }
    }
}

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}
