//! Prelude module for common imports.
//!
//! ```ignore
//! use viewxml::prelude::*;
//! ```

// Blocks
pub use crate::block::{
    Asset, AssetKind, Block, Container, Control, Controls, Interactive, Leaf, Payload,
    SCHEMA_VERSION, TableData, TargetMode, Text, Trigger, View,
};

// Visitor
pub use crate::visit::{NameStyle, VisitorConfig, XmlVisitor, view_to_xml};

// Writers
pub use crate::writer::{AssetMeta, AssetWriter, WriteError, WriteResult, WriterRegistry};

// Stores
pub use crate::store::{
    ContentStore, DirStore, EntryData, EntryKind, FileEntry, MemoryStore, PendingFile, StoreError,
    StoreResult,
};

// Node types
pub use crate::node::{Cdata, Children, Element, XmlDocument, XmlNode};

// Render
pub use crate::render::{RenderConfig, render_document, render_document_bytes};

// Attributes
pub use crate::attr::{Attrs, AttrsExt, Tag};

// Hashing
pub use crate::hash::{ContentHash, ContentHasher};

// Error
pub use crate::error::{ViewError, ViewResult};
