//! viewxml - Convert View block trees to XML with content-addressed assets
//!
//! ## Core Concepts
//!
//! **Blocks**: A [`View`] is a tree of [`Block`]s (leaves, containers, text,
//! interactive forms and assets). A view is always the root; it cannot be
//! nested inside another tree.
//!
//! **Visitor**: [`XmlVisitor`] walks the tree once, emitting an [`XmlDocument`]
//! and writing every asset payload to a [`ContentStore`]. Interactive blocks
//! targeting `below`, `side` or `self` are rewritten into explicitly named
//! targets on the way.
//!
//! **Stores**: assets are keyed by a blake3 hash of their bytes, so identical
//! payloads are stored once and referenced as `ref://<hash>`.
//!
//! ## Modules
//! - `block`: source tree (View, Block, Asset, Interactive)
//! - `visit`: the View → XML visitor
//! - `writer`: asset writers and the kind → writer registry
//! - `store`: content stores (in-memory, on-disk)
//! - `node`: XML element tree
//! - `render`: XML serialization
//! - `attr`: attribute system
//!
//! ## Usage
//!
//! ```ignore
//! use viewxml::prelude::*;
//!
//! let view = View::of([
//!     Block::text("Quarterly numbers"),
//!     Asset::plot("<svg/>").into(),
//! ]);
//!
//! let writers = WriterRegistry::with_defaults();
//! let mut store = MemoryStore::new();
//! let doc = XmlVisitor::new(&mut store, &writers).visit(&view)?;
//! println!("{}", doc.to_xml_string(&RenderConfig::PRETTY));
//! ```

#[macro_use]
mod macros;

// =============================================================================
// Modules
// =============================================================================

/// Attribute types
pub mod attr;

/// Content hashing
pub mod hash;

/// Error types
pub mod error;

/// XML node types: XmlDocument, Element, Cdata
pub mod node;

/// XML rendering
pub mod render;

/// Content-addressed asset stores
pub mod store;

/// Asset writers and registry
pub mod writer;

/// Source block tree
pub mod block;

/// View → XML conversion
pub mod visit;

/// Prelude for common imports
pub mod prelude;

// =============================================================================
// Re-exports
// =============================================================================

// Blocks
pub use block::{Asset, AssetKind, Block, Interactive, Payload, TargetMode, View};

// Visitor
pub use visit::{NameStyle, VisitorConfig, XmlVisitor, view_to_xml};

// Writers
pub use writer::{AssetMeta, AssetWriter, WriterRegistry};

// Stores
pub use store::{ContentStore, DirStore, EntryKind, FileEntry, MemoryStore};

// Node types
pub use node::{Element, XmlDocument, XmlNode};

// Render
pub use render::RenderConfig;

// Attribute types
pub use attr::{Attrs, AttrsExt, Tag};

// Hashing
pub use hash::ContentHash;

// Error types
pub use error::{ViewError, ViewResult};
