//! View → XML conversion.
//!
//! [`XmlVisitor`] walks a [`View`] depth-first in one pass and produces an
//! [`XmlDocument`]. Asset blocks are written to the content store as they are
//! met, so structural output and asset extraction stay in lockstep.
//!
//! Each container converts its children into a fresh collector that is then
//! wrapped into the container's own element; no output state is shared
//! between sibling subtrees.
//!
//! # Usage
//!
//! ```ignore
//! let writers = WriterRegistry::with_defaults();
//! let mut store = MemoryStore::new();
//! let doc = XmlVisitor::new(&mut store, &writers).visit(&view)?;
//! let xml = doc.to_xml_string(&RenderConfig::COMPACT);
//! ```

mod names;

pub use names::NameStyle;

use std::sync::Arc;

use tracing::{debug, trace};

use crate::attr::{Attrs, AttrsExt, bool_attr};
use crate::block::{Asset, AssetKind, Block, Container, Interactive, Payload, TargetMode, View};
use crate::error::{ViewError, ViewResult};
use crate::node::{Children, Element, XmlDocument};
use crate::render::RenderConfig;
use crate::store::{ContentStore, FileEntry};
use crate::writer::{WriteError, WriterRegistry};

use names::NameGen;

/// Tag of the document root element.
pub const ROOT_TAG: &str = "View";

// =============================================================================
// VisitorConfig
// =============================================================================

/// Configuration for view conversion.
#[derive(Debug, Clone, Default)]
pub struct VisitorConfig {
    /// How target names for desugared interactive blocks are generated.
    pub names: NameStyle,
}

impl VisitorConfig {
    /// Random target names (default).
    pub const RANDOM: Self = Self {
        names: NameStyle::Random,
    };

    /// Sequential target names `x1`, `x2`, ..., for reproducible output.
    pub fn reproducible() -> Self {
        Self {
            names: NameStyle::sequential("x"),
        }
    }

    /// Set the name style.
    pub fn with_names(mut self, names: NameStyle) -> Self {
        self.names = names;
        self
    }
}

// =============================================================================
// XmlVisitor
// =============================================================================

/// Converts views to XML, extracting assets into a content store.
///
/// A visitor can be reused for several views; target names stay unique
/// across all of them.
pub struct XmlVisitor<'a, S: ContentStore + ?Sized> {
    store: &'a mut S,
    writers: &'a WriterRegistry,
    names: NameGen,
}

impl<'a, S: ContentStore + ?Sized> XmlVisitor<'a, S> {
    /// Create a visitor with the default configuration.
    pub fn new(store: &'a mut S, writers: &'a WriterRegistry) -> Self {
        Self::with_config(store, writers, &VisitorConfig::default())
    }

    /// Create a visitor with an explicit configuration.
    pub fn with_config(
        store: &'a mut S,
        writers: &'a WriterRegistry,
        config: &VisitorConfig,
    ) -> Self {
        Self {
            store,
            writers,
            names: NameGen::new(config.names.clone()),
        }
    }

    /// Number of entries currently in the store.
    pub fn store_count(&self) -> usize {
        self.store.files()
    }

    /// Number of target names generated so far.
    pub fn names_issued(&self) -> u64 {
        self.names.issued()
    }

    /// Convert a view into a document rooted at `<View>`.
    ///
    /// Any failure aborts the whole conversion; no partial document is
    /// returned.
    pub fn visit(&mut self, view: &View) -> ViewResult<XmlDocument> {
        debug!(fragment = view.fragment, "converting view to XML");

        let mut out = Children::new();
        self.visit_block(&view.root, &mut out)?;
        debug_assert_eq!(out.len(), 1, "root block must produce exactly one node");

        let attrs: Attrs = vec![
            ("version".to_string(), view.version().to_string()),
            ("fragment".to_string(), bool_attr(view.fragment).to_string()),
        ];
        let doc = XmlDocument::new(Element::with_parts(ROOT_TAG, attrs, out));

        debug!(
            elements = doc.element_count(),
            files = self.store_count(),
            "view converted"
        );
        Ok(doc)
    }

    fn visit_block(&mut self, block: &Block, out: &mut Children) -> ViewResult<()> {
        // Visited children are already checked; synthesized subtrees are not
        let (elem, deep) = match block {
            Block::Leaf(b) => {
                let elem = Element::with_parts(b.tag.clone(), b.attrs.clone(), Children::new());
                (elem, false)
            }
            Block::Container(b) => (self.visit_container(b)?, false),
            Block::Text(b) => {
                let elem = Element::with_parts(b.tag.clone(), b.attrs.clone(), Children::new())
                    .cdata(b.content.as_str());
                (elem, false)
            }
            Block::Interactive(b) => (self.visit_interactive(b), true),
            Block::Asset(b) => (self.visit_asset(b)?, false),
        };
        elem.check_well_formed(deep)?;
        out.push(elem.into());
        Ok(())
    }

    fn visit_container(&mut self, b: &Container) -> ViewResult<Element> {
        let mut children = Children::new();
        b.traverse(|child| self.visit_block(child, &mut children))?;
        Ok(Element::with_parts(b.tag.clone(), b.attrs.clone(), children))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Interactive desugaring
    // ─────────────────────────────────────────────────────────────────────────

    fn visit_interactive(&mut self, b: &Interactive) -> Element {
        let controls = b.controls.to_xml();
        let interactive = |attrs: &Attrs| {
            Element::with_parts(Interactive::TAG, attrs.clone(), Children::new()).child(controls)
        };

        match b.target {
            TargetMode::SelfTarget => {
                let name = self.names.next_name();
                interactive(&b.attrs)
                    .attr("target", name.as_str())
                    .attr("name", name)
            }
            TargetMode::Below | TargetMode::Side => {
                // Group(Interactive, Group(Empty)) with the result slot named
                let columns = if b.target == TargetMode::Below { "1" } else { "2" };
                let name = self.names.next_name();
                trace!(%name, target = %b.target, "desugaring interactive target");
                Element::new("Group")
                    .attr("columns", columns)
                    .child(interactive(&b.attrs).attr("target", name.as_str()))
                    .child(
                        Element::new("Group")
                            .attr("columns", "1")
                            .child(Element::new("Empty").attr("name", name)),
                    )
            }
            TargetMode::Top | TargetMode::Tab => interactive(&b.attrs),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Assets
    // ─────────────────────────────────────────────────────────────────────────

    fn visit_asset(&mut self, b: &Asset) -> ViewResult<Element> {
        // Reject bad names before anything reaches the store
        Element::with_parts(b.tag(), b.attrs.clone(), Children::new()).check_well_formed(false)?;
        let entry = self.add_asset_to_store(b)?;

        let mut attrs = Attrs::new();
        attrs.set_attr("type", entry.mime());
        attrs.merge_attrs(&b.attrs);
        attrs.merge_attrs(&b.file_attrs());
        attrs.set_attr("type", entry.mime());
        attrs.set_attr("src", entry.src());

        if let Some(caption) = b.caption.as_deref().filter(|c| !c.is_empty()) {
            attrs.remove_attr("caption");
            attrs.set_attr("caption", caption);
        }
        Ok(Element::with_parts(b.tag(), attrs, Children::new()))
    }

    fn add_asset_to_store(&mut self, b: &Asset) -> ViewResult<Arc<FileEntry>> {
        // Already written on a previous pass into a store of the same kind
        if let Some(prev) = b.prev_entry() {
            if prev.kind() == self.store.entry_kind() {
                trace!(hash = %prev.hash(), kind = %b.kind(), "reusing cached asset entry");
                self.store.add_file(&prev)?;
                return Ok(prev);
            }
        }

        let entry = if let Some(data) = b.data() {
            self.write_payload(b.kind(), data)?
        } else if let Some(path) = b.file() {
            debug!(path = %path.display(), kind = %b.kind(), "loading asset file");
            self.store.load_file(path)?
        } else {
            return Err(ViewError::NoAsset);
        };

        b.set_prev_entry(Arc::clone(&entry));
        Ok(entry)
    }

    fn write_payload(&mut self, kind: &AssetKind, data: &Payload) -> ViewResult<Arc<FileEntry>> {
        let writers = self.writers;
        let writer = writers
            .get(kind)
            .ok_or_else(|| ViewError::unsupported(data.type_name(), kind.to_string()))?;

        let meta = writer.get_meta(data).map_err(|e| write_error(e, kind))?;
        let mut file = self.store.get_file(&meta.ext, &meta.mime);
        writer.write_file(data, &mut file).map_err(|e| write_error(e, kind))?;
        let entry = self.store.commit(file)?;

        debug!(
            %kind,
            hash = %entry.hash(),
            mime = entry.mime(),
            size = entry.size(),
            "wrote asset"
        );
        Ok(entry)
    }
}

fn write_error(err: WriteError, kind: &AssetKind) -> ViewError {
    match err {
        WriteError::Unsupported(payload) => ViewError::unsupported(payload, kind.to_string()),
        WriteError::Io(source) => ViewError::Write {
            context: kind.to_string(),
            source,
        },
    }
}

// =============================================================================
// Convenience
// =============================================================================

/// Convert a view with the built-in writers and render it in compact form.
pub fn view_to_xml<S>(view: &View, store: &mut S) -> ViewResult<String>
where
    S: ContentStore + ?Sized,
{
    let writers = WriterRegistry::with_defaults();
    let doc = XmlVisitor::new(store, &writers).visit(view)?;
    Ok(doc.to_xml_string(&RenderConfig::COMPACT))
}

// =============================================================================
// Tests
// =============================================================================
