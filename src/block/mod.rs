//! Source document tree.
//!
//! A [`View`] wraps one top-level [`Block`]. Blocks are plain data built
//! before conversion; the only state conversion touches is the per-asset
//! entry cache (see [`Asset`]).
//!
//! # Variants
//!
//! | Variant       | Emits                                   |
//! |---------------|-----------------------------------------|
//! | `Leaf`        | empty element with attributes           |
//! | `Container`   | element wrapping its converted children |
//! | `Text`        | element holding a CDATA section         |
//! | `Interactive` | controls, possibly desugared to groups  |
//! | `Asset`       | element referencing a store entry       |

mod asset;
mod interactive;

pub use asset::{Asset, AssetKind, Payload, TableData};
pub use interactive::{Control, Controls, Interactive, TargetMode, Trigger};

use std::sync::Arc;

use crate::attr::{Attrs, AttrsExt, Tag};

/// Schema version written on the root `<View>` element.
pub const SCHEMA_VERSION: u32 = 1;

// =============================================================================
// View
// =============================================================================

/// Root wrapper for a document tree.
#[derive(Debug, Clone)]
pub struct View {
    /// The single top-level block
    pub root: Block,
    /// Whether the view is a fragment embedded in a larger document
    pub fragment: bool,
}

impl View {
    /// Create a full (non-fragment) view
    pub fn new(root: impl Into<Block>) -> Self {
        Self {
            root: root.into(),
            fragment: false,
        }
    }

    /// Create a fragment view
    pub fn fragment(root: impl Into<Block>) -> Self {
        Self {
            root: root.into(),
            fragment: true,
        }
    }

    /// Create a view whose root is a `Group` of the given blocks
    pub fn of(blocks: impl IntoIterator<Item = Block>) -> Self {
        Self::new(Block::group(blocks))
    }

    /// Schema version of the emitted document
    pub fn version(&self) -> u32 {
        SCHEMA_VERSION
    }
}

// =============================================================================
// Block variants
// =============================================================================

/// Block with no content of its own
#[derive(Debug, Clone)]
pub struct Leaf {
    pub tag: Tag,
    pub attrs: Attrs,
}

/// Block holding an ordered list of child blocks
#[derive(Debug, Clone)]
pub struct Container {
    pub tag: Tag,
    pub attrs: Attrs,
    pub children: Vec<Block>,
}

impl Container {
    /// Invoke `f` on each child in order, stopping at the first error.
    pub fn traverse<E>(&self, mut f: impl FnMut(&Block) -> Result<(), E>) -> Result<(), E> {
        self.children.iter().try_for_each(|child| f(child))
    }
}

/// Block carrying literal text, emitted as CDATA
#[derive(Debug, Clone)]
pub struct Text {
    pub tag: Tag,
    pub attrs: Attrs,
    pub content: String,
}

/// Node in the source tree
///
/// Assets are reference counted: cloning a block, or placing the same
/// `Arc<Asset>` at several positions, shares one asset and its entry cache.
#[derive(Debug, Clone)]
pub enum Block {
    Leaf(Leaf),
    Container(Container),
    Text(Text),
    Interactive(Interactive),
    Asset(Arc<Asset>),
}

impl Block {
    // leaf -> Leaf, container -> Container, ...
    impl_enum_accessors!(leaf, container, text, interactive);

    pub fn is_asset(&self) -> bool {
        matches!(self, Self::Asset(_))
    }

    pub fn as_asset(&self) -> Option<&Asset> {
        match self {
            Self::Asset(a) => Some(a.as_ref()),
            _ => None,
        }
    }

    /// Mutable access to the asset.
    ///
    /// A shared asset is detached first, so other occurrences keep the
    /// original content and cache.
    pub fn as_asset_mut(&mut self) -> Option<&mut Asset> {
        match self {
            Self::Asset(a) => Some(Arc::make_mut(a)),
            _ => None,
        }
    }

    /// The shared handle of an asset block
    pub fn as_shared_asset(&self) -> Option<&Arc<Asset>> {
        match self {
            Self::Asset(a) => Some(a),
            _ => None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Attribute contract
    // ─────────────────────────────────────────────────────────────────────────

    impl_variant_field!(attrs, Attrs, Leaf, Container, Text, Interactive; shared Asset);

    /// Canonical tag name
    pub fn tag(&self) -> &str {
        match self {
            Self::Leaf(b) => &b.tag,
            Self::Container(b) => &b.tag,
            Self::Text(b) => &b.tag,
            Self::Interactive(_) => Interactive::TAG,
            Self::Asset(b) => b.tag(),
        }
    }

    /// Set an attribute (builder)
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs_mut().set_attr(name, value);
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Constructors
    // ─────────────────────────────────────────────────────────────────────────

    /// Leaf block with the given tag
    pub fn leaf(tag: impl Into<Tag>) -> Self {
        Self::Leaf(Leaf {
            tag: tag.into(),
            attrs: Vec::new(),
        })
    }

    /// Container block with the given tag
    pub fn container(tag: impl Into<Tag>, children: impl IntoIterator<Item = Block>) -> Self {
        Self::Container(Container {
            tag: tag.into(),
            attrs: Vec::new(),
            children: children.into_iter().collect(),
        })
    }

    /// `Group` container
    pub fn group(children: impl IntoIterator<Item = Block>) -> Self {
        Self::container("Group", children)
    }

    /// `Group` container laid out in `columns` columns
    pub fn columns(columns: usize, children: impl IntoIterator<Item = Block>) -> Self {
        Self::group(children).attr("columns", columns.to_string())
    }

    /// `Select` container (tabs or dropdown)
    pub fn select(children: impl IntoIterator<Item = Block>) -> Self {
        Self::container("Select", children)
    }

    /// Text block with an explicit tag
    pub fn text_block(tag: impl Into<Tag>, content: impl Into<String>) -> Self {
        Self::Text(Text {
            tag: tag.into(),
            attrs: Vec::new(),
            content: content.into(),
        })
    }

    /// Markdown text (`Text`)
    pub fn text(content: impl Into<String>) -> Self {
        Self::text_block("Text", content)
    }

    /// Raw HTML (`HTML`)
    pub fn html(content: impl Into<String>) -> Self {
        Self::text_block("HTML", content)
    }

    /// Source code (`Code`) with a language attribute
    pub fn code(content: impl Into<String>, language: impl Into<String>) -> Self {
        Self::text_block("Code", content).attr("language", language)
    }

    /// Asset block sharing `asset` with every other block built from it
    pub fn shared_asset(asset: &Arc<Asset>) -> Self {
        Self::Asset(Arc::clone(asset))
    }

    /// Empty placeholder (`Empty`) with the given name
    pub fn empty(name: impl Into<String>) -> Self {
        Self::leaf("Empty").attr("name", name)
    }
}

impl From<Leaf> for Block {
    fn from(b: Leaf) -> Self {
        Self::Leaf(b)
    }
}

impl From<Container> for Block {
    fn from(b: Container) -> Self {
        Self::Container(b)
    }
}

impl From<Text> for Block {
    fn from(b: Text) -> Self {
        Self::Text(b)
    }
}

impl From<Interactive> for Block {
    fn from(b: Interactive) -> Self {
        Self::Interactive(b)
    }
}

impl From<Asset> for Block {
    fn from(b: Asset) -> Self {
        Self::Asset(Arc::new(b))
    }
}

impl From<Arc<Asset>> for Block {
    fn from(b: Arc<Asset>) -> Self {
        Self::Asset(b)
    }
}
