//! Element type - the structural XML node
//!
//! Attribute additions only happen before an element is attached to its parent.

use smallvec::SmallVec;

use crate::attr::{Attrs, AttrsExt, Tag};

use super::{Cdata, Children, XmlNode};

// =============================================================================
// Element
// =============================================================================

/// XML element with ordered attributes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name
    pub tag: Tag,
    /// Element attributes
    pub attrs: Attrs,
    /// Child nodes
    pub children: Children,
}

impl Element {
    /// Create an empty element
    pub fn new(tag: impl Into<Tag>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: SmallVec::new(),
        }
    }

    /// Create an element with attributes and children already collected
    pub fn with_parts(tag: impl Into<Tag>, attrs: Attrs, children: Children) -> Self {
        Self {
            tag: tag.into(),
            attrs,
            children,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Builder
    // ─────────────────────────────────────────────────────────────────────────

    /// Set an attribute (builder)
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set_attr(name, value);
        self
    }

    /// Append a child element (builder)
    pub fn child(mut self, elem: Element) -> Self {
        self.push_elem(elem);
        self
    }

    /// Append a CDATA section (builder)
    pub fn cdata(mut self, content: impl Into<String>) -> Self {
        self.push_cdata(content);
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutation
    // ─────────────────────────────────────────────────────────────────────────

    /// Append a child element
    pub fn push_elem(&mut self, elem: Element) {
        self.children.push(XmlNode::from(elem));
    }

    /// Append a CDATA section
    pub fn push_cdata(&mut self, content: impl Into<String>) {
        self.children.push(XmlNode::Cdata(Cdata::new(content)));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Get attribute value by name
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get_attr(name)
    }

    /// Check if element has no children
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of direct children (all node types)
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Iterate over child element references
    pub fn children_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| n.as_element())
    }

    /// Get the first child element, if any
    pub fn first_child(&self) -> Option<&Element> {
        self.children_elements().next()
    }

    /// True when every child is an element (no character data)
    pub fn is_element_only(&self) -> bool {
        !self.children.is_empty() && self.children.iter().all(XmlNode::is_element)
    }

    /// Concatenated character data of this element and its descendants
    pub fn text_content(&self) -> String {
        let mut result = String::new();
        self.collect_text(&mut result);
        result
    }

    fn collect_text(&self, buf: &mut String) {
        for child in &self.children {
            match child {
                XmlNode::Cdata(c) => buf.push_str(&c.content),
                XmlNode::Element(e) => e.collect_text(buf),
            }
        }
    }
}
