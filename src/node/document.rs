//! Output document and related utilities
//!
//! The root container produced by the visitor, with query and traversal APIs.

use crate::render::{RenderConfig, render_document};

use super::{Element, XmlNode};

// =============================================================================
// XmlDocument
// =============================================================================

/// Root document produced from a `View`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    /// Root element (always `<View>` when built by the visitor)
    pub root: Element,
}

impl XmlDocument {
    /// Create a new document with a root element
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// Serialize to an XML string.
    pub fn to_xml_string(&self, config: &RenderConfig) -> String {
        render_document(self, config)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Query API
    // ─────────────────────────────────────────────────────────────────────────

    /// Find first element matching predicate (depth-first search)
    pub fn find<F>(&self, predicate: F) -> Option<&Element>
    where
        F: Fn(&Element) -> bool,
    {
        self.iter_elements().find(|e| predicate(e))
    }

    /// Find all elements matching predicate
    pub fn find_all<F>(&self, predicate: F) -> Vec<&Element>
    where
        F: Fn(&Element) -> bool,
    {
        let mut results = Vec::new();
        Self::collect_elements(&self.root, &predicate, &mut results);
        results
    }

    fn collect_elements<'a, F>(elem: &'a Element, predicate: &F, results: &mut Vec<&'a Element>)
    where
        F: Fn(&Element) -> bool,
    {
        if predicate(elem) {
            results.push(elem);
        }
        for child in elem.children_elements() {
            Self::collect_elements(child, predicate, results);
        }
    }

    /// Count total elements in document
    pub fn element_count(&self) -> usize {
        Self::count_elements(&self.root)
    }

    fn count_elements(elem: &Element) -> usize {
        1 + elem
            .children_elements()
            .map(Self::count_elements)
            .sum::<usize>()
    }

    /// Iterate over all elements (depth-first, document order)
    pub fn iter_elements(&self) -> ElementIterator<'_> {
        ElementIterator::new(&self.root)
    }
}

// =============================================================================
// ElementIterator - depth-first element traversal
// =============================================================================

/// Depth-first iterator over elements
pub struct ElementIterator<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> ElementIterator<'a> {
    fn new(root: &'a Element) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a> Iterator for ElementIterator<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let elem = self.stack.pop()?;
        // Push children in reverse order so they're visited left-to-right
        for child in elem.children.iter().rev() {
            if let XmlNode::Element(child_elem) = child {
                self.stack.push(child_elem);
            }
        }
        Some(elem)
    }
}
