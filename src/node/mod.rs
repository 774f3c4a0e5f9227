//! XML output nodes.
//!
//! The visitor produces these fresh on every traversal. An element holds an
//! ordered child list; character data is a separate `Cdata` node so the
//! renderer never entity-escapes it.

mod cdata;
mod check;
mod document;
mod element;

pub use cdata::Cdata;
pub use check::is_xml_name;
pub use document::{ElementIterator, XmlDocument};
pub use element::Element;

use smallvec::SmallVec;

/// Node in an XML tree - either an Element or a CDATA section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(Box<Element>),
    Cdata(Cdata),
}

impl XmlNode {
    // element -> Element, cdata -> Cdata
    impl_enum_accessors!(element, cdata);
}

impl From<Element> for XmlNode {
    fn from(elem: Element) -> Self {
        XmlNode::Element(Box::new(elem))
    }
}

impl From<Cdata> for XmlNode {
    fn from(cdata: Cdata) -> Self {
        XmlNode::Cdata(cdata)
    }
}

/// Type alias for children collection.
pub type Children = SmallVec<[XmlNode; 8]>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::AttrsExt;

    #[test]
    fn test_element_builder() {
        let elem = Element::new("Group")
            .attr("columns", "2")
            .child(Element::new("Empty").attr("name", "x1"))
            .cdata("raw");

        assert_eq!(elem.tag, "Group");
        assert_eq!(elem.attrs.get_attr("columns"), Some("2"));
        assert_eq!(elem.child_count(), 2);
        assert!(elem.children[0].is_element());
        assert!(elem.children[1].is_cdata());
        assert_eq!(elem.text_content(), "raw");
    }

    #[test]
    fn test_node_accessors() {
        let mut node: XmlNode = Element::new("Text").into();
        assert!(node.as_cdata().is_none());
        node.as_element_mut().unwrap().push_cdata("hi");
        assert_eq!(node.as_element().unwrap().text_content(), "hi");
    }

    #[test]
    fn test_document_queries() {
        let root = Element::new("View")
            .child(
                Element::new("Group")
                    .child(Element::new("Text").cdata("a"))
                    .child(Element::new("Text").cdata("b")),
            )
            .child(Element::new("Plot"));
        let doc = XmlDocument::new(root);

        assert_eq!(doc.element_count(), 5);
        assert_eq!(doc.find_all(|e| e.tag == "Text").len(), 2);
        assert!(doc.find(|e| e.tag == "Plot").is_some());
        assert!(doc.find(|e| e.tag == "Missing").is_none());

        let tags: Vec<_> = doc.iter_elements().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, vec!["View", "Group", "Text", "Text", "Plot"]);
    }
}
