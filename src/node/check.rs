//! Well-formedness checks for names and character data.
//!
//! Character classes follow XML 1.0 (Fifth Edition): `Char` from §2.2,
//! `NameStartChar` and `NameChar` from §2.3.

use crate::error::{ViewError, ViewResult};

use super::{Element, XmlNode};

/// `#x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] | [#x10000-#x10FFFF]`
pub(crate) fn is_xml_char(c: char) -> bool {
    matches!(c as u32,
        0x09 | 0x0A | 0x0D | 0x20..=0xD7FF | 0xE000..=0xFFFD | 0x0001_0000..=0x0010_FFFF
    )
}

pub(crate) fn is_name_start_char(c: char) -> bool {
    matches!(c,
        ':' | 'A'..='Z' | '_' | 'a'..='z' |
        '\u{C0}'..='\u{D6}' | '\u{D8}'..='\u{F6}' | '\u{F8}'..='\u{2FF}' |
        '\u{370}'..='\u{37D}' | '\u{37F}'..='\u{1FFF}' |
        '\u{200C}'..='\u{200D}' | '\u{2070}'..='\u{218F}' |
        '\u{2C00}'..='\u{2FEF}' | '\u{3001}'..='\u{D7FF}' |
        '\u{F900}'..='\u{FDCF}' | '\u{FDF0}'..='\u{FFFD}' |
        '\u{10000}'..='\u{EFFFF}'
    )
}

pub(crate) fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}' |
            '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}'
        )
}

/// Whether `name` can be used as an element or attribute name.
pub fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(is_name_start_char) && chars.all(is_name_char)
}

fn invalid_char(s: &str) -> Option<char> {
    s.chars().find(|&c| !is_xml_char(c))
}

impl Element {
    /// Check the tag, the attributes and the direct character data.
    ///
    /// With `deep`, child elements are checked as well; otherwise they are
    /// assumed to have been checked when they were built.
    pub fn check_well_formed(&self, deep: bool) -> ViewResult<()> {
        let invalid = |problem: String| ViewError::InvalidXml {
            element: self.tag.to_string(),
            problem,
        };

        if !is_xml_name(&self.tag) {
            let tag = self.tag.as_str();
            return Err(invalid(format!("element name {tag:?} is not an XML name")));
        }
        for (name, value) in &self.attrs {
            if !is_xml_name(name) {
                return Err(invalid(format!("attribute name {name:?} is not an XML name")));
            }
            if let Some(c) = invalid_char(value) {
                return Err(invalid(format!("attribute {name:?} contains {c:?}")));
            }
        }
        for child in &self.children {
            match child {
                XmlNode::Cdata(cdata) => {
                    if let Some(c) = invalid_char(&cdata.content) {
                        return Err(invalid(format!("character data contains {c:?}")));
                    }
                }
                XmlNode::Element(elem) if deep => elem.check_well_formed(true)?,
                XmlNode::Element(_) => {}
            }
        }
        Ok(())
    }
}
