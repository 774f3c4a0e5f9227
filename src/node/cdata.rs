//! Character data node
//!
//! Content is emitted verbatim inside `<![CDATA[...]]>`.

// =============================================================================
// Cdata
// =============================================================================

/// CDATA content node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cdata {
    /// Literal content, never entity-escaped
    pub content: String,
}

impl Cdata {
    /// Create a new CDATA node
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Check if content is empty
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Content length in bytes
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Whether the content contains the `]]>` terminator and must be split
    /// across several sections when rendered.
    pub fn needs_split(&self) -> bool {
        self.content.contains("]]>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cdata_node() {
        let cdata = Cdata::new("a < b && c");
        assert!(!cdata.is_empty());
        assert_eq!(cdata.len(), 10);
        assert!(!cdata.needs_split());
        assert!(Cdata::new("x]]>y").needs_split());
    }
}
