//! Attribute system shared by blocks and XML elements
//!
//! Attributes are a plain `Vec<(String, String)>`: insertion order is kept so
//! the emitted XML is deterministic, and updates happen in place so a key keeps
//! the position of its first insertion.

use compact_str::CompactString;

/// Tag name of a block or XML element.
pub type Tag = CompactString;

/// Ordered key-value attribute list.
pub type Attrs = Vec<(String, String)>;

/// Extension trait for attribute operations on Attrs
pub trait AttrsExt {
    /// Get an attribute value by name
    fn get_attr(&self, name: &str) -> Option<&str>;

    /// Check if an attribute exists
    fn has_attr(&self, name: &str) -> bool;

    /// Set an attribute value (insert or update)
    fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>);

    /// Remove an attribute by name, returning the old value if present
    fn remove_attr(&mut self, name: &str) -> Option<String>;

    /// Apply every pair of `other` with `set_attr`, so `other` wins on collision.
    fn merge_attrs<'a, I>(&mut self, other: I)
    where
        I: IntoIterator<Item = &'a (String, String)>;
}

impl AttrsExt for Attrs {
    fn get_attr(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn has_attr(&self, name: &str) -> bool {
        self.iter().any(|(k, _)| k == name)
    }

    fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(attr) = self.iter_mut().find(|(k, _)| k == &name) {
            attr.1 = value;
        } else {
            self.push((name, value));
        }
    }

    fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.iter()
            .position(|(k, _)| k == name)
            .map(|pos| self.remove(pos).1)
    }

    fn merge_attrs<'a, I>(&mut self, other: I)
    where
        I: IntoIterator<Item = &'a (String, String)>,
    {
        for (k, v) in other {
            self.set_attr(k.as_str(), v.as_str());
        }
    }
}

/// Render a boolean the way attribute values expect it.
#[inline]
pub fn bool_attr(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

// =============================================================================
// Tests
// =============================================================================
