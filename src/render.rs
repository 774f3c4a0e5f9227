//! XML Rendering
//!
//! Renders output documents to XML strings. Attribute values are entity
//! escaped; character data is always emitted as CDATA.

use crate::attr::Attrs;
use crate::node::{Cdata, Element, XmlDocument, XmlNode};

// =============================================================================
// RenderConfig
// =============================================================================

/// Default indentation unit for pretty output.
pub const DEFAULT_INDENT: &str = "  ";

/// Configuration for XML rendering.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Whether to emit the `<?xml ...?>` declaration.
    pub declaration: bool,
    /// Whether to place element-only children on their own indented lines.
    pub pretty: bool,
    /// Indentation unit used when `pretty` is set (default: two spaces).
    pub indent: String,
}

impl RenderConfig {
    /// Single-line output, no declaration. This is the canonical form.
    pub const COMPACT: Self = Self {
        declaration: false,
        pretty: false,
        indent: String::new(), // Will use DEFAULT_INDENT
    };

    /// Indented output with declaration, for debugging.
    pub const PRETTY: Self = Self {
        declaration: true,
        pretty: true,
        indent: String::new(),
    };

    /// Create a new config.
    pub fn new(declaration: bool, pretty: bool) -> Self {
        Self {
            declaration,
            pretty,
            indent: DEFAULT_INDENT.to_string(),
        }
    }

    /// Set a custom indentation unit.
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Get the indentation unit.
    pub fn indent(&self) -> &str {
        if self.indent.is_empty() {
            DEFAULT_INDENT
        } else {
            &self.indent
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::COMPACT
    }
}

// =============================================================================
// Document Rendering
// =============================================================================

/// Render a document to XML bytes.
pub fn render_document_bytes(doc: &XmlDocument, config: &RenderConfig) -> Vec<u8> {
    render_document(doc, config).into_bytes()
}

/// Render a document to an XML string.
pub fn render_document(doc: &XmlDocument, config: &RenderConfig) -> String {
    let mut output = String::new();
    if config.declaration {
        output.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
        if config.pretty {
            output.push('\n');
        }
    }
    render_element(&doc.root, config, 0, &mut output);
    if config.pretty {
        output.push('\n');
    }
    output
}

/// Render a single element subtree (no declaration).
pub fn render_element_to_string(elem: &Element, config: &RenderConfig) -> String {
    let mut output = String::new();
    render_element(elem, config, 0, &mut output);
    output
}

fn render_element(elem: &Element, config: &RenderConfig, depth: usize, output: &mut String) {
    output.push('<');
    output.push_str(&elem.tag);
    render_attrs(&elem.attrs, output);

    if elem.is_empty() {
        output.push_str("/>");
        return;
    }
    output.push('>');

    // Mixed or CDATA content stays inline so whitespace is not injected
    let indent_children = config.pretty && elem.is_element_only();
    for child in &elem.children {
        if indent_children {
            push_newline(config, depth + 1, output);
        }
        render_node(child, config, depth + 1, output);
    }
    if indent_children {
        push_newline(config, depth, output);
    }

    output.push_str("</");
    output.push_str(&elem.tag);
    output.push('>');
}

fn render_node(node: &XmlNode, config: &RenderConfig, depth: usize, output: &mut String) {
    match node {
        XmlNode::Element(elem) => render_element(elem, config, depth, output),
        XmlNode::Cdata(cdata) => render_cdata(cdata, output),
    }
}

fn push_newline(config: &RenderConfig, depth: usize, output: &mut String) {
    output.push('\n');
    for _ in 0..depth {
        output.push_str(config.indent());
    }
}

/// Render a CDATA section, splitting on `]]>` so the output stays well-formed.
fn render_cdata(cdata: &Cdata, output: &mut String) {
    output.push_str("<![CDATA[");
    if cdata.needs_split() {
        output.push_str(&cdata.content.replace("]]>", "]]]]><![CDATA[>"));
    } else {
        output.push_str(&cdata.content);
    }
    output.push_str("]]>");
}

/// Render attributes to XML.
fn render_attrs(attrs: &Attrs, output: &mut String) {
    for (name, value) in attrs.iter() {
        output.push(' ');
        output.push_str(name);
        output.push_str("=\"");
        output.push_str(&escape_attr(value));
        output.push('"');
    }
}

/// Escape attribute value special characters.
fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '\n' => result.push_str("&#10;"),
            '\r' => result.push_str("&#13;"),
            '\t' => result.push_str("&#9;"),
            _ => result.push(c),
        }
    }
    result
}

// =============================================================================
// Tests
// =============================================================================
