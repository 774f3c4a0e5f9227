//! Interactive blocks: a form of controls plus a placement for its result.

use std::fmt;

use crate::attr::{Attrs, AttrsExt, Tag};
use crate::node::Element;

// =============================================================================
// TargetMode
// =============================================================================

/// Where the result of an interactive block is placed.
///
/// `Below`, `Side` and `SelfTarget` are desugared during conversion into
/// explicitly named targets; the other modes are left to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TargetMode {
    /// Below the controls, in a single column
    #[default]
    Below,
    /// Beside the controls, as a second column
    Side,
    /// Replace the interactive block itself
    SelfTarget,
    /// Above the controls
    Top,
    /// In a new tab
    Tab,
}

impl TargetMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Below => "below",
            Self::Side => "side",
            Self::SelfTarget => "self",
            Self::Top => "top",
            Self::Tab => "tab",
        }
    }
}

impl fmt::Display for TargetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event that runs the interactive function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Trigger {
    #[default]
    Submit,
    Change,
    Load,
}

impl Trigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::Change => "change",
            Self::Load => "load",
        }
    }
}

// =============================================================================
// Controls
// =============================================================================

/// A single form parameter.
#[derive(Debug, Clone)]
pub struct Control {
    pub tag: Tag,
    pub attrs: Attrs,
    /// Choices offered by selection controls
    pub options: Vec<String>,
}

impl Control {
    /// Control with the given tag and parameter name
    pub fn new(tag: impl Into<Tag>, name: impl Into<String>) -> Self {
        let mut attrs = Attrs::new();
        attrs.set_attr("name", name);
        Self {
            tag: tag.into(),
            attrs,
            options: Vec::new(),
        }
    }

    pub fn text_box(name: impl Into<String>) -> Self {
        Self::new("TextBox", name)
    }

    pub fn number_box(name: impl Into<String>) -> Self {
        Self::new("NumberBox", name)
    }

    pub fn switch(name: impl Into<String>) -> Self {
        Self::new("Switch", name)
    }

    pub fn range(name: impl Into<String>, min: f64, max: f64) -> Self {
        Self::new("Range", name)
            .attr("min", min.to_string())
            .attr("max", max.to_string())
    }

    pub fn choice<I, S>(name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            ..Self::new("Choice", name)
        }
    }

    /// Set a label (builder)
    pub fn label(self, label: impl Into<String>) -> Self {
        self.attr("label", label)
    }

    /// Set the initial value (builder)
    pub fn initial(self, value: impl Into<String>) -> Self {
        self.attr("initial", value)
    }

    /// Set an attribute (builder)
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set_attr(name, value);
        self
    }

    /// Parameter name
    pub fn name(&self) -> &str {
        self.attrs.get_attr("name").unwrap_or_default()
    }

    fn to_xml(&self) -> Element {
        let mut elem =
            Element::with_parts(self.tag.clone(), self.attrs.clone(), Default::default());
        for option in &self.options {
            elem.push_elem(Element::new("Option").attr("value", option.as_str()));
        }
        elem
    }
}

/// Ordered set of form parameters.
#[derive(Debug, Clone, Default)]
pub struct Controls {
    pub params: Vec<Control>,
}

impl Controls {
    pub fn new(params: impl IntoIterator<Item = Control>) -> Self {
        Self {
            params: params.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Parameter names in order
    pub fn param_names(&self) -> Vec<&str> {
        self.params.iter().map(Control::name).collect()
    }

    /// Convert to a standalone `<Controls>` element.
    ///
    /// This is independent of the surrounding document; the result is
    /// embedded as the first child of the interactive node.
    pub fn to_xml(&self) -> Element {
        let mut elem = Element::new("Controls");
        for param in &self.params {
            elem.push_elem(param.to_xml());
        }
        elem
    }
}

// =============================================================================
// Interactive
// =============================================================================

/// Block that runs a function with user-supplied controls.
#[derive(Debug, Clone)]
pub struct Interactive {
    pub controls: Controls,
    pub target: TargetMode,
    pub attrs: Attrs,
}

impl Interactive {
    /// Tag name of emitted interactive elements
    pub const TAG: &'static str = "Interactive";

    pub fn new(controls: Controls, target: TargetMode) -> Self {
        Self {
            controls,
            target,
            attrs: Attrs::new(),
        }
    }

    /// Name of the function to run (builder)
    pub fn function(self, function_id: impl Into<String>) -> Self {
        self.attr("function_id", function_id)
    }

    /// Triggering event (builder)
    pub fn trigger(self, trigger: Trigger) -> Self {
        self.attr("trigger", trigger.as_str())
    }

    /// Set an attribute (builder)
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set_attr(name, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{RenderConfig, render_element_to_string};

    #[test]
    fn test_controls_to_xml() {
        let controls = Controls::new([
            Control::text_box("query").label("Query"),
            Control::choice("region", ["eu", "us"]),
        ]);
        assert_eq!(controls.param_names(), vec!["query", "region"]);

        let xml = render_element_to_string(&controls.to_xml(), &RenderConfig::COMPACT);
        assert_eq!(
            xml,
            r#"<Controls><TextBox name="query" label="Query"/><Choice name="region"><Option value="eu"/><Option value="us"/></Choice></Controls>"#
        );
    }

    #[test]
    fn test_empty_controls() {
        let controls = Controls::default();
        assert!(controls.is_empty());
        assert!(controls.to_xml().is_empty());
    }

    #[test]
    fn test_range_attrs() {
        let range = Control::range("n", 0.0, 10.5);
        assert_eq!(range.attrs.get_attr("min"), Some("0"));
        assert_eq!(range.attrs.get_attr("max"), Some("10.5"));
    }

    #[test]
    fn test_interactive_builder() {
        let b = Interactive::new(Controls::default(), TargetMode::Tab)
            .function("refresh")
            .trigger(Trigger::Change);
        assert_eq!(b.attrs.get_attr("function_id"), Some("refresh"));
        assert_eq!(b.attrs.get_attr("trigger"), Some("change"));
        assert_eq!(b.target.to_string(), "tab");
    }
}
