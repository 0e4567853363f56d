//! Typed SVG tree.
//!
//! A parsed document is a tree of [`SvgAstNode`]s rooted at an `<svg>`
//! [`SvgElement`]. Trees are built fresh for every analysis call and dropped
//! once classification is done.

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

/// Element attributes as ordered key-value pairs.
///
/// Source order is kept so that serialization round-trips attribute order.
pub type Attrs = Vec<(String, String)>;

/// Extension trait for attribute operations on [`Attrs`].
pub trait AttrsExt {
    /// Get an attribute value by name
    fn get_attr(&self, name: &str) -> Option<&str>;

    /// Check if an attribute exists
    fn has_attr(&self, name: &str) -> bool;

    /// Set an attribute value (insert or update)
    fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>);

    /// Remove an attribute by name, returning the old value if present
    fn remove_attr(&mut self, name: &str) -> Option<String>;
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
}

// =============================================================================
// Nodes
// =============================================================================

/// One node of a parsed SVG document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SvgAstNode {
    /// A tag with attributes and children.
    Element(SvgElement),
    /// A run of character data (already entity-decoded).
    Text {
        /// Decoded text content.
        value: String,
    },
}

impl SvgAstNode {
    /// Create a text node.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    /// Borrow the element if this node is one.
    pub fn as_element(&self) -> Option<&SvgElement> {
        match self {
            Self::Element(elem) => Some(elem),
            Self::Text { .. } => None,
        }
    }

    /// Mutably borrow the element if this node is one.
    pub fn as_element_mut(&mut self) -> Option<&mut SvgElement> {
        match self {
            Self::Element(elem) => Some(elem),
            Self::Text { .. } => None,
        }
    }
}

impl From<SvgElement> for SvgAstNode {
    fn from(elem: SvgElement) -> Self {
        Self::Element(elem)
    }
}

/// An SVG element: tag name, attributes and ordered children.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SvgElement {
    pub tag_name: String,
    #[serde(serialize_with = "serialize_attrs")]
    pub attributes: Attrs,
    pub children: Vec<SvgAstNode>,
}

impl SvgElement {
    /// Create an element with no attributes or children.
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.set_attr(name, value);
        self
    }

    /// Builder-style child append.
    pub fn with_child(mut self, child: impl Into<SvgAstNode>) -> Self {
        self.children.push(child.into());
        self
    }

    #[inline]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get_attr(name)
    }

    #[inline]
    pub fn is(&self, tag: &str) -> bool {
        self.tag_name == tag
    }

    /// Iterate over element children, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &SvgElement> {
        self.children.iter().filter_map(SvgAstNode::as_element)
    }

    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut SvgElement> {
        self.children.iter_mut().filter_map(SvgAstNode::as_element_mut)
    }

    /// Pre-order walk over this element and all descendant elements.
    pub fn walk(&self, visit: &mut impl FnMut(&SvgElement)) {
        visit(self);
        for child in self.child_elements() {
            child.walk(visit);
        }
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

fn collect_text(elem: &SvgElement, out: &mut String) {
    for child in &elem.children {
        match child {
            SvgAstNode::Text { value } => out.push_str(value),
            SvgAstNode::Element(e) => collect_text(e, out),
        }
    }
}

/// Serialize attributes as a JSON object instead of a list of pairs.
fn serialize_attrs<S: Serializer>(attrs: &Attrs, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(attrs.len()))?;
    for (k, v) in attrs {
        map.serialize_entry(k, v)?;
    }
    map.end()
}

// =============================================================================
// Tests
// =============================================================================
