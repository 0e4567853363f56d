//! Element arena for one rendered SVG.

use std::fmt;

use serde::Serialize;

use crate::error::MotifResult;
use crate::svg::ast::{Attrs, AttrsExt, SvgElement};
use crate::svg::parse::{local_name, parse};

use super::selector::{Selector, SelectorError};

/// Stable handle to an element of a [`Scene`].
///
/// Ids are arena indices assigned in document (pre-order) order, so the root
/// is always `ElementId(0)`. They are only meaningful for the scene that
/// issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ElementId(u32);

impl ElementId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    attributes: Attrs,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    detached: bool,
}

/// Flat, index-addressed copy of an element tree.
///
/// Text nodes are not kept. Elements can be edited in place or detached;
/// detached elements (and their subtrees) no longer match selectors, but
/// their ids are never reused.
#[derive(Debug, Clone)]
pub struct Scene {
    nodes: Vec<Node>,
}

impl Scene {
    /// Index every element under `root` (inclusive).
    pub fn new(root: &SvgElement) -> Self {
        let mut scene = Self { nodes: Vec::new() };
        scene.push(root, None);
        scene
    }

    /// Parse sanitized markup and index it.
    pub fn from_svg(svg: &str) -> MotifResult<Self> {
        Ok(Self::new(&parse(svg)?))
    }

    fn push(&mut self, elem: &SvgElement, parent: Option<ElementId>) -> ElementId {
        // More than u32::MAX elements will not fit in memory anyway
        let id = ElementId(self.nodes.len() as u32);
        self.nodes.push(Node {
            tag: local_name(&elem.tag_name).to_string(),
            attributes: elem.attributes.clone(),
            parent,
            children: Vec::new(),
            detached: false,
        });
        for child in elem.child_elements() {
            let child_id = self.push(child, Some(id));
            self.nodes[id.index()].children.push(child_id);
        }
        id
    }

    #[inline]
    pub const fn root(&self) -> ElementId {
        ElementId(0)
    }

    /// Number of indexed elements, detached ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All element ids in document order.
    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        (0..self.nodes.len() as u32).map(ElementId)
    }

    fn node(&self, id: ElementId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Local tag name (`"path"`, `"g"`).
    pub fn tag(&self, id: ElementId) -> Option<&str> {
        self.node(id).map(|n| n.tag.as_str())
    }

    pub fn attr(&self, id: ElementId, name: &str) -> Option<&str> {
        self.node(id)?.attributes.get_attr(name)
    }

    pub fn attributes(&self, id: ElementId) -> Option<&Attrs> {
        self.node(id).map(|n| &n.attributes)
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.node(id)?.parent
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.node(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Iterate ancestors from the parent up to the root.
    pub fn ancestors(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        std::iter::successors(self.parent(id), |&p| self.parent(p))
    }

    /// Whether `id` or any ancestor has been detached.
    pub fn is_detached(&self, id: ElementId) -> bool {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .any(|i| self.node(i).is_none_or(|n| n.detached))
    }

    /// Set an attribute. Returns `false` if `id` is unknown.
    ///
    /// Geometry edits make cached path lengths stale; invalidate them in the
    /// owning [`PathLengthCache`](super::PathLengthCache).
    pub fn set_attr(&mut self, id: ElementId, name: &str, value: impl Into<String>) -> bool {
        match self.nodes.get_mut(id.index()) {
            Some(node) => {
                node.attributes.set_attr(name, value);
                true
            }
            None => false,
        }
    }

    /// Detach an element and its subtree. Returns `false` if `id` is unknown
    /// or is the root.
    pub fn detach(&mut self, id: ElementId) -> bool {
        let Some(parent) = self.parent(id) else {
            return false;
        };
        self.nodes[parent.index()].children.retain(|&c| c != id);
        self.nodes[id.index()].detached = true;
        true
    }

    /// Attached elements matching `selector`, in document order.
    pub fn select(&self, selector: &Selector) -> Vec<ElementId> {
        selector.filter(self, self.ids().filter(|&id| !self.is_detached(id)))
    }

    /// Parse `selector` and [`select`](Self::select).
    pub fn query(&self, selector: &str) -> Result<Vec<ElementId>, SelectorError> {
        Ok(self.select(&Selector::parse(selector)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<svg><g id="a"><rect/><circle r="1"/></g><path d="M0 0"/></svg>"#;

    #[test]
    fn test_preorder_ids() {
        let scene = Scene::from_svg(DOC).unwrap();
        let tags: Vec<_> = scene.ids().map(|id| scene.tag(id).unwrap()).collect();
        assert_eq!(tags, ["svg", "g", "rect", "circle", "path"]);
        assert_eq!(scene.root(), ElementId(0));
        assert_eq!(scene.len(), 5);
    }

    #[test]
    fn test_tree_links() {
        let scene = Scene::from_svg(DOC).unwrap();
        let g = ElementId(1);
        assert_eq!(scene.children(g), &[ElementId(2), ElementId(3)]);
        assert_eq!(scene.parent(ElementId(3)), Some(g));
        assert_eq!(scene.parent(scene.root()), None);
        let ancestors: Vec<_> = scene.ancestors(ElementId(2)).collect();
        assert_eq!(ancestors, [g, ElementId(0)]);
        assert_eq!(scene.attr(g, "id"), Some("a"));
    }

    #[test]
    fn test_detach_hides_subtree() {
        let mut scene = Scene::from_svg(DOC).unwrap();
        assert!(scene.detach(ElementId(1)));
        assert!(scene.is_detached(ElementId(2)));
        assert_eq!(scene.children(scene.root()), &[ElementId(4)]);
        assert_eq!(scene.query("*").unwrap(), [ElementId(0), ElementId(4)]);
        assert!(!scene.detach(scene.root()));
        assert_eq!(scene.len(), 5);
    }

    #[test]
    fn test_set_attr() {
        let mut scene = Scene::from_svg(DOC).unwrap();
        assert!(scene.set_attr(ElementId(4), "d", "M0 0L3 4"));
        assert_eq!(scene.attr(ElementId(4), "d"), Some("M0 0L3 4"));
        assert!(!scene.set_attr(ElementId(99), "d", "M0 0"));
    }
}
