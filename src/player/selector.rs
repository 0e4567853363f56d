//! CSS selector matching over a [`Scene`].
//!
//! Parsing and matching are done by Servo's `selectors` crate; this module
//! supplies the [`SelectorImpl`] (no pseudo-classes or pseudo-elements) and
//! an [`Element`](selectors::Element) view of scene nodes. Tag names are
//! matched case-sensitively, as SVG requires (`linearGradient`).

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};

use cssparser::{CssStringWriter, ParserInput, ToCss, serialize_identifier};
use precomputed_hash::PrecomputedHash;
use rustc_hash::FxHasher;
use selectors::attr::{AttrSelectorOperation, CaseSensitivity, NamespaceConstraint};
use selectors::context::QuirksMode;
use selectors::matching::{
    ElementSelectorFlags, IgnoreNthChildForInvalidation, MatchingContext, MatchingMode,
    NeedsSelectorFlags, matches_selector_list,
};
use selectors::parser::{ParseRelative, SelectorImpl, SelectorList, SelectorParseErrorKind};
use selectors::{NthIndexCache, OpaqueElement};
use thiserror::Error;

use super::scene::{ElementId, Scene};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("invalid selector `{selector}` at {line}:{column}")]
    Invalid {
        selector: String,
        line: u32,
        column: u32,
    },
}

// ============================================================================
// Selector implementation
// ============================================================================

/// Identifier, local name and namespace type for [`SvgSelectors`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SvgIdent(String);

impl AsRef<str> for SvgIdent {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SvgIdent {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SvgIdent {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl ToCss for SvgIdent {
    fn to_css<W: fmt::Write>(&self, dest: &mut W) -> fmt::Result {
        serialize_identifier(&self.0, dest)
    }
}

impl PrecomputedHash for SvgIdent {
    fn precomputed_hash(&self) -> u32 {
        let mut hasher = FxHasher::default();
        self.0.hash(&mut hasher);
        hasher.finish() as u32
    }
}

/// Attribute selector value (`[fill="red"]`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SvgAttrValue(String);

impl AsRef<str> for SvgAttrValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SvgAttrValue {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl ToCss for SvgAttrValue {
    fn to_css<W: fmt::Write>(&self, dest: &mut W) -> fmt::Result {
        use fmt::Write as _;
        write!(CssStringWriter::new(dest), "{}", self.0)
    }
}

/// Uninhabited: no pseudo-classes or pseudo-elements are supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoPseudo {}

impl ToCss for NoPseudo {
    fn to_css<W: fmt::Write>(&self, _dest: &mut W) -> fmt::Result {
        match *self {}
    }
}

impl selectors::parser::NonTSPseudoClass for NoPseudo {
    type Impl = SvgSelectors;

    fn is_active_or_hover(&self) -> bool {
        match *self {}
    }

    fn is_user_action_state(&self) -> bool {
        match *self {}
    }
}

impl selectors::parser::PseudoElement for NoPseudo {
    type Impl = SvgSelectors;

    fn accepts_state_pseudo_classes(&self) -> bool {
        match *self {}
    }

    fn valid_after_slotted(&self) -> bool {
        match *self {}
    }
}

#[derive(Debug, Clone)]
pub enum SvgSelectors {}

impl SelectorImpl for SvgSelectors {
    type ExtraMatchingData<'a> = ();
    type AttrValue = SvgAttrValue;
    type Identifier = SvgIdent;
    type LocalName = SvgIdent;
    type NamespaceUrl = SvgIdent;
    type NamespacePrefix = SvgIdent;
    type BorrowedNamespaceUrl = str;
    type BorrowedLocalName = str;
    type NonTSPseudoClass = NoPseudo;
    type PseudoElement = NoPseudo;
}

struct SvgSelectorParser;

impl<'i> selectors::parser::Parser<'i> for SvgSelectorParser {
    type Impl = SvgSelectors;
    type Error = SelectorParseErrorKind<'i>;
}

// ============================================================================
// Selector
// ============================================================================

/// A parsed selector list.
#[derive(Debug, Clone)]
pub struct Selector {
    list: SelectorList<SvgSelectors>,
}

impl Selector {
    pub fn parse(selector: &str) -> Result<Self, SelectorError> {
        if selector.trim().is_empty() {
            return Err(SelectorError::Empty);
        }
        let mut input = ParserInput::new(selector);
        let mut parser = cssparser::Parser::new(&mut input);
        let list = SelectorList::parse(&SvgSelectorParser, &mut parser, ParseRelative::No)
            .map_err(|err| SelectorError::Invalid {
                selector: selector.to_string(),
                line: err.location.line,
                column: err.location.column,
            })?;
        Ok(Self { list })
    }

    /// Whether `id` matches any selector of the list.
    pub fn matches(&self, scene: &Scene, id: ElementId) -> bool {
        let mut cache = NthIndexCache::default();
        let mut context = matching_context(&mut cache);
        matches_selector_list(&self.list, &SceneElement { scene, id }, &mut context)
    }

    /// Matching ids among `ids`, sharing one matching context.
    pub(super) fn filter(
        &self,
        scene: &Scene,
        ids: impl Iterator<Item = ElementId>,
    ) -> Vec<ElementId> {
        let mut cache = NthIndexCache::default();
        let mut context = matching_context(&mut cache);
        ids.filter(|&id| matches_selector_list(&self.list, &SceneElement { scene, id }, &mut context))
            .collect()
    }
}

fn matching_context(cache: &mut NthIndexCache) -> MatchingContext<'_, SvgSelectors> {
    MatchingContext::new(
        MatchingMode::Normal,
        None,
        cache,
        QuirksMode::NoQuirks,
        NeedsSelectorFlags::No,
        IgnoreNthChildForInvalidation::No,
    )
}

// ============================================================================
// Element view
// ============================================================================

/// A scene node as seen by the selector matcher.
#[derive(Debug, Clone, Copy)]
struct SceneElement<'a> {
    scene: &'a Scene,
    id: ElementId,
}

impl<'a> SceneElement<'a> {
    fn at(&self, id: ElementId) -> Self {
        Self {
            scene: self.scene,
            id,
        }
    }

    fn siblings(&self) -> &'a [ElementId] {
        self.scene
            .parent(self.id)
            .map_or(&[], |parent| self.scene.children(parent))
    }

    fn sibling(&self, offset: isize) -> Option<Self> {
        let siblings = self.siblings();
        let pos = siblings.iter().position(|&c| c == self.id)?;
        let index = pos.checked_add_signed(offset)?;
        siblings.get(index).map(|&id| self.at(id))
    }

    fn attr(&self, name: &str) -> Option<&'a str> {
        self.scene.attr(self.id, name)
    }
}

impl selectors::Element for SceneElement<'_> {
    type Impl = SvgSelectors;

    fn opaque(&self) -> OpaqueElement {
        // Each node owns its attribute list, so its address identifies the node
        match self.scene.attributes(self.id) {
            Some(attrs) => OpaqueElement::new(attrs),
            None => OpaqueElement::new(self.scene),
        }
    }

    fn parent_element(&self) -> Option<Self> {
        self.scene.parent(self.id).map(|p| self.at(p))
    }

    fn parent_node_is_shadow_root(&self) -> bool {
        false
    }

    fn containing_shadow_host(&self) -> Option<Self> {
        None
    }

    fn is_pseudo_element(&self) -> bool {
        false
    }

    fn prev_sibling_element(&self) -> Option<Self> {
        self.sibling(-1)
    }

    fn next_sibling_element(&self) -> Option<Self> {
        self.sibling(1)
    }

    fn first_element_child(&self) -> Option<Self> {
        self.scene.children(self.id).first().map(|&c| self.at(c))
    }

    fn is_html_element_in_html_document(&self) -> bool {
        false
    }

    fn has_local_name(&self, name: &str) -> bool {
        self.scene.tag(self.id) == Some(name)
    }

    fn has_namespace(&self, _ns: &str) -> bool {
        true
    }

    fn is_same_type(&self, other: &Self) -> bool {
        self.scene.tag(self.id) == other.scene.tag(other.id)
    }

    fn attr_matches(
        &self,
        _ns: &NamespaceConstraint<&SvgIdent>,
        local_name: &SvgIdent,
        operation: &AttrSelectorOperation<&SvgAttrValue>,
    ) -> bool {
        self.attr(local_name.as_ref())
            .is_some_and(|value| operation.eval_str(value))
    }

    fn match_non_ts_pseudo_class(
        &self,
        pc: &NoPseudo,
        _context: &mut MatchingContext<'_, SvgSelectors>,
    ) -> bool {
        match *pc {}
    }

    fn match_pseudo_element(
        &self,
        pe: &NoPseudo,
        _context: &mut MatchingContext<'_, SvgSelectors>,
    ) -> bool {
        match *pe {}
    }

    fn apply_selector_flags(&self, _flags: ElementSelectorFlags) {}

    fn is_link(&self) -> bool {
        self.scene.tag(self.id) == Some("a") && self.attr("href").is_some()
    }

    fn is_html_slot_element(&self) -> bool {
        false
    }

    fn imported_part(&self, _name: &SvgIdent) -> Option<SvgIdent> {
        None
    }

    fn is_part(&self, _name: &SvgIdent) -> bool {
        false
    }

    fn has_id(&self, id: &SvgIdent, case: CaseSensitivity) -> bool {
        self.attr("id")
            .is_some_and(|value| case.eq(value.as_bytes(), id.as_ref().as_bytes()))
    }

    fn has_class(&self, name: &SvgIdent, case: CaseSensitivity) -> bool {
        self.attr("class").is_some_and(|classes| {
            classes
                .split_ascii_whitespace()
                .any(|c| case.eq(c.as_bytes(), name.as_ref().as_bytes()))
        })
    }

    fn is_empty(&self) -> bool {
        self.scene.children(self.id).is_empty()
    }

    fn is_root(&self) -> bool {
        self.scene.parent(self.id).is_none()
    }
}

// ============================================================================
// Tests
// ============================================================================
