//! SVG parsing from XML.
//!
//! Tokenizing is delegated to `quick-xml`. This module turns the event stream
//! into an [`SvgElement`] tree and picks the document root.
//!
//! Two read modes share one tree builder:
//! - [`ReadMode::Strict`]: tokenizer errors and unclosed tags are errors
//!   (used by [`parse`]).
//! - [`ReadMode::Lenient`]: mismatched end tags are repaired against the
//!   open-element stack and a tokenizer error ends the read, closing whatever
//!   is still open (used by the sanitizer).
//!
//! Every later stage walks the tree recursively, so nesting is capped at
//! [`MAX_DEPTH`]. Strict reads fail past it; lenient reads drop the deeper
//! subtrees and keep a little headroom below the strict limit.

use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::ast::{Attrs, AttrsExt, SvgAstNode, SvgElement};
use crate::error::{MotifError, MotifResult};

/// Deepest element nesting a strict read accepts (the root is depth 1).
pub const MAX_DEPTH: usize = 256;

/// Room for wrapper groups added after sanitizing (usvg output).
const LENIENT_HEADROOM: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReadMode {
    Strict,
    Lenient,
}

impl ReadMode {
    const fn depth_limit(self) -> usize {
        match self {
            Self::Strict => MAX_DEPTH,
            Self::Lenient => MAX_DEPTH - LENIENT_HEADROOM,
        }
    }
}

/// Parse sanitized SVG markup into a tree rooted at `<svg>`.
///
/// # Errors
/// - [`MotifError::NoRootElement`] for empty input or a document without elements
/// - [`MotifError::RootNotSvg`] when the first element is not `<svg>`
/// - [`MotifError::Xml`] for malformed markup
/// - [`MotifError::TooDeep`] for nesting past [`MAX_DEPTH`]
pub fn parse(clean: &str) -> MotifResult<SvgElement> {
    if clean.trim().is_empty() {
        return Err(MotifError::NoRootElement);
    }

    let nodes = read_nodes(clean, ReadMode::Strict)?;
    let root = nodes
        .into_iter()
        .find_map(|node| match node {
            SvgAstNode::Element(elem) => Some(elem),
            SvgAstNode::Text { .. } => None,
        })
        .ok_or(MotifError::NoRootElement)?;

    if local_name(&root.tag_name) != "svg" {
        return Err(MotifError::RootNotSvg {
            found: root.tag_name,
        });
    }

    Ok(root)
}

/// Tag name without its namespace prefix (`svg:rect` -> `rect`).
#[inline]
pub(crate) fn local_name(tag: &str) -> &str {
    tag.rsplit(':').next().unwrap_or(tag)
}

// ============================================================================
// Tree Builder
// ============================================================================

/// Read every top-level node of a document.
pub(crate) fn read_nodes(input: &str, mode: ReadMode) -> MotifResult<Vec<SvgAstNode>> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().check_end_names = mode == ReadMode::Strict;

    let mut builder = TreeBuilder::default();
    let limit = mode.depth_limit();

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(err) if mode == ReadMode::Strict => {
                return Err(MotifError::xml(reader.error_position(), err));
            }
            // Best effort: keep what was read so far
            Err(_) => break,
        };

        // Inside a dropped subtree only the nesting is tracked
        if builder.skipped > 0 {
            match event {
                Event::Start(_) => builder.skipped += 1,
                Event::End(_) => builder.skipped -= 1,
                Event::Eof => break,
                _ => {}
            }
            continue;
        }

        if matches!(event, Event::Start(_) | Event::Empty(_)) && builder.stack.len() >= limit {
            if mode == ReadMode::Strict {
                return Err(MotifError::TooDeep { limit });
            }
            if matches!(event, Event::Start(_)) {
                builder.skipped = 1;
            }
            continue;
        }

        match event {
            Event::Start(start) => {
                let elem = element_from_start(&start, mode)
                    .map_err(|err| MotifError::xml(reader.buffer_position(), err))?;
                builder.open(elem);
            }
            Event::Empty(start) => {
                let elem = element_from_start(&start, mode)
                    .map_err(|err| MotifError::xml(reader.buffer_position(), err))?;
                builder.append(SvgAstNode::Element(elem));
            }
            Event::End(end) => {
                let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                builder.close(&name);
            }
            Event::Text(text) => {
                let raw = String::from_utf8_lossy(&text).into_owned();
                let value = quick_xml::escape::unescape(&raw)
                    .map(Cow::into_owned)
                    .unwrap_or(raw);
                builder.text(&value);
            }
            Event::CData(data) => {
                builder.text(&String::from_utf8_lossy(&data));
            }
            Event::GeneralRef(entity) => {
                let name = String::from_utf8_lossy(&entity);
                builder.text(&resolve_entity(&name));
            }
            Event::Eof => break,
            // Comments, PIs, declarations and doctypes carry no drawable content
            _ => {}
        }
    }

    if mode == ReadMode::Strict
        && let Some(open) = builder.stack.last()
    {
        return Err(MotifError::xml(
            reader.buffer_position(),
            format!("unclosed element <{}>", open.tag_name),
        ));
    }

    Ok(builder.finish())
}

#[derive(Default)]
struct TreeBuilder {
    stack: Vec<SvgElement>,
    roots: Vec<SvgAstNode>,
    /// Open elements of a subtree dropped for being too deep.
    skipped: usize,
}

impl TreeBuilder {
    fn open(&mut self, elem: SvgElement) {
        self.stack.push(elem);
    }

    fn append(&mut self, node: SvgAstNode) {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.roots.push(node),
        }
    }

    /// Close the innermost open element named `name`.
    ///
    /// Elements opened after it are closed implicitly. An end tag with no
    /// matching open element is ignored.
    fn close(&mut self, name: &str) {
        let Some(pos) = self.stack.iter().rposition(|e| e.tag_name == name) else {
            return;
        };
        while self.stack.len() > pos {
            self.pop();
        }
    }

    fn pop(&mut self) {
        if let Some(elem) = self.stack.pop() {
            self.append(SvgAstNode::Element(elem));
        }
    }

    /// Append character data, merging with a preceding text node.
    ///
    /// Whitespace-only runs are dropped once merged runs settle; see `finish`.
    fn text(&mut self, value: &str) {
        let Some(parent) = self.stack.last_mut() else {
            // Character data outside the root element is ignored
            return;
        };
        if let Some(SvgAstNode::Text { value: prev }) = parent.children.last_mut() {
            prev.push_str(value);
        } else {
            parent.children.push(SvgAstNode::text(value));
        }
    }

    fn finish(mut self) -> Vec<SvgAstNode> {
        while !self.stack.is_empty() {
            self.pop();
        }
        for node in &mut self.roots {
            if let SvgAstNode::Element(elem) = node {
                drop_blank_text(elem);
            }
        }
        self.roots
    }
}

fn drop_blank_text(elem: &mut SvgElement) {
    elem.children.retain(|child| match child {
        SvgAstNode::Text { value } => !value.trim().is_empty(),
        SvgAstNode::Element(_) => true,
    });
    for child in &mut elem.children {
        if let SvgAstNode::Element(e) = child {
            drop_blank_text(e);
        }
    }
}

fn element_from_start(start: &BytesStart<'_>, mode: ReadMode) -> Result<SvgElement, String> {
    let tag_name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes: Attrs = Vec::new();

    for attr in start.attributes().with_checks(mode == ReadMode::Strict) {
        let attr = match attr {
            Ok(attr) => attr,
            Err(err) if mode == ReadMode::Strict => return Err(err.to_string()),
            // Attribute syntax is broken past this point
            Err(_) => break,
        };
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = match attr.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(err) if mode == ReadMode::Strict => return Err(err.to_string()),
            Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
        };
        // First occurrence wins on duplicates
        if !attributes.has_attr(&key) {
            attributes.push((key, value));
        }
    }

    Ok(SvgElement {
        tag_name,
        attributes,
        children: Vec::new(),
    })
}

/// Resolve a general entity reference (`amp`, `#38`, `#x26`).
///
/// Unknown named entities are kept verbatim.
fn resolve_entity(name: &str) -> Cow<'static, str> {
    let resolved = match name {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "apos" => Some('\''),
        "quot" => Some('"'),
        _ => name.strip_prefix('#').and_then(|num| {
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }),
    };

    match resolved {
        Some(c) => Cow::Owned(c.to_string()),
        None => Cow::Owned(format!("&{name};")),
    }
}

// ============================================================================
// Tests
// ============================================================================
