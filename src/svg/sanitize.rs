//! SVG sanitization.
//!
//! Allow-list filter over a leniently parsed tree:
//! - forbidden tags (`script`, `style`, `foreignObject`, ...) go with their subtree
//! - unknown tags are unwrapped: the element goes, its allowed children stay
//! - attributes outside the allow-list go, event handlers (`on*`) always go
//! - `href` values with script-capable schemes go
//!
//! Malformed markup never fails here. The lenient reader repairs what it
//! can and drops the rest.

use super::ast::{Attrs, SvgAstNode, SvgElement};
use super::parse::{ReadMode, local_name, read_nodes};
use super::serialize::to_svg_string;
use crate::debug;

/// Tags removed together with everything inside them.
const FORBIDDEN_TAGS: &[&str] = &[
    "script",
    "style",
    "foreignObject",
    "iframe",
    "embed",
    "object",
    "audio",
    "video",
    "canvas",
];

/// Strip unsafe markup from raw SVG text.
pub fn sanitize(raw: &str) -> String {
    // Lenient reads only fail on tokenizer errors, which end the read instead
    let nodes = read_nodes(raw, ReadMode::Lenient).unwrap_or_default();

    let mut out = String::with_capacity(raw.len());
    let mut removed = 0usize;
    for node in nodes {
        if let SvgAstNode::Element(elem) = node {
            for kept in filter_element(elem, &mut removed) {
                if let SvgAstNode::Element(e) = kept {
                    out.push_str(&to_svg_string(&e));
                }
            }
        }
    }

    if removed > 0 {
        debug!("sanitize"; "removed {} unsafe element(s) or attribute(s)", removed);
    }
    out
}

/// Filter one element, returning the nodes that replace it.
///
/// Allowed elements map to themselves; unwrapped elements map to their
/// surviving children; forbidden elements map to nothing.
fn filter_element(mut elem: SvgElement, removed: &mut usize) -> Vec<SvgAstNode> {
    let name = local_name(&elem.tag_name);

    if FORBIDDEN_TAGS.contains(&name) {
        *removed += 1;
        return Vec::new();
    }

    let children = std::mem::take(&mut elem.children);
    let mut kept = Vec::with_capacity(children.len());
    for child in children {
        match child {
            SvgAstNode::Element(e) => kept.extend(filter_element(e, removed)),
            text @ SvgAstNode::Text { .. } => kept.push(text),
        }
    }

    if !is_allowed_tag(name) {
        *removed += 1;
        return kept;
    }

    let before = elem.attributes.len();
    elem.attributes = filter_attrs(std::mem::take(&mut elem.attributes));
    *removed += before - elem.attributes.len();

    elem.children = kept;
    vec![SvgAstNode::Element(elem)]
}

fn filter_attrs(attrs: Attrs) -> Attrs {
    attrs
        .into_iter()
        .filter(|(key, value)| is_allowed_attr(key) && is_safe_value(key, value))
        .collect()
}

/// Check if a tag is in the SVG allow-list
pub fn is_allowed_tag(tag: &str) -> bool {
    matches!(
        tag,
        // Containers
        "svg" | "g" | "defs" | "symbol" | "use" | "switch" | "a"
        // Shapes
        | "path" | "circle" | "rect" | "line" | "polyline" | "polygon" | "ellipse"
        // Text
        | "text" | "tspan" | "textPath" | "title" | "desc"
        // Paint servers
        | "linearGradient" | "radialGradient" | "stop" | "pattern"
        // Clipping and masking
        | "clipPath" | "mask" | "marker"
        // Filters
        | "filter" | "feBlend" | "feColorMatrix" | "feComponentTransfer"
        | "feComposite" | "feConvolveMatrix" | "feDiffuseLighting"
        | "feDisplacementMap" | "feDistantLight" | "feDropShadow"
        | "feFlood" | "feFuncR" | "feFuncG" | "feFuncB" | "feFuncA"
        | "feGaussianBlur" | "feMerge" | "feMergeNode"
        | "feMorphology" | "feOffset" | "fePointLight" | "feSpecularLighting"
        | "feSpotLight" | "feTile" | "feTurbulence"
        // Other
        | "image" | "metadata" | "view"
    )
}

/// Check if an attribute is in the allow-list.
pub fn is_allowed_attr(key: &str) -> bool {
    let lower = key.to_ascii_lowercase();
    if lower.starts_with("on") {
        return false;
    }
    if lower.starts_with("aria-") || lower.starts_with("data-") {
        return true;
    }
    if lower == "xmlns" || lower.starts_with("xmlns:") {
        return true;
    }

    matches!(
        key,
        // Core
        "id" | "class" | "role" | "lang" | "xml:lang" | "xml:space" | "tabindex"
        | "href" | "xlink:href" | "xlink:title" | "version" | "focusable"
        // Viewport
        | "viewBox" | "preserveAspectRatio" | "width" | "height" | "x" | "y"
        // Geometry
        | "cx" | "cy" | "r" | "rx" | "ry" | "x1" | "y1" | "x2" | "y2"
        | "d" | "points" | "pathLength" | "transform"
        // Paint
        | "fill" | "fill-opacity" | "fill-rule" | "stroke" | "stroke-width"
        | "stroke-linecap" | "stroke-linejoin" | "stroke-miterlimit"
        | "stroke-dasharray" | "stroke-dashoffset" | "stroke-opacity"
        | "opacity" | "color" | "display" | "visibility" | "vector-effect"
        | "paint-order" | "shape-rendering" | "color-interpolation-filters"
        | "clip-path" | "clip-rule" | "mask" | "filter"
        | "marker-start" | "marker-mid" | "marker-end"
        // Gradients and patterns
        | "offset" | "stop-color" | "stop-opacity" | "gradientUnits"
        | "gradientTransform" | "spreadMethod" | "fx" | "fy" | "fr"
        | "patternUnits" | "patternContentUnits" | "patternTransform"
        | "clipPathUnits" | "maskUnits" | "maskContentUnits"
        | "markerWidth" | "markerHeight" | "markerUnits" | "refX" | "refY" | "orient"
        // Filters
        | "filterUnits" | "primitiveUnits" | "in" | "in2" | "result" | "mode"
        | "stdDeviation" | "dx" | "dy" | "values" | "type" | "operator"
        | "k1" | "k2" | "k3" | "k4" | "flood-color" | "flood-opacity"
        | "baseFrequency" | "numOctaves" | "seed" | "scale" | "radius"
        | "tableValues" | "slope" | "intercept" | "amplitude" | "exponent"
        | "xChannelSelector" | "yChannelSelector"
        // Text
        | "font-family" | "font-size" | "font-weight" | "font-style"
        | "text-anchor" | "dominant-baseline" | "letter-spacing"
        | "word-spacing" | "text-decoration" | "startOffset" | "textLength"
        | "lengthAdjust" | "rotate"
    )
}

/// Reject link targets that can execute script.
fn is_safe_value(key: &str, value: &str) -> bool {
    if key != "href" && key != "xlink:href" {
        return true;
    }
    let normalized: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    !(normalized.starts_with("javascript:")
        || normalized.starts_with("vbscript:")
        || normalized.starts_with("data:text/html"))
}

// ============================================================================
// Tests
// ============================================================================
