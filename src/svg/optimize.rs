//! SVG optimization.
//!
//! Two backends:
//! - [`OptimizeBackend::Minify`] (default): passes over the parsed tree that
//!   keep element kinds intact. Numbers are rounded, ids cleaned, and empty
//!   containers dropped.
//! - [`OptimizeBackend::Usvg`]: round-trip through `usvg`, which normalizes
//!   every shape to a `<path>` and resolves styles.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::ast::{AttrsExt, SvgAstNode, SvgElement};
use super::number::{NUMBER, format_rounded};
use super::parse::{local_name, parse};
use super::serialize::to_svg_string;
use crate::debug;
use crate::error::{MotifError, MotifResult};

/// Upper bound on multipass iterations.
const MAX_PASSES: usize = 10;

/// Optimizer backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizeBackend {
    /// Tree passes that preserve element kinds.
    #[default]
    Minify,
    /// Normalize through usvg (shapes become paths).
    Usvg,
}

/// Options for SVG optimization
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizeOptions {
    /// Decimal places kept for coordinates and transforms.
    pub precision: u8,
    /// Repeat passes until the output stops changing.
    pub multipass: bool,
    pub backend: OptimizeBackend,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            precision: 2,
            multipass: true,
            backend: OptimizeBackend::Minify,
        }
    }
}

/// Optimize SVG markup.
///
/// # Errors
/// Parse failures and usvg failures are returned as-is.
pub fn optimize(svg: &str, options: &OptimizeOptions) -> MotifResult<String> {
    let optimized = match options.backend {
        OptimizeBackend::Minify => optimize_minify(svg, options)?,
        OptimizeBackend::Usvg => optimize_usvg(svg, options)?,
    };
    debug!(
        "optimize";
        "{} -> {} bytes ({:?})", svg.len(), optimized.len(), options.backend
    );
    Ok(optimized)
}

// ============================================================================
// usvg backend
// ============================================================================

fn optimize_usvg(svg: &str, options: &OptimizeOptions) -> MotifResult<String> {
    let source = parse(svg)?;
    let tree =
        usvg::Tree::from_str(svg, &usvg::Options::default()).map_err(MotifError::optimize)?;

    let write_options = usvg::WriteOptions {
        coordinates_precision: options.precision,
        transforms_precision: options.precision,
        indent: usvg::Indent::None,
        ..Default::default()
    };

    let mut root = parse(&tree.to_string(&write_options))?;
    let size = tree.size();
    restore_fitted_root(
        &mut root,
        &source,
        f64::from(size.width()),
        f64::from(size.height()),
        options.precision,
    );
    Ok(to_svg_string(&root))
}

/// Put the fitter's root sizing back on usvg output.
///
/// usvg writes a fixed `width`/`height` and folds the viewBox into a root
/// transform, so content already lives in `0 0 width height`.
fn restore_fitted_root(
    root: &mut SvgElement,
    source: &SvgElement,
    width: f64,
    height: f64,
    precision: u8,
) {
    let attrs = &mut root.attributes;
    attrs.remove_attr("width");
    attrs.remove_attr("height");
    attrs.set_attr(
        "viewBox",
        format!(
            "0 0 {} {}",
            format_rounded(width, precision),
            format_rounded(height, precision)
        ),
    );
    for key in ["preserveAspectRatio", "style"] {
        if let Some(value) = source.attr(key) {
            attrs.set_attr(key, value);
        }
    }
}

// ============================================================================
// minify backend
// ============================================================================

fn optimize_minify(svg: &str, options: &OptimizeOptions) -> MotifResult<String> {
    let mut root = parse(svg)?;
    let passes = if options.multipass { MAX_PASSES } else { 1 };

    let mut previous = to_svg_string(&root);
    for pass in 1..=passes {
        remove_metadata(&mut root);
        round_numbers(&mut root, options.precision);
        cleanup_ids(&mut root);
        remove_empty_containers(&mut root);

        let current = to_svg_string(&root);
        if current == previous {
            debug!("optimize"; "fixpoint after {} pass(es)", pass);
            break;
        }
        previous = current;
    }

    Ok(previous)
}

/// Drop `<metadata>` elements (editor payloads).
fn remove_metadata(elem: &mut SvgElement) {
    elem.children
        .retain(|child| !matches!(child, SvgAstNode::Element(e) if local_name(&e.tag_name) == "metadata"));
    for child in elem.child_elements_mut() {
        remove_metadata(child);
    }
}

/// Attributes whose value is made of numbers (and path commands).
fn is_numeric_attr(key: &str) -> bool {
    matches!(
        key,
        "x" | "y" | "width" | "height" | "cx" | "cy" | "r" | "rx" | "ry"
            | "x1" | "y1" | "x2" | "y2" | "fx" | "fy" | "fr"
            | "points" | "transform" | "gradientTransform" | "patternTransform"
            | "viewBox" | "stroke-width" | "stroke-dashoffset" | "stroke-dasharray"
            | "stroke-miterlimit" | "opacity" | "fill-opacity" | "stroke-opacity"
            | "stop-opacity" | "offset" | "stdDeviation" | "dx" | "dy"
    )
}

/// Round every number in numeric attributes to `precision` places.
fn round_numbers(elem: &mut SvgElement, precision: u8) {
    for (key, value) in &mut elem.attributes {
        let rounded = match key.as_str() {
            "d" => round_path_data(value, precision),
            key if is_numeric_attr(key) => Some(round_number_tokens(value, precision)),
            _ => None,
        };
        if let Some(rounded) = rounded
            && rounded != *value
        {
            *value = rounded;
        }
    }
    for child in elem.child_elements_mut() {
        round_numbers(child, precision);
    }
}

/// Round path data segment by segment and write it back with explicit
/// separators. Arc flags are written as single `0`/`1` tokens.
///
/// Returns `None` for data that does not parse, which is then kept as is.
fn round_path_data(d: &str, precision: u8) -> Option<String> {
    use svgtypes::PathSegment as Seg;

    let num = |v: f64| format_rounded(v, precision);
    let flag = |set: bool| String::from(if set { "1" } else { "0" });

    let mut out = String::with_capacity(d.len());
    for segment in svgtypes::PathParser::from(d) {
        let (command, abs, args) = match segment.ok()? {
            Seg::MoveTo { abs, x, y } => ('M', abs, vec![num(x), num(y)]),
            Seg::LineTo { abs, x, y } => ('L', abs, vec![num(x), num(y)]),
            Seg::HorizontalLineTo { abs, x } => ('H', abs, vec![num(x)]),
            Seg::VerticalLineTo { abs, y } => ('V', abs, vec![num(y)]),
            Seg::CurveTo { abs, x1, y1, x2, y2, x, y } => (
                'C',
                abs,
                vec![num(x1), num(y1), num(x2), num(y2), num(x), num(y)],
            ),
            Seg::SmoothCurveTo { abs, x2, y2, x, y } => {
                ('S', abs, vec![num(x2), num(y2), num(x), num(y)])
            }
            Seg::Quadratic { abs, x1, y1, x, y } => {
                ('Q', abs, vec![num(x1), num(y1), num(x), num(y)])
            }
            Seg::SmoothQuadratic { abs, x, y } => ('T', abs, vec![num(x), num(y)]),
            Seg::EllipticalArc {
                abs,
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                x,
                y,
            } => (
                'A',
                abs,
                vec![
                    num(rx),
                    num(ry),
                    num(x_axis_rotation),
                    flag(large_arc),
                    flag(sweep),
                    num(x),
                    num(y),
                ],
            ),
            Seg::ClosePath { abs } => ('Z', abs, Vec::new()),
        };
        out.push(if abs { command } else { command.to_ascii_lowercase() });
        out.push_str(&args.join(" "));
    }
    Some(out)
}

/// Round each number token of a list or length value.
///
/// Units, percentages and separators stay where they were. A space goes
/// between two numbers that would otherwise run together (`1.001.5`).
fn round_number_tokens(value: &str, precision: u8) -> String {
    let mut out = String::with_capacity(value.len());
    let mut last = 0;
    for token in NUMBER.find_iter(value) {
        let gap = &value[last..token.start()];
        let rounded = token
            .as_str()
            .parse::<f64>()
            .map_or_else(|_| token.as_str().to_string(), |n| format_rounded(n, precision));

        let joins_previous = out.ends_with(|c: char| c.is_ascii_digit() || c == '.');
        if gap.is_empty() && joins_previous && !rounded.starts_with('-') {
            out.push(' ');
        }
        out.push_str(gap);
        out.push_str(&rounded);
        last = token.end();
    }
    out.push_str(&value[last..]);
    out
}

/// Deduplicate ids, then drop ids nothing references.
///
/// Root ids are kept: they are how embedders address the document.
fn cleanup_ids(root: &mut SvgElement) {
    let mut seen = FxHashSet::default();
    dedupe_ids(root, &mut seen);

    let mut referenced = FxHashSet::default();
    root.walk(&mut |elem| {
        for (_, value) in &elem.attributes {
            collect_references(value, &mut referenced);
        }
        if local_name(&elem.tag_name) == "style" {
            collect_references(&elem.text_content(), &mut referenced);
        }
    });

    for child in root.child_elements_mut() {
        remove_unreferenced_ids(child, &referenced);
    }
}

fn dedupe_ids(elem: &mut SvgElement, seen: &mut FxHashSet<String>) {
    if let Some(id) = elem.attr("id").map(str::to_string)
        && !seen.insert(id)
    {
        elem.attributes.remove_attr("id");
    }
    for child in elem.child_elements_mut() {
        dedupe_ids(child, seen);
    }
}

/// Collect ids referenced as `url(#id)` or `#id` link targets.
fn collect_references(value: &str, out: &mut FxHashSet<String>) {
    let mut rest = value;
    while let Some(pos) = rest.find('#') {
        let tail = &rest[pos + 1..];
        let end = tail
            .find(|c: char| !(c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ':')))
            .unwrap_or(tail.len());
        if end > 0 {
            out.insert(tail[..end].to_string());
        }
        rest = &tail[end..];
    }
}

fn remove_unreferenced_ids(elem: &mut SvgElement, referenced: &FxHashSet<String>) {
    if elem.attr("id").is_some_and(|id| !referenced.contains(id)) {
        elem.attributes.remove_attr("id");
    }
    for child in elem.child_elements_mut() {
        remove_unreferenced_ids(child, referenced);
    }
}

/// Drop attribute-less `<g>`/`<defs>` with no children.
fn remove_empty_containers(elem: &mut SvgElement) {
    for child in elem.child_elements_mut() {
        remove_empty_containers(child);
    }
    elem.children.retain(|child| match child {
        SvgAstNode::Element(e) => {
            let container = matches!(local_name(&e.tag_name), "g" | "defs");
            !(container && e.children.is_empty() && e.attributes.is_empty())
        }
        SvgAstNode::Text { .. } => true,
    });
}

// ============================================================================
// Tests
// ============================================================================
