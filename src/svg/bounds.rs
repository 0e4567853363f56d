//! SVG bounding box calculation.
//!
//! Walks the element tree, composing each ancestor's `transform`, and
//! accumulates the geometric bounds of every drawable shape. Stroke width is
//! not included: the box is the geometry as authored.

use kurbo::{Affine, BezPath, Point, Shape};

use super::ast::SvgElement;
use super::number::{parse_length, parse_number_list};
use super::parse::local_name;
use super::transform::{axis_scales, compose};

/// Axis-aligned bounding box accumulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BBox {
    /// A box that contains nothing yet.
    pub const EMPTY: Self = Self {
        min_x: f64::INFINITY,
        min_y: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        max_y: f64::NEG_INFINITY,
    };

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Widen to include a point. Non-finite points are ignored.
    pub fn include(&mut self, x: f64, y: f64) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Include a point after mapping it through `matrix`.
    #[inline]
    fn include_mapped(&mut self, matrix: Affine, x: f64, y: f64) {
        let p = matrix * Point::new(x, y);
        self.include(p.x, p.y);
    }

    /// Include the four corners of a local-space rectangle.
    fn include_rect(&mut self, matrix: Affine, x0: f64, y0: f64, x1: f64, y1: f64) {
        self.include_mapped(matrix, x0, y0);
        self.include_mapped(matrix, x1, y0);
        self.include_mapped(matrix, x0, y1);
        self.include_mapped(matrix, x1, y1);
    }

    /// `(x, y, width, height)`, collapsing an empty box to the origin.
    pub fn to_xywh(&self) -> (f64, f64, f64, f64) {
        if self.is_empty() {
            return (0.0, 0.0, 0.0, 0.0);
        }
        (
            self.min_x,
            self.min_y,
            self.max_x - self.min_x,
            self.max_y - self.min_y,
        )
    }
}

impl Default for BBox {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Elements whose children are never rendered in place.
const NON_RENDERED: &[&str] = &[
    "defs",
    "clipPath",
    "mask",
    "symbol",
    "pattern",
    "marker",
    "linearGradient",
    "radialGradient",
    "filter",
    "metadata",
    "title",
    "desc",
];

/// Calculate the bounding box of all drawable content under `root`.
///
/// The root's own `transform` is applied, matching how a browser would place
/// its children. Returns [`BBox::EMPTY`] when nothing bounded is found.
pub fn calculate_bounds(root: &SvgElement) -> BBox {
    let mut bbox = BBox::EMPTY;
    traverse(root, Affine::IDENTITY, &mut bbox);
    bbox
}

/// Recursively traverse an element and its children, accumulating bounds
fn traverse(elem: &SvgElement, parent: Affine, bbox: &mut BBox) {
    let name = local_name(&elem.tag_name);
    if NON_RENDERED.contains(&name) {
        return;
    }

    let matrix = compose(parent, elem.attr("transform"));
    shape_bounds(elem, name, matrix, bbox);

    for child in elem.child_elements() {
        traverse(child, matrix, bbox);
    }
}

/// Widen `bbox` by the geometry of a single shape element.
fn shape_bounds(elem: &SvgElement, name: &str, matrix: Affine, bbox: &mut BBox) {
    let num = |key: &str| elem.attr(key).and_then(parse_length).unwrap_or(0.0);

    match name {
        "rect" | "image" | "use" => {
            let (x, y) = (num("x"), num("y"));
            let (w, h) = (num("width"), num("height"));
            if w > 0.0 && h > 0.0 {
                bbox.include_rect(matrix, x, y, x + w, y + h);
            }
        }
        "circle" => {
            let r = num("r");
            ellipse_bounds(matrix, num("cx"), num("cy"), r, r, bbox);
        }
        "ellipse" => {
            ellipse_bounds(matrix, num("cx"), num("cy"), num("rx"), num("ry"), bbox);
        }
        "line" => {
            bbox.include_mapped(matrix, num("x1"), num("y1"));
            bbox.include_mapped(matrix, num("x2"), num("y2"));
        }
        "polyline" | "polygon" => {
            let coords = elem.attr("points").map(parse_number_list).unwrap_or_default();
            for pair in coords.chunks_exact(2) {
                bbox.include_mapped(matrix, pair[0], pair[1]);
            }
        }
        "path" => {
            if let Some(local) = elem.attr("d").and_then(path_bounds) {
                bbox.include_rect(matrix, local.x0, local.y0, local.x1, local.y1);
            }
        }
        _ => {}
    }
}

/// Circle/ellipse bounds with radii scaled per axis by the matrix's `a`/`d`.
fn ellipse_bounds(matrix: Affine, cx: f64, cy: f64, rx: f64, ry: f64, bbox: &mut BBox) {
    if rx <= 0.0 || ry <= 0.0 {
        return;
    }
    let center = matrix * Point::new(cx, cy);
    let (sx, sy) = axis_scales(matrix);
    let (rx, ry) = ((rx * sx).abs(), (ry * sy).abs());
    bbox.include(center.x - rx, center.y - ry);
    bbox.include(center.x + rx, center.y + ry);
}

/// Tight local-space bounds of path data, including curve extrema.
///
/// Returns `None` for unparsable or empty path data.
pub fn path_bounds(d: &str) -> Option<kurbo::Rect> {
    let path = BezPath::from_svg(d).ok()?;
    if path.elements().is_empty() {
        return None;
    }
    let rect = path.bounding_box();
    [rect.x0, rect.y0, rect.x1, rect.y1]
        .iter()
        .all(|v| v.is_finite())
        .then_some(rect)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::parse::parse;

    fn bounds_of(svg: &str) -> (f64, f64, f64, f64) {
        calculate_bounds(&parse(svg).unwrap()).to_xywh()
    }

    #[test]
    fn test_rect() {
        assert_eq!(
            bounds_of(r#"<svg><rect x="10" y="20" width="30" height="40"/></svg>"#),
            (10.0, 20.0, 30.0, 40.0)
        );
    }

    #[test]
    fn test_union_of_shapes() {
        let svg = r#"<svg>
            <circle cx="50" cy="50" r="40"/>
            <line x1="-10" y1="0" x2="0" y2="200"/>
        </svg>"#;
        assert_eq!(bounds_of(svg), (-10.0, 0.0, 100.0, 200.0));
    }

    #[test]
    fn test_ellipse_and_polygon() {
        assert_eq!(
            bounds_of(r#"<svg><ellipse cx="0" cy="0" rx="10" ry="5"/></svg>"#),
            (-10.0, -5.0, 20.0, 10.0)
        );
        assert_eq!(
            bounds_of(r#"<svg><polygon points="0,0 10,5 3,20"/></svg>"#),
            (0.0, 0.0, 10.0, 20.0)
        );
    }

    #[test]
    fn test_path_includes_curve_extrema() {
        // Quadratic bulges to y = -50 at t = 0.5 even though no point is there
        let (x, y, w, h) = bounds_of(r#"<svg><path d="M0 0 Q50 -100 100 0"/></svg>"#);
        assert_eq!((x, w), (0.0, 100.0));
        assert!((y + 50.0).abs() < 1e-9);
        assert!((h - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_nested_transforms() {
        let svg = r#"<svg>
            <g transform="translate(100 100)">
                <g transform="scale(2)">
                    <rect x="0" y="0" width="10" height="10"/>
                </g>
            </g>
        </svg>"#;
        assert_eq!(bounds_of(svg), (100.0, 100.0, 20.0, 20.0));
    }

    #[test]
    fn test_circle_radius_scales_per_axis() {
        let svg = r#"<svg><circle cx="10" cy="10" r="5" transform="scale(2 3)"/></svg>"#;
        assert_eq!(bounds_of(svg), (10.0, 15.0, 20.0, 30.0));
    }

    #[test]
    fn test_skips_non_rendered_containers() {
        let svg = r#"<svg>
            <defs><rect x="-500" y="-500" width="10" height="10"/></defs>
            <rect width="5" height="5"/>
        </svg>"#;
        assert_eq!(bounds_of(svg), (0.0, 0.0, 5.0, 5.0));
    }

    #[test]
    fn test_empty_collapses_to_origin() {
        assert_eq!(bounds_of("<svg/>"), (0.0, 0.0, 0.0, 0.0));
        assert_eq!(bounds_of(r#"<svg><g><text>hi</text></g></svg>"#), (0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_ignores_non_finite() {
        let mut bbox = BBox::EMPTY;
        bbox.include(f64::NAN, 1.0);
        bbox.include(1.0, f64::INFINITY);
        assert!(bbox.is_empty());
        bbox.include(2.0, 3.0);
        assert_eq!(bbox.to_xywh(), (2.0, 3.0, 0.0, 0.0));
    }

    #[test]
    fn test_path_bounds_invalid() {
        assert!(path_bounds("").is_none());
        assert!(path_bounds("not a path").is_none());
        assert!(path_bounds("M0 0 L10 10").is_some());
    }
}
