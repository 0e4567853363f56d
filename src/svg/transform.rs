//! `transform` attribute parsing.
//!
//! Only `translate()` and `scale()` are modeled. `rotate`, `skewX`, `skewY`
//! and `matrix` are recognized as functions but contribute the identity, so
//! bounds of rotated or skewed content are approximate.

use kurbo::Affine;
use regex::Regex;
use std::sync::LazyLock;

use super::number::parse_number_list;

static TRANSFORM_FN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z]+)\s*\(([^)]*)\)").expect("valid transform regex"));

/// Parse a transform list into a single matrix.
///
/// Functions compose left to right, as in the SVG spec: `translate(10) scale(2)`
/// scales first, then translates.
pub fn parse_transform(value: &str) -> Affine {
    TRANSFORM_FN
        .captures_iter(value)
        .fold(Affine::IDENTITY, |acc, caps| {
            let args = parse_number_list(&caps[2]);
            acc * transform_fn(&caps[1], &args)
        })
}

fn transform_fn(name: &str, args: &[f64]) -> Affine {
    match (name, args) {
        ("translate", [tx]) => Affine::translate((*tx, 0.0)),
        ("translate", [tx, ty, ..]) => Affine::translate((*tx, *ty)),
        ("scale", [s]) => Affine::scale(*s),
        ("scale", [sx, sy, ..]) => Affine::scale_non_uniform(*sx, *sy),
        _ => Affine::IDENTITY,
    }
}

/// Matrix of `elem`'s own `transform` attribute, composed onto `parent`.
#[inline]
pub fn compose(parent: Affine, local: Option<&str>) -> Affine {
    match local {
        Some(value) => parent * parse_transform(value),
        None => parent,
    }
}

/// Horizontal and vertical scale factors (`a` and `d`) of a matrix.
#[inline]
pub fn axis_scales(matrix: Affine) -> (f64, f64) {
    let [a, _, _, d, _, _] = matrix.as_coeffs();
    (a, d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn apply(value: &str, x: f64, y: f64) -> (f64, f64) {
        let p = parse_transform(value) * Point::new(x, y);
        (p.x, p.y)
    }

    #[test]
    fn test_translate() {
        assert_eq!(apply("translate(10, 20)", 1.0, 1.0), (11.0, 21.0));
        assert_eq!(apply("translate(5)", 1.0, 1.0), (6.0, 1.0));
    }

    #[test]
    fn test_scale() {
        assert_eq!(apply("scale(2)", 3.0, 4.0), (6.0, 8.0));
        assert_eq!(apply("scale(2 3)", 3.0, 4.0), (6.0, 12.0));
    }

    #[test]
    fn test_list_composes_left_to_right() {
        // scale applies first, then translate
        assert_eq!(apply("translate(10,0) scale(2)", 1.0, 1.0), (12.0, 2.0));
        assert_eq!(apply("scale(2) translate(10,0)", 1.0, 1.0), (22.0, 2.0));
    }

    #[test]
    fn test_unmodeled_functions_are_identity() {
        assert_eq!(apply("rotate(45)", 1.0, 0.0), (1.0, 0.0));
        assert_eq!(apply("matrix(0 1 -1 0 0 0) translate(1 1)", 0.0, 0.0), (1.0, 1.0));
        assert_eq!(apply("garbage", 2.0, 2.0), (2.0, 2.0));
    }

    #[test]
    fn test_compose_parent_then_local() {
        let parent = parse_transform("translate(100 0)");
        let m = compose(parent, Some("scale(2)"));
        let p = m * Point::new(1.0, 1.0);
        assert_eq!((p.x, p.y), (102.0, 2.0));
        assert_eq!(axis_scales(m), (2.0, 2.0));
        assert_eq!(compose(parent, None), parent);
    }
}
