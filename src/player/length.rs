//! Stroke length measurement with a per-render-pass cache.

use kurbo::{BezPath, Circle, Ellipse, Line, ParamCurveArclen, Point, Rect, Shape};
use rustc_hash::FxHashMap;

use super::scene::{ElementId, Scene};
use crate::svg::AttrsExt;
use crate::svg::number::{parse_length, parse_number_list};

/// Arc length accuracy, in user units.
const ACCURACY: f64 = 1e-3;

/// Measured stroke lengths of one scene's elements.
///
/// The cache belongs to a single render pass: entries are keyed by
/// [`ElementId`] of the scene being played and are dropped with the cache.
/// Editing or detaching an element requires an explicit
/// [`invalidate`](Self::invalidate).
#[derive(Debug, Default)]
pub struct PathLengthCache {
    lengths: FxHashMap<ElementId, f64>,
    measured: u64,
}

impl PathLengthCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stroke length of `id`, measured once and then served from the cache.
    ///
    /// `None` for elements without measurable geometry (groups, malformed
    /// path data, unknown ids).
    pub fn measure(&mut self, scene: &Scene, id: ElementId) -> Option<f64> {
        if let Some(&length) = self.lengths.get(&id) {
            return Some(length);
        }
        let length = element_length(scene, id)?;
        self.measured += 1;
        self.lengths.insert(id, length);
        Some(length)
    }

    /// Forget the length of `id`. Returns whether it was cached.
    pub fn invalidate(&mut self, id: ElementId) -> bool {
        self.lengths.remove(&id).is_some()
    }

    pub fn clear(&mut self) {
        self.lengths.clear();
    }

    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    /// How many times geometry was actually measured (cache misses).
    pub fn measurements(&self) -> u64 {
        self.measured
    }
}

/// Stroke length of one element in its own user space.
///
/// Transforms are not applied.
pub fn element_length(scene: &Scene, id: ElementId) -> Option<f64> {
    let attrs = scene.attributes(id)?;
    let num = |key: &str| attrs.get_attr(key).and_then(parse_length).unwrap_or(0.0);

    let length = match scene.tag(id)? {
        "path" => path_length(&BezPath::from_svg(attrs.get_attr("d")?).ok()?),
        "rect" => {
            let (x, y) = (num("x"), num("y"));
            Rect::new(x, y, x + num("width"), y + num("height")).perimeter(ACCURACY)
        }
        "circle" => Circle::new((num("cx"), num("cy")), num("r")).perimeter(ACCURACY),
        "ellipse" => {
            let ellipse = Ellipse::new((num("cx"), num("cy")), (num("rx"), num("ry")), 0.0);
            path_length(&ellipse.to_path(ACCURACY))
        }
        "line" => Line::new((num("x1"), num("y1")), (num("x2"), num("y2"))).perimeter(ACCURACY),
        tag @ ("polyline" | "polygon") => {
            let coords = parse_number_list(attrs.get_attr("points").unwrap_or_default());
            let points: Vec<Point> = coords
                .chunks_exact(2)
                .map(|pair| Point::new(pair[0], pair[1]))
                .collect();
            let mut length: f64 = points.windows(2).map(|w| w[0].distance(w[1])).sum();
            if tag == "polygon"
                && let (Some(first), Some(last)) = (points.first(), points.last())
            {
                length += last.distance(*first);
            }
            length
        }
        _ => return None,
    };

    length.is_finite().then_some(length)
}

fn path_length(path: &BezPath) -> f64 {
    path.segments().map(|seg| seg.arclen(ACCURACY)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn length_of(shape: &str) -> Option<f64> {
        let scene = Scene::from_svg(&format!("<svg>{shape}</svg>")).unwrap();
        element_length(&scene, scene.children(scene.root())[0])
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.05
    }

    #[test]
    fn test_shape_lengths() {
        assert!(close(length_of(r#"<path d="M0 0L30 40"/>"#).unwrap(), 50.0));
        assert!(close(length_of(r#"<path d="M0 0H10M0 5H10"/>"#).unwrap(), 20.0));
        assert!(close(length_of(r#"<rect width="10" height="5"/>"#).unwrap(), 30.0));
        assert!(close(
            length_of(r#"<circle r="10"/>"#).unwrap(),
            2.0 * std::f64::consts::PI * 10.0
        ));
        assert!(close(
            length_of(r#"<ellipse rx="5" ry="5"/>"#).unwrap(),
            2.0 * std::f64::consts::PI * 5.0
        ));
        assert!(close(length_of(r#"<line x1="0" y1="0" x2="3" y2="4"/>"#).unwrap(), 5.0));
        assert!(close(length_of(r#"<polyline points="0,0 3,4 3,10"/>"#).unwrap(), 11.0));
        assert!(close(length_of(r#"<polygon points="0,0 3,0 3,4"/>"#).unwrap(), 12.0));
    }

    #[test]
    fn test_unmeasurable() {
        assert_eq!(length_of("<g/>"), None);
        assert_eq!(length_of(r#"<path d="nonsense"/>"#), None);
        assert_eq!(length_of("<path/>"), None);
    }

    #[test]
    fn test_cache_measures_once() {
        let scene = Scene::from_svg(r#"<svg><line x2="10"/></svg>"#).unwrap();
        let line = scene.children(scene.root())[0];
        let mut cache = PathLengthCache::new();

        assert_eq!(cache.measure(&scene, line), Some(10.0));
        assert_eq!(cache.measure(&scene, line), Some(10.0));
        assert_eq!(cache.measurements(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_invalidate_after_edit() {
        let mut scene = Scene::from_svg(r#"<svg><line x2="10"/></svg>"#).unwrap();
        let line = scene.children(scene.root())[0];
        let mut cache = PathLengthCache::new();
        cache.measure(&scene, line);

        scene.set_attr(line, "x2", "20");
        // Stale until invalidated
        assert_eq!(cache.measure(&scene, line), Some(10.0));
        assert!(cache.invalidate(line));
        assert_eq!(cache.measure(&scene, line), Some(20.0));
        assert!(!cache.invalidate(scene.root()));

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.measurements(), 2);
    }
}
