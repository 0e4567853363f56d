//! Structural classification of a parsed SVG.
//!
//! One depth-first pass counts elements per tag and detects stroke-based
//! shapes. A document is *structured* when it has at least one `<g>`,
//! otherwise *flattened*.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::ast::SvgElement;
use super::parse::local_name;

/// Per-tag element counts. Always contains `path` and `g`.
pub type NodeCount = BTreeMap<String, usize>;

/// Coarse document shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// No `<g>` grouping elements.
    Flattened,
    /// At least one `<g>` grouping element.
    Structured,
}

/// Boolean feature tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SvgFlag {
    IsFlattened,
    IsStructured,
    IsStrokeBased,
}

/// Classification result attached to every analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SvgMetadata {
    pub classification: Classification,
    pub flags: BTreeSet<SvgFlag>,
    pub node_count: NodeCount,
}

impl SvgMetadata {
    #[inline]
    pub fn has_flag(&self, flag: SvgFlag) -> bool {
        self.flags.contains(&flag)
    }

    #[inline]
    pub fn is_structured(&self) -> bool {
        self.classification == Classification::Structured
    }

    /// Count for a tag, zero when absent.
    pub fn count(&self, tag: &str) -> usize {
        self.node_count.get(tag).copied().unwrap_or(0)
    }
}

/// Classify a parsed SVG tree.
pub fn classify(ast: &SvgElement) -> SvgMetadata {
    let mut node_count: NodeCount = [("path".to_string(), 0), ("g".to_string(), 0)].into();
    let mut has_stroke_elements = false;

    ast.walk(&mut |elem| {
        *node_count
            .entry(local_name(&elem.tag_name).to_string())
            .or_default() += 1;
        has_stroke_elements |= is_stroke_based(elem);
    });

    let classification = if node_count["g"] > 0 {
        Classification::Structured
    } else {
        Classification::Flattened
    };

    let mut flags = BTreeSet::new();
    flags.insert(match classification {
        Classification::Flattened => SvgFlag::IsFlattened,
        Classification::Structured => SvgFlag::IsStructured,
    });
    if has_stroke_elements {
        flags.insert(SvgFlag::IsStrokeBased);
    }

    SvgMetadata {
        classification,
        flags,
        node_count,
    }
}

/// A visible stroke with no fill of its own.
///
/// Only attributes declared on the element count; a fill inherited from a
/// parent or a stylesheet is not resolved.
pub fn is_stroke_based(elem: &SvgElement) -> bool {
    let painted = |key: &str| elem.attr(key).is_some_and(|v| v.trim() != "none");
    painted("stroke") && !painted("fill")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::parse::parse;

    fn classify_str(svg: &str) -> SvgMetadata {
        classify(&parse(svg).unwrap())
    }

    #[test]
    fn test_single_group_is_structured() {
        let meta = classify_str(r#"<svg><g><rect/></g></svg>"#);
        assert_eq!(meta.classification, Classification::Structured);
        assert!(meta.has_flag(SvgFlag::IsStructured));
        assert!(!meta.has_flag(SvgFlag::IsFlattened));
    }

    #[test]
    fn test_no_group_is_flattened() {
        let meta = classify_str(r#"<svg><rect/><circle r="1"/></svg>"#);
        assert_eq!(meta.classification, Classification::Flattened);
        assert!(meta.has_flag(SvgFlag::IsFlattened));
        assert!(!meta.has_flag(SvgFlag::IsStructured));
    }

    #[test]
    fn test_empty_svg_is_flattened() {
        let meta = classify_str("<svg/>");
        assert_eq!(meta.classification, Classification::Flattened);
        assert_eq!(meta.count("svg"), 1);
        assert_eq!(meta.count("path"), 0);
        assert_eq!(meta.count("g"), 0);
        assert!(meta.node_count.contains_key("path"));
        assert!(meta.node_count.contains_key("g"));
    }

    #[test]
    fn test_counts_every_tag() {
        let meta = classify_str(
            r#"<svg><g><g><path d="M0 0"/><path d="M1 1"/></g></g><text>a<tspan>b</tspan></text></svg>"#,
        );
        assert_eq!(meta.count("g"), 2);
        assert_eq!(meta.count("path"), 2);
        assert_eq!(meta.count("text"), 1);
        assert_eq!(meta.count("tspan"), 1);
        assert_eq!(meta.count("svg"), 1);
        // Character data is not an element
        assert_eq!(meta.node_count.len(), 5);
    }

    #[test]
    fn test_stroke_without_fill() {
        for svg in [
            r#"<svg><path d="M0 0" stroke="black"/></svg>"#,
            r#"<svg><path d="M0 0" stroke="black" fill="none"/></svg>"#,
        ] {
            assert!(classify_str(svg).has_flag(SvgFlag::IsStrokeBased), "{svg}");
        }
    }

    #[test]
    fn test_stroke_with_fill_is_not_stroke_based() {
        let meta = classify_str(r#"<svg><rect stroke="black" fill="red"/></svg>"#);
        assert!(!meta.has_flag(SvgFlag::IsStrokeBased));

        // ...but another qualifying element still sets the flag
        let meta = classify_str(
            r#"<svg><rect stroke="black" fill="red"/><line stroke="blue"/></svg>"#,
        );
        assert!(meta.has_flag(SvgFlag::IsStrokeBased));
    }

    #[test]
    fn test_stroke_none_is_not_stroke_based() {
        let meta = classify_str(r#"<svg><path stroke="none"/><path/></svg>"#);
        assert!(!meta.has_flag(SvgFlag::IsStrokeBased));
    }

    #[test]
    fn test_inherited_fill_is_ignored() {
        // Parent fill is not resolved, so the child still counts as stroke-based
        let meta = classify_str(r#"<svg><g fill="red"><path stroke="black"/></g></svg>"#);
        assert!(meta.has_flag(SvgFlag::IsStrokeBased));
    }

    #[test]
    fn test_metadata_json_shape() {
        let meta = classify_str(r#"<svg><g><path stroke="red"/></g></svg>"#);
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["classification"], "structured");
        assert_eq!(json["flags"], serde_json::json!(["isStructured", "isStrokeBased"]));
        assert_eq!(json["nodeCount"]["g"], 1);
    }
}
