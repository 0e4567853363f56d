//! SVG analysis pipeline.
//!
//! `sanitize -> fit -> parse + classify -> optimize`, in that order:
//! - sanitizing first keeps untrusted markup out of every later stage
//! - classification runs on the fitted, not yet optimized markup, since the
//!   optimizer may drop elements the counts should see
//! - the optimized string is what callers get back
//!
//! Errors from any stage are returned unmodified.

mod cache;

pub use cache::{AnalysisCache, CacheStats, ContentHash, analyze_cached};

use serde::{Deserialize, Serialize};

use crate::debug;
use crate::error::MotifResult;
use crate::svg::{
    DEFAULT_VIEWPORT_PX, OptimizeOptions, SvgMetadata, classify, fit_svg_to_viewbox, optimize,
    parse, sanitize,
};

/// Result of one analysis call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SvgAnalysisResult {
    /// Sanitized, fitted and optimized markup.
    pub cleaned_svg_string: String,
    pub metadata: SvgMetadata,
}

/// Knobs for [`analyze_svg_with`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzeOptions {
    /// Viewport edge used by the fitter, in pixels.
    pub viewport_px: f64,
    pub optimize: OptimizeOptions,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            viewport_px: DEFAULT_VIEWPORT_PX,
            optimize: OptimizeOptions::default(),
        }
    }
}

/// Analyze raw SVG markup with default options.
pub fn analyze_svg(raw: &str) -> MotifResult<SvgAnalysisResult> {
    analyze_svg_with(raw, &AnalyzeOptions::default())
}

/// Analyze raw SVG markup.
///
/// # Errors
/// - parse errors from the fitter or classifier stage
/// - optimizer failures
pub fn analyze_svg_with(raw: &str, options: &AnalyzeOptions) -> MotifResult<SvgAnalysisResult> {
    let sanitized = sanitize(raw);
    debug!("analyze"; "sanitized {} -> {} bytes", raw.len(), sanitized.len());

    let fitted = fit_svg_to_viewbox(&sanitized, options.viewport_px)?;

    let ast = parse(&fitted)?;
    let metadata = classify(&ast);
    drop(ast);
    debug!(
        "analyze";
        "{:?}, {} element kind(s)", metadata.classification, metadata.node_count.len()
    );

    let cleaned_svg_string = optimize(&fitted, &options.optimize)?;

    Ok(SvgAnalysisResult {
        cleaned_svg_string,
        metadata,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MotifError;
    use crate::svg::{Classification, SvgFlag};

    #[test]
    fn test_single_circle() {
        let raw = r#"<svg width="100" height="100"><circle cx="50" cy="50" r="40" fill="blue"/></svg>"#;
        let result = analyze_svg(raw).unwrap();

        assert_eq!(result.metadata.classification, Classification::Flattened);
        assert_eq!(result.metadata.count("circle"), 1);
        assert!(result.cleaned_svg_string.contains("circle"));
        assert!(result.cleaned_svg_string.contains(r#"viewBox="10 10 80 80""#));
    }

    #[test]
    fn test_group_of_rects() {
        let raw = r#"<svg width="100" height="100">
            <g fill="red">
                <rect x="0" y="0" width="10" height="10"/>
                <rect x="20" y="20" width="10" height="10"/>
            </g>
        </svg>"#;
        let result = analyze_svg(raw).unwrap();

        assert_eq!(result.metadata.classification, Classification::Structured);
        assert_eq!(result.metadata.count("g"), 1);
        assert_eq!(result.metadata.count("rect"), 2);
        assert!(result.metadata.has_flag(SvgFlag::IsStructured));
    }

    #[test]
    fn test_strips_unsafe_markup() {
        let raw = r#"<svg onload="x()"><script>alert(1)</script><path d="M0 0L10 10" stroke="black"/></svg>"#;
        let result = analyze_svg(raw).unwrap();

        assert!(!result.cleaned_svg_string.contains("script"));
        assert!(!result.cleaned_svg_string.contains("onload"));
        assert_eq!(result.metadata.count("script"), 0);
        assert!(result.metadata.has_flag(SvgFlag::IsStrokeBased));
    }

    #[test]
    fn test_deep_nesting_is_bounded() {
        let depth = 3000;
        let raw = format!(
            r#"<svg>{}<rect width="1" height="1"/>{}</svg>"#,
            "<g>".repeat(depth),
            "</g>".repeat(depth)
        );

        // Worker threads get 2 MiB stacks
        let result = std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(move || analyze_svg(&raw))
            .unwrap()
            .join()
            .unwrap()
            .unwrap();

        let groups = result.metadata.count("g");
        assert!(groups > 0 && groups < crate::svg::parse::MAX_DEPTH);
        assert_eq!(result.metadata.count("rect"), 0);
    }

    #[test]
    fn test_usvg_backend_keeps_fit() {
        let options = AnalyzeOptions {
            optimize: OptimizeOptions {
                backend: crate::svg::OptimizeBackend::Usvg,
                ..Default::default()
            },
            ..Default::default()
        };
        let raw = r#"<svg width="100" height="100"><circle cx="50" cy="50" r="40" fill="blue"/></svg>"#;
        let result = analyze_svg_with(raw, &options).unwrap();

        let root_tag = &result.cleaned_svg_string[..result.cleaned_svg_string.find('>').unwrap()];
        assert!(!root_tag.contains(" width="));
        assert!(root_tag.contains("viewBox="));
        assert!(root_tag.contains("max-width: 200px"));
    }

    #[test]
    fn test_counts_before_optimization() {
        // The empty group is dropped by the optimizer but still counted
        let raw = r#"<svg><g/><rect width="1" height="1"/></svg>"#;
        let result = analyze_svg(raw).unwrap();

        assert_eq!(result.metadata.count("g"), 1);
        assert_eq!(result.metadata.classification, Classification::Structured);
        assert!(!result.cleaned_svg_string.contains("<g"));
    }

    #[test]
    fn test_custom_viewport() {
        let options = AnalyzeOptions {
            viewport_px: 48.0,
            ..Default::default()
        };
        let result = analyze_svg_with("<svg><rect width='4' height='4'/></svg>", &options).unwrap();
        assert!(result.cleaned_svg_string.contains("max-width: 48px"));
    }

    #[test]
    fn test_errors_surface_unmodified() {
        assert!(matches!(analyze_svg(""), Err(MotifError::NoRootElement)));
        assert!(matches!(
            analyze_svg("<html><body/></html>"),
            Err(MotifError::NoRootElement)
        ));
    }

    #[test]
    fn test_result_json_shape() {
        let result = analyze_svg("<svg><circle r='1'/></svg>").unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["cleanedSvgString"].is_string());
        assert_eq!(json["metadata"]["classification"], "flattened");
        assert_eq!(json["metadata"]["nodeCount"]["circle"], 1);
    }
}
