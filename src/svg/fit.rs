//! Viewbox fitting.
//!
//! Rewrites an SVG's coordinate system so its `viewBox` tightly bounds the
//! drawn content, and replaces absolute `width`/`height` with a style that
//! caps the rendered size to a viewport.

use super::ast::AttrsExt;
use super::bounds::calculate_bounds;
use super::number::format_number;
use super::parse::parse;
use super::serialize::to_svg_string;
use crate::debug;
use crate::error::MotifResult;

/// Default viewport edge in CSS pixels.
pub const DEFAULT_VIEWPORT_PX: f64 = 200.0;

/// Fit the viewBox of `svg` to its content.
///
/// # Errors
/// Fails when the markup has no `<svg>` root or does not parse.
pub fn fit_svg_to_viewbox(svg: &str, viewport_px: f64) -> MotifResult<String> {
    let mut root = parse(svg)?;

    let (x, y, width, height) = calculate_bounds(&root).to_xywh();
    let viewbox = [x, y, width, height]
        .into_iter()
        .map(format_number)
        .collect::<Vec<_>>()
        .join(" ");
    debug!("fit"; "viewBox {} (viewport {}px)", viewbox, viewport_px);

    let viewport = format_number(viewport_px);
    let attrs = &mut root.attributes;
    attrs.set_attr("viewBox", viewbox);
    attrs.set_attr("preserveAspectRatio", "xMidYMid meet");
    attrs.remove_attr("width");
    attrs.remove_attr("height");
    attrs.set_attr(
        "style",
        format!("max-width: {viewport}px; max-height: {viewport}px; width: 100%; height: auto;"),
    );

    Ok(to_svg_string(&root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MotifError;

    #[test]
    fn test_full_bleed_rect() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="4000" height="4000"><rect x="0" y="0" width="4000" height="4000" fill="red"/></svg>"#;
        let fitted = fit_svg_to_viewbox(svg, 200.0).unwrap();

        assert!(fitted.contains(r#"viewBox="0 0 4000 4000""#));
        assert!(fitted.contains("max-width: 200px"));
        assert!(fitted.contains("max-height: 200px"));
        assert!(fitted.contains(r#"preserveAspectRatio="xMidYMid meet""#));

        let root_tag = &fitted[..fitted.find('>').unwrap()];
        assert!(!root_tag.contains(" width="));
        assert!(!root_tag.contains(" height="));
        // Child geometry is untouched
        assert!(fitted.contains(r#"<rect x="0" y="0" width="4000" height="4000" fill="red"/>"#));
    }

    #[test]
    fn test_replaces_existing_viewbox() {
        let svg = r#"<svg viewBox="0 0 1000 1000"><circle cx="50" cy="60" r="10"/></svg>"#;
        let fitted = fit_svg_to_viewbox(svg, 64.0).unwrap();
        assert!(fitted.contains(r#"viewBox="40 50 20 20""#));
        assert!(fitted.contains("max-width: 64px"));
        assert_eq!(fitted.matches("viewBox").count(), 1);
    }

    #[test]
    fn test_fractional_viewport() {
        let fitted = fit_svg_to_viewbox("<svg/>", 12.5).unwrap();
        assert!(fitted.contains(r#"viewBox="0 0 0 0""#));
        assert!(fitted.contains("max-width: 12.5px"));
    }

    #[test]
    fn test_no_svg_root() {
        assert!(matches!(
            fit_svg_to_viewbox("", DEFAULT_VIEWPORT_PX),
            Err(MotifError::NoRootElement)
        ));
        assert!(matches!(
            fit_svg_to_viewbox("<div/>", DEFAULT_VIEWPORT_PX),
            Err(MotifError::RootNotSvg { .. })
        ));
    }
}
