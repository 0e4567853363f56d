//! Animation primitives.
//!
//! Each primitive turns its options (plus the SVG's [`SvgMetadata`], for the
//! ones with structural requirements) into a [`KeyframeEffectSpec`]:
//!
//! | primitive       | target                 | requires        |
//! |-----------------|------------------------|-----------------|
//! | `fadeIn`        | `svg` (configurable)   | -               |
//! | `scale`         | `svg`                  | -               |
//! | `slideIn`       | `svg`                  | -               |
//! | `drawPath`      | stroke-able shapes     | `isStrokeBased` |
//! | `staggerFadeIn` | `g > *` (configurable) | `isStructured`  |
//!
//! A primitive whose requirement is not met returns
//! [`PrimitiveError::Unsupported`]; [`Primitive::generate_or`] retries with a
//! fallback in that case only.

mod draw;
mod effect;
mod error;
mod fade;
mod scale;
mod slide;
mod stagger;

pub use draw::{DRAW_PATH_SELECTOR, DrawPathOptions, PATH_LENGTH_PLACEHOLDER, draw_path};
pub use effect::{FillMode, Keyframe, KeyframeEffectSpec, Timing, create_effect, keyframe};
pub use error::{EffectError, PrimitiveError, UnsupportedPrimitive};
pub use fade::{FadeInOptions, fade_in};
pub use scale::{ScaleOptions, scale};
pub use slide::{Direction, Distance, SlideInOptions, slide_in};
pub use stagger::{StaggerFadeInOptions, stagger_fade_in};

use serde::{Deserialize, Serialize};

use crate::debug;
use crate::svg::SvgMetadata;

/// A primitive with its options, tagged by `"primitive"` in JSON:
///
/// ```json
/// { "primitive": "slideIn", "duration": 500, "fromDirection": "left", "distance": "20px" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "primitive", rename_all = "camelCase")]
pub enum Primitive {
    FadeIn(FadeInOptions),
    Scale(ScaleOptions),
    SlideIn(SlideInOptions),
    DrawPath(DrawPathOptions),
    StaggerFadeIn(StaggerFadeInOptions),
}

impl Primitive {
    /// Parse a tagged JSON description.
    pub fn from_json(json: &str) -> Result<Self, PrimitiveError> {
        serde_json::from_str(json).map_err(|e| PrimitiveError::InvalidOptions(e.to_string()))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::FadeIn(_) => "fadeIn",
            Self::Scale(_) => "scale",
            Self::SlideIn(_) => "slideIn",
            Self::DrawPath(_) => "drawPath",
            Self::StaggerFadeIn(_) => "staggerFadeIn",
        }
    }

    pub fn timing(&self) -> &Timing {
        match self {
            Self::FadeIn(o) => &o.timing,
            Self::Scale(o) => &o.timing,
            Self::SlideIn(o) => &o.timing,
            Self::DrawPath(o) => &o.timing,
            Self::StaggerFadeIn(o) => &o.timing,
        }
    }

    /// Generate the effect spec for an SVG described by `metadata`.
    pub fn generate(&self, metadata: &SvgMetadata) -> Result<KeyframeEffectSpec, PrimitiveError> {
        match self {
            Self::FadeIn(o) => Ok(fade_in(o)?),
            Self::Scale(o) => Ok(scale(o)?),
            Self::SlideIn(o) => Ok(slide_in(o)?),
            Self::DrawPath(o) => draw_path(o, metadata),
            Self::StaggerFadeIn(o) => stagger_fade_in(o, metadata),
        }
    }

    /// Like [`generate`](Self::generate), but falls back to `fallback` when
    /// this primitive is unsupported. Other errors are returned as is.
    pub fn generate_or(
        &self,
        metadata: &SvgMetadata,
        fallback: &Primitive,
    ) -> Result<KeyframeEffectSpec, PrimitiveError> {
        self.generate_choosing(metadata, fallback).map(|(_, spec)| spec)
    }

    /// [`generate_or`](Self::generate_or) that also returns the primitive
    /// whose generator produced the spec.
    pub fn generate_choosing<'a>(
        &'a self,
        metadata: &SvgMetadata,
        fallback: &'a Primitive,
    ) -> Result<(&'a Primitive, KeyframeEffectSpec), PrimitiveError> {
        match self.generate(metadata) {
            Ok(spec) => Ok((self, spec)),
            Err(PrimitiveError::Unsupported(reason)) => {
                debug!("primitive"; "{}, using {}", reason, fallback.name());
                Ok((fallback, fallback.generate(metadata)?))
            }
            Err(e) => Err(e),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::{classify, parse};
    use serde_json::json;

    fn metadata(svg: &str) -> SvgMetadata {
        classify(&parse(svg).unwrap())
    }

    #[test]
    fn test_from_json_dispatch() {
        let p = Primitive::from_json(
            r#"{"primitive":"slideIn","duration":500,"fromDirection":"left","distance":"20px"}"#,
        )
        .unwrap();
        assert_eq!(p.name(), "slideIn");
        assert_eq!(p.timing().duration, 500.0);

        let spec = p.generate(&metadata("<svg/>")).unwrap();
        assert_eq!(spec.keyframes[0]["transform"], "translateX(-20px)");
    }

    #[test]
    fn test_from_json_errors() {
        for bad in [
            r#"{"primitive":"spin","duration":1}"#,
            r#"{"duration":1}"#,
            r#"{"primitive":"fadeIn"}"#,
            r#"{"primitive":"slideIn","duration":300}"#,
            r#"{"primitive":"slideIn","duration":300,"fromDirection":"top","distance":"20"}"#,
            "not json",
        ] {
            let err = Primitive::from_json(bad).unwrap_err();
            assert!(matches!(err, PrimitiveError::InvalidOptions(_)), "{bad}");
        }
    }

    #[test]
    fn test_round_trip_tag() {
        let p = Primitive::Scale(ScaleOptions::new(Timing::new(250.0)));
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["primitive"], "scale");
        assert_eq!(json["duration"], json!(250.0));
        assert_eq!(serde_json::from_value::<Primitive>(json).unwrap(), p);
    }

    #[test]
    fn test_fallback_on_unsupported() {
        let meta = metadata(r#"<svg><circle r="5" fill="red"/></svg>"#);
        let draw = Primitive::DrawPath(DrawPathOptions::new(Timing::new(1000.0)));
        let fade = Primitive::FadeIn(FadeInOptions::new(Timing::new(300.0)));

        assert!(draw.generate(&meta).unwrap_err().is_unsupported());

        let spec = draw.generate_or(&meta, &fade).unwrap();
        assert_eq!(spec.target_selector, "svg");
        assert_eq!(spec.timing.duration, 300.0);
    }

    #[test]
    fn test_generate_choosing_reports_producer() {
        let draw = Primitive::DrawPath(DrawPathOptions::new(Timing::new(1000.0)));
        let fade = Primitive::FadeIn(FadeInOptions::new(Timing::new(300.0)));

        let filled = metadata(r#"<svg><circle r="5" fill="red"/></svg>"#);
        let (used, _) = draw.generate_choosing(&filled, &fade).unwrap();
        assert_eq!(used, &fade);

        let stroked = metadata(r#"<svg><path d="M0 0L5 5" stroke="black"/></svg>"#);
        let (used, spec) = draw.generate_choosing(&stroked, &fade).unwrap();
        assert_eq!(used, &draw);
        assert_eq!(spec.target_selector, DRAW_PATH_SELECTOR);
    }

    #[test]
    fn test_no_fallback_on_invalid_effect() {
        let meta = metadata(r#"<svg><path d="M0 0" stroke="black"/></svg>"#);
        let draw = Primitive::DrawPath(DrawPathOptions::new(Timing::new(-1.0)));
        let fade = Primitive::FadeIn(FadeInOptions::new(Timing::new(300.0)));

        let err = draw.generate_or(&meta, &fade).unwrap_err();
        assert_eq!(err, PrimitiveError::Effect(EffectError::InvalidDuration));
    }

    #[test]
    fn test_every_primitive_on_structured_stroke_svg() {
        let meta = metadata(r#"<svg><g><path d="M0 0L5 5" stroke="black"/></g></svg>"#);
        let timing = Timing::new(100.0);
        let all = [
            Primitive::FadeIn(FadeInOptions::new(timing.clone())),
            Primitive::Scale(ScaleOptions::new(timing.clone())),
            Primitive::SlideIn(SlideInOptions::new(
                timing.clone(),
                Direction::Top,
                Distance::px(8.0).unwrap(),
            )),
            Primitive::DrawPath(DrawPathOptions::new(timing.clone())),
            Primitive::StaggerFadeIn(StaggerFadeInOptions::new(timing)),
        ];
        for p in &all {
            let spec = p.generate(&meta).unwrap();
            assert_eq!(spec.keyframes.len(), 2, "{}", p.name());
        }
    }
}
