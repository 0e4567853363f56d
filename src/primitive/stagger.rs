//! Staggered fade-in of group children.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::effect::{KeyframeEffectSpec, Timing, create_effect, keyframe};
use super::error::{PrimitiveError, UnsupportedPrimitive};
use crate::svg::SvgMetadata;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaggerFadeInOptions {
    #[serde(flatten)]
    pub timing: Timing,
    #[serde(default = "default_child_selector")]
    pub child_selector: String,
    /// Extra delay per matched child, in milliseconds.
    #[serde(default = "default_stagger")]
    pub stagger: f64,
}

fn default_child_selector() -> String {
    "g > *".to_string()
}

fn default_stagger() -> f64 {
    100.0
}

impl StaggerFadeInOptions {
    pub fn new(timing: Timing) -> Self {
        Self {
            timing,
            child_selector: default_child_selector(),
            stagger: default_stagger(),
        }
    }
}

/// Fade and lift each matched child, one after another.
/// Requires a structured SVG.
pub fn stagger_fade_in(
    options: &StaggerFadeInOptions,
    metadata: &SvgMetadata,
) -> Result<KeyframeEffectSpec, PrimitiveError> {
    if !metadata.is_structured() {
        return Err(UnsupportedPrimitive::new("staggerFadeIn", "no <g> groups to stagger").into());
    }
    if !(options.stagger.is_finite() && options.stagger >= 0.0) {
        return Err(PrimitiveError::InvalidOptions(format!(
            "stagger must be a non-negative number, got {}",
            options.stagger
        )));
    }

    let mut spec = create_effect(
        options.child_selector.as_str(),
        vec![
            keyframe([("opacity", json!(0)), ("transform", json!("translateY(10px)"))]),
            keyframe([("opacity", json!(1)), ("transform", json!("translateY(0)"))]),
        ],
        options.timing.clone(),
    )?;
    spec.stagger = Some(options.stagger);
    Ok(spec)
}
