//! Grow from a point.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::effect::{KeyframeEffectSpec, Timing, create_effect, keyframe};
use super::error::EffectError;
use crate::svg::number::format_number;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleOptions {
    #[serde(flatten)]
    pub timing: Timing,
    #[serde(default)]
    pub from: f64,
    #[serde(default = "default_to")]
    pub to: f64,
    /// CSS transform-origin; `"center"` is written as `"50% 50%"`.
    #[serde(default = "default_origin")]
    pub origin: String,
}

fn default_to() -> f64 {
    1.0
}

fn default_origin() -> String {
    "center".to_string()
}

impl ScaleOptions {
    pub fn new(timing: Timing) -> Self {
        Self {
            timing,
            from: 0.0,
            to: default_to(),
            origin: default_origin(),
        }
    }
}

fn transform_origin(origin: &str) -> &str {
    match origin.trim() {
        "center" => "50% 50%",
        other => other,
    }
}

/// Scale the whole SVG from `from` to `to`.
pub fn scale(options: &ScaleOptions) -> Result<KeyframeEffectSpec, EffectError> {
    let origin = transform_origin(&options.origin);
    let frame = |factor: f64| {
        keyframe([
            ("transform", json!(format!("scale({})", format_number(factor)))),
            ("transformOrigin", json!(origin)),
        ])
    };

    create_effect(
        "svg",
        vec![frame(options.from), frame(options.to)],
        options.timing.clone(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scale() {
        let spec = scale(&ScaleOptions::new(Timing::new(300.0))).unwrap();
        assert_eq!(spec.target_selector, "svg");
        assert_eq!(spec.keyframes[0]["transform"], "scale(0)");
        assert_eq!(spec.keyframes[1]["transform"], "scale(1)");
        assert_eq!(spec.keyframes[0]["transformOrigin"], "50% 50%");
        assert_eq!(spec.keyframes[1]["transformOrigin"], "50% 50%");
    }

    #[test]
    fn test_custom_origin_and_factors() {
        let options: ScaleOptions = serde_json::from_value(
            json!({ "duration": 300, "from": 0.5, "to": 1.25, "origin": "top left" }),
        )
        .unwrap();
        let spec = scale(&options).unwrap();
        assert_eq!(spec.keyframes[0]["transform"], "scale(0.5)");
        assert_eq!(spec.keyframes[1]["transform"], "scale(1.25)");
        assert_eq!(spec.keyframes[0]["transformOrigin"], "top left");
    }

    #[test]
    fn test_invalid_duration() {
        let err = scale(&ScaleOptions::new(Timing::new(-5.0))).unwrap_err();
        assert_eq!(err, EffectError::InvalidDuration);
    }
}
