//! Opacity fade.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::effect::{KeyframeEffectSpec, Timing, create_effect, keyframe};
use super::error::EffectError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FadeInOptions {
    #[serde(flatten)]
    pub timing: Timing,
    #[serde(default)]
    pub from: f64,
    #[serde(default = "default_to")]
    pub to: f64,
    #[serde(default = "default_selector")]
    pub selector: String,
}

fn default_to() -> f64 {
    1.0
}

fn default_selector() -> String {
    "svg".to_string()
}

impl FadeInOptions {
    pub fn new(timing: Timing) -> Self {
        Self {
            timing,
            from: 0.0,
            to: default_to(),
            selector: default_selector(),
        }
    }
}

/// Fade from `from` to `to` opacity. Works for any SVG.
pub fn fade_in(options: &FadeInOptions) -> Result<KeyframeEffectSpec, EffectError> {
    create_effect(
        options.selector.as_str(),
        vec![
            keyframe([("opacity", json!(options.from))]),
            keyframe([("opacity", json!(options.to))]),
        ],
        options.timing.clone(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fade() {
        let spec = fade_in(&FadeInOptions::new(Timing::new(400.0))).unwrap();
        assert_eq!(spec.target_selector, "svg");
        assert_eq!(spec.keyframes[0]["opacity"], json!(0.0));
        assert_eq!(spec.keyframes[1]["opacity"], json!(1.0));
        assert_eq!(spec.timing.duration, 400.0);
    }

    #[test]
    fn test_partial_fade_from_json() {
        let options: FadeInOptions = serde_json::from_value(
            json!({ "duration": 200, "from": 0.25, "to": 0.75, "selector": "#logo" }),
        )
        .unwrap();
        let spec = fade_in(&options).unwrap();
        assert_eq!(spec.target_selector, "#logo");
        assert_eq!(spec.keyframes[0]["opacity"], json!(0.25));
        assert_eq!(spec.keyframes[1]["opacity"], json!(0.75));
    }

    #[test]
    fn test_invalid_duration() {
        let err = fade_in(&FadeInOptions::new(Timing::new(0.0))).unwrap_err();
        assert_eq!(err, EffectError::InvalidDuration);
    }
}
