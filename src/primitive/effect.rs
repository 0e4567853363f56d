//! Keyframe effect specs and the shared construction helper.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::EffectError;

/// One keyframe: ordered style property -> value.
pub type Keyframe = Map<String, Value>;

/// Build a keyframe from `(property, value)` pairs, keeping their order.
pub fn keyframe<const N: usize>(props: [(&str, Value); N]) -> Keyframe {
    props
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/// Animation fill mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    None,
    #[default]
    Forwards,
    Both,
}

/// Timing shared by every primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timing {
    /// Milliseconds; must be positive.
    pub duration: f64,
    #[serde(default = "default_easing")]
    pub easing: String,
    /// Milliseconds before the animation starts.
    #[serde(default)]
    pub delay: f64,
    #[serde(default)]
    pub fill: FillMode,
}

fn default_easing() -> String {
    "ease".to_string()
}

impl Timing {
    /// Timing with the given duration and defaults for everything else.
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            easing: default_easing(),
            delay: 0.0,
            fill: FillMode::default(),
        }
    }

    pub fn with_easing(mut self, easing: impl Into<String>) -> Self {
        self.easing = easing.into();
        self
    }

    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_fill(mut self, fill: FillMode) -> Self {
        self.fill = fill;
        self
    }
}

/// Selector + keyframes + timing: one runtime-independent animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyframeEffectSpec {
    pub target_selector: String,
    pub keyframes: Vec<Keyframe>,
    pub timing: Timing,
    /// Per-match delay step in milliseconds, applied by the player.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stagger: Option<f64>,
}

impl KeyframeEffectSpec {
    /// Start delay for the `index`-th matched element.
    pub fn delay_for(&self, index: usize) -> f64 {
        self.timing.delay + self.stagger.unwrap_or(0.0) * index as f64
    }
}

/// Validate and assemble an effect spec.
///
/// # Errors
/// - [`EffectError::MissingSelector`] for an empty or blank selector
/// - [`EffectError::NoKeyframes`] for an empty keyframe list
/// - [`EffectError::InvalidDuration`] unless duration is finite and positive
pub fn create_effect(
    selector: impl Into<String>,
    keyframes: Vec<Keyframe>,
    timing: Timing,
) -> Result<KeyframeEffectSpec, EffectError> {
    let target_selector = selector.into();
    if target_selector.trim().is_empty() {
        return Err(EffectError::MissingSelector);
    }
    if keyframes.is_empty() {
        return Err(EffectError::NoKeyframes);
    }
    if !(timing.duration.is_finite() && timing.duration > 0.0) {
        return Err(EffectError::InvalidDuration);
    }

    Ok(KeyframeEffectSpec {
        target_selector,
        keyframes,
        timing,
        stagger: None,
    })
}
