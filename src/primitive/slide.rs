//! Slide in from an edge while fading in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::effect::{KeyframeEffectSpec, Timing, create_effect, keyframe};
use super::error::EffectError;
use crate::svg::number::format_number;

/// Edge the SVG enters from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Top,
    Bottom,
}

/// Pixel distance written as `"<n>px"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Distance(f64);

impl Distance {
    /// `None` unless `px` is finite.
    pub fn px(px: f64) -> Option<Self> {
        px.is_finite().then_some(Self(px))
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", format_number(self.0))
    }
}

impl FromStr for Distance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        s.strip_suffix("px")
            .and_then(|n| n.trim().parse::<f64>().ok())
            .and_then(Self::px)
            .ok_or_else(|| format!("invalid distance `{s}`, expected e.g. `20px`"))
    }
}

impl TryFrom<String> for Distance {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Distance> for String {
    fn from(value: Distance) -> Self {
        value.to_string()
    }
}

/// Both `fromDirection` and `distance` are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideInOptions {
    #[serde(flatten)]
    pub timing: Timing,
    pub from_direction: Direction,
    pub distance: Distance,
}

impl SlideInOptions {
    pub fn new(timing: Timing, from_direction: Direction, distance: Distance) -> Self {
        Self {
            timing,
            from_direction,
            distance,
        }
    }
}

/// Starting offset for an element entering from `direction`.
fn offset(direction: Direction, distance: Distance) -> String {
    let d = distance.value();
    let (axis, value) = match direction {
        Direction::Left => ('X', -d),
        Direction::Right => ('X', d),
        Direction::Top => ('Y', -d),
        Direction::Bottom => ('Y', d),
    };
    format!("translate{axis}({}px)", format_number(value))
}

/// Translate in from `from_direction` with an opacity ramp. Works for any SVG.
pub fn slide_in(options: &SlideInOptions) -> Result<KeyframeEffectSpec, EffectError> {
    create_effect(
        "svg",
        vec![
            keyframe([
                ("opacity", json!(0)),
                ("transform", json!(offset(options.from_direction, options.distance))),
            ]),
            keyframe([("opacity", json!(1)), ("transform", json!("translate(0, 0)"))]),
        ],
        options.timing.clone(),
    )
}
