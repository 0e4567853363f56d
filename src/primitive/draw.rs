//! Stroke drawing: dash offset from the full length down to zero.
//!
//! The generated spec carries [`PATH_LENGTH_PLACEHOLDER`] for both the dash
//! array and the starting offset. A player measures each matched element and
//! substitutes the real length (see `player::resolve_draw_path`).

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::effect::{KeyframeEffectSpec, Timing, create_effect, keyframe};
use super::error::{PrimitiveError, UnsupportedPrimitive};
use crate::svg::{SvgFlag, SvgMetadata};

/// Every element kind that has a stroke to draw.
pub const DRAW_PATH_SELECTOR: &str = "path, line, polyline, polygon, circle, ellipse, rect";

/// Stand-in path length until the player measures the real one.
pub const PATH_LENGTH_PLACEHOLDER: &str = "1000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawPathOptions {
    #[serde(flatten)]
    pub timing: Timing,
}

impl DrawPathOptions {
    pub fn new(timing: Timing) -> Self {
        Self { timing }
    }
}

/// Draw strokes in. Requires [`SvgFlag::IsStrokeBased`].
pub fn draw_path(
    options: &DrawPathOptions,
    metadata: &SvgMetadata,
) -> Result<KeyframeEffectSpec, PrimitiveError> {
    if !metadata.has_flag(SvgFlag::IsStrokeBased) {
        return Err(UnsupportedPrimitive::new(
            "drawPath",
            "no stroke-only elements to draw",
        )
        .into());
    }

    let spec = create_effect(
        DRAW_PATH_SELECTOR,
        vec![
            keyframe([
                ("strokeDasharray", json!(PATH_LENGTH_PLACEHOLDER)),
                ("strokeDashoffset", json!(PATH_LENGTH_PLACEHOLDER)),
            ]),
            keyframe([
                ("strokeDasharray", json!(PATH_LENGTH_PLACEHOLDER)),
                ("strokeDashoffset", json!("0")),
            ]),
        ],
        options.timing.clone(),
    )?;
    Ok(spec)
}
