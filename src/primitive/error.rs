//! Primitive error types.

use thiserror::Error;

/// Broken `create_effect` contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EffectError {
    #[error("Target selector is required")]
    MissingSelector,

    #[error("At least one keyframe is required")]
    NoKeyframes,

    #[error("Duration must be a positive number")]
    InvalidDuration,
}

/// The chosen animation does not fit the SVG's structure.
///
/// This is an expected outcome: callers pick a fallback primitive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{primitive}` is not supported for this SVG: {reason}")]
pub struct UnsupportedPrimitive {
    /// Primitive name as used in options (`drawPath`, `staggerFadeIn`).
    pub primitive: &'static str,
    /// Human-readable reason.
    pub reason: String,
}

impl UnsupportedPrimitive {
    pub fn new(primitive: &'static str, reason: impl Into<String>) -> Self {
        Self {
            primitive,
            reason: reason.into(),
        }
    }
}

/// Errors returned by primitive generators.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PrimitiveError {
    #[error(transparent)]
    Unsupported(#[from] UnsupportedPrimitive),

    #[error(transparent)]
    Effect(#[from] EffectError),

    #[error("invalid primitive options: {0}")]
    InvalidOptions(String),
}

impl PrimitiveError {
    /// Whether a fallback primitive may succeed where this one failed.
    #[inline]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_error_messages() {
        assert_eq!(EffectError::MissingSelector.to_string(), "Target selector is required");
        assert_eq!(EffectError::NoKeyframes.to_string(), "At least one keyframe is required");
        assert_eq!(EffectError::InvalidDuration.to_string(), "Duration must be a positive number");
    }

    #[test]
    fn test_unsupported_display_and_kind() {
        let err: PrimitiveError = UnsupportedPrimitive::new("drawPath", "no strokes").into();
        assert!(err.is_unsupported());
        assert_eq!(
            err.to_string(),
            "`drawPath` is not supported for this SVG: no strokes"
        );

        let err: PrimitiveError = EffectError::NoKeyframes.into();
        assert!(!err.is_unsupported());
        assert_eq!(err.to_string(), "At least one keyframe is required");
    }
}
