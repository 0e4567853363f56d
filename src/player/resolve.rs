//! Per-element effects for a concrete scene.

use serde::Serialize;
use serde_json::Value;

use super::length::PathLengthCache;
use super::scene::{ElementId, Scene};
use super::selector::{Selector, SelectorError};
use crate::debug;
use crate::primitive::{Keyframe, KeyframeEffectSpec, PATH_LENGTH_PLACEHOLDER, Timing};
use crate::svg::number::format_number;

/// One effect bound to one element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedEffect {
    pub element: ElementId,
    pub keyframes: Vec<Keyframe>,
    /// Spec timing with the per-element stagger delay applied.
    pub timing: Timing,
}

/// Bind `spec` to every matching element, in document order.
///
/// The `i`-th match starts after [`KeyframeEffectSpec::delay_for`]`(i)`.
pub fn resolve_effect(
    spec: &KeyframeEffectSpec,
    scene: &Scene,
) -> Result<Vec<ResolvedEffect>, SelectorError> {
    let selector = Selector::parse(&spec.target_selector)?;
    let resolved = scene
        .select(&selector)
        .into_iter()
        .enumerate()
        .map(|(index, element)| ResolvedEffect {
            element,
            keyframes: spec.keyframes.clone(),
            timing: Timing {
                delay: spec.delay_for(index),
                ..spec.timing.clone()
            },
        })
        .collect();
    Ok(resolved)
}

/// Resolve a `drawPath` spec, replacing the placeholder length with each
/// element's measured stroke length (rounded up).
///
/// Elements with no measurable, non-zero length keep the placeholder.
pub fn resolve_draw_path(
    spec: &KeyframeEffectSpec,
    scene: &Scene,
    cache: &mut PathLengthCache,
) -> Result<Vec<ResolvedEffect>, SelectorError> {
    let mut resolved = resolve_effect(spec, scene)?;

    for effect in &mut resolved {
        let Some(length) = cache.measure(scene, effect.element).filter(|&l| l > 0.0) else {
            debug!("player"; "{} has no measurable length", effect.element);
            continue;
        };
        let length = Value::from(format_number(length.ceil()));
        for value in effect.keyframes.iter_mut().flat_map(|kf| kf.values_mut()) {
            if *value == PATH_LENGTH_PLACEHOLDER {
                *value = length.clone();
            }
        }
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{DrawPathOptions, StaggerFadeInOptions, draw_path, stagger_fade_in};
    use crate::svg::classify;

    fn setup(svg: &str) -> (Scene, crate::svg::SvgMetadata) {
        let scene = Scene::from_svg(svg).unwrap();
        let meta = classify(&crate::svg::parse(svg).unwrap());
        (scene, meta)
    }

    #[test]
    fn test_draw_path_uses_measured_length() {
        let (scene, meta) = setup(
            r#"<svg><path d="M0 0L30 40" stroke="black"/><line x2="10.2" stroke="red"/><g/></svg>"#,
        );
        let spec = draw_path(&DrawPathOptions::new(Timing::new(800.0)), &meta).unwrap();
        let mut cache = PathLengthCache::new();
        let resolved = resolve_draw_path(&spec, &scene, &mut cache).unwrap();

        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].keyframes[0]["strokeDasharray"], "50");
        assert_eq!(resolved[0].keyframes[0]["strokeDashoffset"], "50");
        assert_eq!(resolved[0].keyframes[1]["strokeDashoffset"], "0");
        assert_eq!(resolved[1].keyframes[0]["strokeDasharray"], "11");
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_second_pass_hits_cache() {
        let (scene, meta) = setup(r#"<svg><line x2="10" stroke="red"/></svg>"#);
        let spec = draw_path(&DrawPathOptions::new(Timing::new(800.0)), &meta).unwrap();
        let mut cache = PathLengthCache::new();

        resolve_draw_path(&spec, &scene, &mut cache).unwrap();
        resolve_draw_path(&spec, &scene, &mut cache).unwrap();
        assert_eq!(cache.measurements(), 1);
    }

    #[test]
    fn test_zero_length_keeps_placeholder() {
        let (scene, meta) = setup(r#"<svg><path d="M5 5" stroke="red"/></svg>"#);
        let spec = draw_path(&DrawPathOptions::new(Timing::new(800.0)), &meta).unwrap();
        let resolved = resolve_draw_path(&spec, &scene, &mut PathLengthCache::new()).unwrap();

        assert_eq!(resolved[0].keyframes[0]["strokeDasharray"], PATH_LENGTH_PLACEHOLDER);
    }

    #[test]
    fn test_stagger_delays() {
        let (scene, meta) = setup(r#"<svg><g><rect/><rect/><rect/></g></svg>"#);
        let spec = stagger_fade_in(
            &StaggerFadeInOptions::new(Timing::new(300.0).with_delay(10.0)),
            &meta,
        )
        .unwrap();
        let resolved = resolve_effect(&spec, &scene).unwrap();

        let delays: Vec<_> = resolved.iter().map(|r| r.timing.delay).collect();
        assert_eq!(delays, [10.0, 110.0, 210.0]);
        assert!(resolved.iter().all(|r| r.timing.duration == 300.0));
    }

    #[test]
    fn test_bad_selector() {
        let (scene, _) = setup("<svg/>");
        let mut spec = crate::primitive::create_effect(
            "svg",
            vec![crate::primitive::keyframe([("opacity", serde_json::json!(1))])],
            Timing::new(1.0),
        )
        .unwrap();
        spec.target_selector = "g >".into();
        assert!(resolve_effect(&spec, &scene).is_err());
    }
}
