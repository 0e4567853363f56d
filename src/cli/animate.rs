//! Animate command implementation.
//!
//! Analyzes the input, generates the requested primitive's effect spec and
//! prints it as JSON. With `--resolve` the spec is bound to the cleaned
//! SVG's elements, one entry per target with its own delay and, for
//! `drawPath`, its measured stroke length.

use anyhow::{Context, Result};
use motif::analysis::SvgAnalysisResult;
use motif::config::MotifConfig;
use motif::player::{PathLengthCache, Scene, resolve_draw_path, resolve_effect};
use motif::primitive::{KeyframeEffectSpec, Primitive};
use motif::{debug, log};
use serde_json::Value;

use super::args::AnimateArgs;
use super::common::{analyze_options, read_input};

/// Execute animate command
pub fn run(args: &AnimateArgs, config: &MotifConfig) -> Result<()> {
    let primitive = Primitive::from_json(&args.primitive).context("Invalid --primitive")?;
    let fallback = args
        .fallback
        .as_deref()
        .map(Primitive::from_json)
        .transpose()
        .context("Invalid --fallback")?;

    let options = analyze_options(config, &args.common);
    let raw = read_input(&args.file)?;
    let analysis = config.cache.build().analyze(&raw, &options)?;

    let output = animate(&analysis, &primitive, fallback.as_ref(), args.resolve)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn animate(
    analysis: &SvgAnalysisResult,
    primitive: &Primitive,
    fallback: Option<&Primitive>,
    resolve: bool,
) -> Result<Value> {
    let (used, spec) = match fallback {
        Some(fallback) => primitive.generate_choosing(&analysis.metadata, fallback)?,
        None => (primitive, primitive.generate(&analysis.metadata)?),
    };
    log!("animate"; "{} -> `{}`", used.name(), spec.target_selector);

    if !resolve {
        return Ok(serde_json::to_value(&spec)?);
    }
    Ok(serde_json::to_value(resolve_spec(used, &spec, &analysis.cleaned_svg_string)?)?)
}

/// Bind `spec` to the scene. Stroke lengths are measured only when the spec
/// came from `drawPath`.
fn resolve_spec(
    used: &Primitive,
    spec: &KeyframeEffectSpec,
    svg: &str,
) -> Result<Vec<motif::player::ResolvedEffect>> {
    let scene = Scene::from_svg(svg)?;

    let resolved = match used {
        Primitive::DrawPath(_) => {
            let mut lengths = PathLengthCache::new();
            let resolved = resolve_draw_path(spec, &scene, &mut lengths)?;
            debug!("player"; "measured {} element(s)", lengths.measurements());
            resolved
        }
        _ => resolve_effect(spec, &scene)?,
    };

    debug!("player"; "{} element(s) matched", resolved.len());
    Ok(resolved)
}
