//! Analyze command implementation.
//!
//! Files are analyzed in parallel through one shared [`AnalysisCache`], so
//! byte-identical inputs are only processed once per run.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use motif::analysis::{AnalysisCache, AnalyzeOptions, SvgAnalysisResult};
use motif::config::MotifConfig;
use motif::logger::ProgressLine;
use motif::svg::SvgFlag;
use motif::{debug, log};
use rayon::prelude::*;
use serde::Serialize;

use super::args::AnalyzeArgs;
use super::common::{analyze_options, collect_svg_files, plural_count, read_input};

/// Outcome for one input file
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Analyzed(Arc<SvgAnalysisResult>),
    Failed { error: String },
}

/// Execute analyze command
pub fn run(args: &AnalyzeArgs, config: &MotifConfig) -> Result<()> {
    let mut options = analyze_options(config, &args.common);
    MotifConfig::update_option(&mut options.optimize.precision, args.precision.as_ref());
    if let Some(backend) = args.backend {
        options.optimize.backend = backend.into();
    }

    let files = collect_svg_files(&args.paths)?;
    if files.is_empty() {
        bail!("no SVG files found");
    }
    log!("analyze"; "analyzing {}", plural_count(files.len(), "file"));

    let cache = config.cache.build();
    let reports = analyze_files(&files, &options, &cache);

    let stats = cache.stats();
    debug!("cache"; "{} hit(s), {} miss(es)", stats.hits, stats.misses);

    if let Some(dir) = &args.output {
        write_outputs(&reports, dir)?;
    }
    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else if args.output.is_none() {
        print_summary(&reports);
    }

    let failed = reports
        .iter()
        .filter(|r| matches!(r.outcome, Outcome::Failed { .. }))
        .count();
    if failed > 0 {
        bail!("{} failed", plural_count(failed, "file"));
    }
    Ok(())
}

/// Analyze every file in parallel, keeping input order.
fn analyze_files(
    files: &[PathBuf],
    options: &AnalyzeOptions,
    cache: &AnalysisCache,
) -> Vec<FileReport> {
    let progress = ProgressLine::new(&[("svg", files.len())]);

    let reports = files
        .par_iter()
        .map(|path| {
            let outcome = match read_input(path).and_then(|raw| Ok(cache.analyze(&raw, options)?)) {
                Ok(result) => Outcome::Analyzed(result),
                Err(e) => {
                    log!("error"; "{}: {:#}", path.display(), e);
                    Outcome::Failed {
                        error: format!("{e:#}"),
                    }
                }
            };
            progress.inc("svg");
            FileReport {
                path: path.clone(),
                outcome,
            }
        })
        .collect();

    progress.finish();
    reports
}

/// Write `<stem>.svg` (cleaned markup) and `<stem>.json` (metadata).
fn write_outputs(reports: &[FileReport], dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    for report in reports {
        let Outcome::Analyzed(result) = &report.outcome else {
            continue;
        };
        let stem = report
            .path
            .file_stem()
            .map_or_else(|| "stdin".into(), |s| s.to_string_lossy());

        let svg_path = dir.join(format!("{stem}.svg"));
        fs::write(&svg_path, &result.cleaned_svg_string)
            .with_context(|| format!("Failed to write {}", svg_path.display()))?;

        let json_path = dir.join(format!("{stem}.json"));
        fs::write(&json_path, serde_json::to_string_pretty(&result.metadata)?)
            .with_context(|| format!("Failed to write {}", json_path.display()))?;
    }

    log!("analyze"; "wrote results to {}", dir.display());
    Ok(())
}

fn print_summary(reports: &[FileReport]) {
    for report in reports {
        let Outcome::Analyzed(result) = &report.outcome else {
            continue;
        };
        let meta = &result.metadata;
        let stroke = if meta.has_flag(SvgFlag::IsStrokeBased) {
            " stroke"
        } else {
            ""
        };
        let counts = meta
            .node_count
            .iter()
            .filter(|&(_, &n)| n > 0)
            .map(|(tag, n)| format!("{tag}={n}"))
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "{}\t{:?}{}\t{}",
            report.path.display(),
            meta.classification,
            stroke,
            counts
        );
    }
}
