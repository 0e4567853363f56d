//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use motif::svg::OptimizeBackend;
use std::path::PathBuf;

/// SVG analysis and animation primitives
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path, searched upward from the current directory
    #[arg(short = 'C', long, global = true, default_value = "motif.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Sanitize, fit, classify and optimize SVG files
    #[command(visible_alias = "a")]
    Analyze {
        #[command(flatten)]
        args: AnalyzeArgs,
    },

    /// Print an SVG with its viewBox fitted to the drawn content
    #[command(visible_alias = "f")]
    Fit {
        #[command(flatten)]
        args: FitArgs,
    },

    /// Generate a keyframe effect spec for an SVG
    #[command(visible_alias = "m")]
    Animate {
        #[command(flatten)]
        args: AnimateArgs,
    },
}

impl Commands {
    pub fn verbose(&self) -> bool {
        match self {
            Self::Analyze { args } => args.common.verbose,
            Self::Fit { args } => args.common.verbose,
            Self::Animate { args } => args.common.verbose,
        }
    }
}

/// Arguments shared by every subcommand
#[derive(clap::Args, Debug, Clone)]
pub struct CommonArgs {
    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,

    /// Viewport edge in pixels (overrides `[fit] viewport`)
    #[arg(long)]
    pub viewport: Option<f64>,
}

/// Optimizer backend selectable from the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendArg {
    /// Tree passes that keep the original shapes
    Minify,
    /// usvg normalization (shapes become paths)
    Usvg,
}

impl From<BackendArg> for OptimizeBackend {
    fn from(value: BackendArg) -> Self {
        match value {
            BackendArg::Minify => Self::Minify,
            BackendArg::Usvg => Self::Usvg,
        }
    }
}

/// Analyze command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// SVG files or directories (searched for `*.svg`).
    /// Use `-` to read paths from stdin (one per line).
    #[arg(required = true, value_hint = clap::ValueHint::AnyPath)]
    pub paths: Vec<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Decimal places kept by the optimizer (overrides `[optimize] precision`)
    #[arg(short, long)]
    pub precision: Option<u8>,

    /// Optimizer backend (overrides `[optimize] backend`)
    #[arg(short, long)]
    pub backend: Option<BackendArg>,

    /// Print results as JSON
    #[arg(short, long)]
    pub json: bool,

    /// Write `<name>.svg` and `<name>.json` per input into this directory
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,
}

/// Fit command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct FitArgs {
    /// SVG file, or `-` for stdin
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub file: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Animate command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct AnimateArgs {
    /// SVG file, or `-` for stdin
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub file: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Primitive as JSON, e.g. '{"primitive":"fadeIn","duration":300}'
    #[arg(short = 'p', long)]
    pub primitive: String,

    /// Primitive to use when the first one does not fit the SVG
    #[arg(short, long)]
    pub fallback: Option<String>,

    /// Bind the spec to the SVG's elements (measuring stroke lengths)
    #[arg(short, long)]
    pub resolve: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::parse_from([
            "motif", "analyze", "a.svg", "icons/", "--viewport", "48", "-b", "usvg", "--json",
        ]);
        let Commands::Analyze { args } = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.paths.len(), 2);
        assert_eq!(args.common.viewport, Some(48.0));
        assert_eq!(args.backend, Some(BackendArg::Usvg));
        assert!(args.json);
        assert_eq!(cli.config, PathBuf::from("motif.toml"));
    }

    #[test]
    fn test_parse_animate() {
        let cli = Cli::parse_from([
            "motif",
            "-C",
            "custom.toml",
            "animate",
            "logo.svg",
            "-p",
            r#"{"primitive":"drawPath","duration":1000}"#,
            "--resolve",
            "-V",
        ]);
        assert!(cli.command.verbose());
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
        let Commands::Animate { args } = cli.command else {
            panic!("expected animate");
        };
        assert!(args.resolve);
        assert_eq!(args.fallback, None);
    }

    #[test]
    fn test_analyze_requires_paths() {
        assert!(Cli::try_parse_from(["motif", "analyze"]).is_err());
    }
}
