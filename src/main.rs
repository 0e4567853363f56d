//! motif - SVG analysis and animation primitives.

mod cli;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use motif::config::MotifConfig;
use motif::logger::set_verbose;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    set_verbose(cli.command.verbose());

    let config = MotifConfig::load(&cli.config)?;

    match &cli.command {
        Commands::Analyze { args } => cli::analyze::run(args, &config),
        Commands::Fit { args } => cli::fit::run(args, &config),
        Commands::Animate { args } => cli::animate::run(args, &config),
    }
}
