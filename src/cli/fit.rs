//! Fit command implementation.

use anyhow::Result;
use motif::config::MotifConfig;
use motif::svg::{fit_svg_to_viewbox, sanitize};

use super::args::FitArgs;
use super::common::{analyze_options, read_input};

/// Execute fit command: print the sanitized SVG with a tight viewBox.
pub fn run(args: &FitArgs, config: &MotifConfig) -> Result<()> {
    let options = analyze_options(config, &args.common);
    let raw = read_input(&args.file)?;
    println!("{}", fit(&raw, options.viewport_px)?);
    Ok(())
}

fn fit(raw: &str, viewport_px: f64) -> Result<String> {
    Ok(fit_svg_to_viewbox(&sanitize(raw), viewport_px)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_strips_scripts_and_sets_viewbox() {
        let out = fit(
            r#"<svg width="100" height="100"><script>x()</script><rect x="10" y="10" width="20" height="20"/></svg>"#,
            64.0,
        )
        .unwrap();
        assert!(!out.contains("script"));
        assert!(out.contains(r#"viewBox="10 10 20 20""#));
        assert!(!out.contains(r#"width="100""#));
    }

    #[test]
    fn test_fit_rejects_non_svg() {
        assert!(fit("<html/>", 64.0).is_err());
    }
}
