//! `[fit]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [fit]
//! viewport = 200.0    # Max rendered edge in pixels
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::svg::DEFAULT_VIEWPORT_PX;

/// Viewbox fitting settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    /// Edge of the square viewport the fitted SVG is capped to.
    pub viewport: f64,
}

impl FitConfig {
    pub const VIEWPORT: FieldPath = FieldPath::new("fit.viewport");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !(self.viewport.is_finite() && self.viewport > 0.0) {
            diag.error_with_hint(
                Self::VIEWPORT,
                format!("must be a positive number, got {}", self.viewport),
                format!("the default is {DEFAULT_VIEWPORT_PX}"),
            );
        }
    }
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            viewport: DEFAULT_VIEWPORT_PX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_fit_config() {
        let config = test_parse_config("[fit]\nviewport = 64.0");
        assert_eq!(config.fit.viewport, 64.0);

        let config = test_parse_config("");
        assert_eq!(config.fit.viewport, 200.0);
    }

    #[test]
    fn test_fit_validate() {
        let mut diag = ConfigDiagnostics::new();
        FitConfig { viewport: 0.0 }.validate(&mut diag);
        FitConfig { viewport: f64::NAN }.validate(&mut diag);
        FitConfig::default().validate(&mut diag);
        assert_eq!(diag.len(), 2);
        assert_eq!(diag.errors()[0].field, FitConfig::VIEWPORT);
    }
}
