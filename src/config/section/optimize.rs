//! `[optimize]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [optimize]
//! precision = 2        # Decimal places kept in numeric attributes
//! multipass = true     # Repeat passes until the output stops changing
//! backend = "minify"   # "minify" keeps shapes; "usvg" normalizes to paths
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::svg::{OptimizeBackend, OptimizeOptions};

/// Highest accepted `precision`.
const MAX_PRECISION: u8 = 8;

/// Optimizer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizeConfig {
    pub precision: u8,
    pub multipass: bool,
    pub backend: OptimizeBackend,
}

impl OptimizeConfig {
    pub const PRECISION: FieldPath = FieldPath::new("optimize.precision");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.precision > MAX_PRECISION {
            diag.error_with_hint(
                Self::PRECISION,
                format!("must be at most {MAX_PRECISION}, got {}", self.precision),
                "more digits than that only grows the output",
            );
        }
    }

    pub fn to_options(&self) -> OptimizeOptions {
        OptimizeOptions {
            precision: self.precision,
            multipass: self.multipass,
            backend: self.backend,
        }
    }
}

impl Default for OptimizeConfig {
    fn default() -> Self {
        let defaults = OptimizeOptions::default();
        Self {
            precision: defaults.precision,
            multipass: defaults.multipass,
            backend: defaults.backend,
        }
    }
}
