//! Project configuration from `motif.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [fit], [optimize], [cache]
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! ├── util.rs        # upward config file search
//! └── mod.rs         # MotifConfig (this file)
//! ```
//!
//! A missing file is not an error: every field has a default, so an empty
//! project behaves exactly like one with an empty `motif.toml`.

pub mod section;
pub mod types;
mod util;

pub use section::{CacheConfig, FitConfig, OptimizeConfig};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};
pub use util::{find_config_file, find_config_file_from};

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::analysis::AnalyzeOptions;
use crate::{debug, log};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing `motif.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MotifConfig {
    /// Where the config was loaded from; `None` when running on defaults.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    #[serde(default)]
    pub fit: FitConfig,

    #[serde(default)]
    pub optimize: OptimizeConfig,

    #[serde(default)]
    pub cache: CacheConfig,
}

impl MotifConfig {
    /// Default config file name.
    pub const FILE_NAME: &'static str = "motif.toml";

    /// Find `config_name` upward from the cwd and load it, or fall back to
    /// defaults when there is none. The result is validated.
    pub fn load(config_name: &Path) -> Result<Self, ConfigError> {
        let config = match find_config_file(config_name) {
            Some(path) => {
                debug!("config"; "using {}", path.display());
                Self::from_path(&path)?
            }
            None => {
                debug!("config"; "no {} found, using defaults", config_name.display());
                Self::default()
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string. Unknown fields are ignored.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a file, warning about unknown fields.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (mut config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        log!("warning"; "unknown fields in {}, ignoring:", path.display());
        for field in fields {
            eprintln!("- {field}");
        }
    }

    /// Validate every section, collecting all problems at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        self.fit.validate(&mut diag);
        self.optimize.validate(&mut diag);
        self.cache.validate(&mut diag);

        diag.into_result().map_err(ConfigError::Diagnostics)
    }

    /// Options for the analysis pipeline.
    pub fn analyze_options(&self) -> AnalyzeOptions {
        AnalyzeOptions {
            viewport_px: self.fit.viewport,
            optimize: self.optimize.to_options(),
        }
    }

    /// Overwrite `target` when `value` is provided (CLI flags over config).
    pub fn update_option<T: Clone>(target: &mut T, value: Option<&T>) {
        if let Some(value) = value {
            *target = value.clone();
        }
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

/// Parse config, panicking on unknown fields (to catch typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> MotifConfig {
    let (parsed, ignored) = MotifConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
