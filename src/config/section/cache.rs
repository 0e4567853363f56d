//! `[cache]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [cache]
//! capacity = 64    # Analysis results kept in memory
//! ```

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisCache;
use crate::config::{ConfigDiagnostics, FieldPath};

/// Analysis cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub capacity: usize,
}

impl CacheConfig {
    pub const CAPACITY: FieldPath = FieldPath::new("cache.capacity");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.capacity == 0 {
            diag.error_with_hint(
                Self::CAPACITY,
                "must be greater than 0",
                format!("the default is {}", AnalysisCache::DEFAULT_CAPACITY),
            );
        }
    }

    /// A fresh cache with the configured capacity.
    pub fn build(&self) -> AnalysisCache {
        AnalysisCache::new(self.capacity)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: AnalysisCache::DEFAULT_CAPACITY,
        }
    }
}
