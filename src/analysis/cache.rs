//! Bounded memoization of analysis results.
//!
//! The cache is an ordinary value: callers construct one with a capacity and
//! pass it where analysis happens. Entries are keyed by the blake3 hash of
//! the raw input together with the options that shaped the result, and the
//! least recently used entry is evicted once capacity is reached.

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;

use super::{AnalyzeOptions, SvgAnalysisResult, analyze_svg_with};
use crate::debug;
use crate::error::MotifResult;

/// A 256-bit content hash (blake3 output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Hash raw input together with the options that affect the result.
    pub fn of(raw: &str, options: &AnalyzeOptions) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(raw.as_bytes());
        hasher.update(&options.viewport_px.to_le_bytes());
        hasher.update(&[
            options.optimize.precision,
            u8::from(options.optimize.multipass),
            options.optimize.backend as u8,
        ]);
        Self(*hasher.finalize().as_bytes())
    }

    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string (for debugging/display).
    pub fn to_hex(self) -> String {
        blake3::Hash::from_bytes(self.0).to_hex().to_string()
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // First 16 hex chars are enough for logs
        write!(f, "{}", &self.to_hex()[..16])
    }
}

/// Hit/miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

struct Inner {
    entries: LruCache<ContentHash, Arc<SvgAnalysisResult>>,
    stats: CacheStats,
}

/// Thread-safe LRU cache of analysis results.
pub struct AnalysisCache {
    inner: Mutex<Inner>,
}

impl AnalysisCache {
    /// Default number of retained results.
    pub const DEFAULT_CAPACITY: usize = 64;

    /// Create a cache holding at most `capacity` results (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(Inner {
                entries: LruCache::new(capacity),
                stats: CacheStats::default(),
            }),
        }
    }

    /// Return the cached result for `raw`, analyzing on a miss.
    ///
    /// Failed analyses are not cached. The lock is not held while analyzing,
    /// so two threads missing on the same input may both compute it.
    pub fn analyze(
        &self,
        raw: &str,
        options: &AnalyzeOptions,
    ) -> MotifResult<Arc<SvgAnalysisResult>> {
        let key = ContentHash::of(raw, options);

        {
            let mut inner = self.inner.lock();
            if let Some(hit) = inner.entries.get(&key).cloned() {
                inner.stats.hits += 1;
                debug!("cache"; "hit {}", key);
                return Ok(hit);
            }
            inner.stats.misses += 1;
        }

        let result = Arc::new(analyze_svg_with(raw, options)?);
        self.inner.lock().entries.put(key, Arc::clone(&result));
        debug!("cache"; "stored {}", key);
        Ok(result)
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().entries.cap().get()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats
    }

    /// Drop every entry; counters are kept.
    pub fn clear(&self) {
        self.inner.lock().entries.clear();
    }
}

impl Default for AnalysisCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

/// Analyze through `cache`.
#[inline]
pub fn analyze_cached(
    raw: &str,
    options: &AnalyzeOptions,
    cache: &AnalysisCache,
) -> MotifResult<Arc<SvgAnalysisResult>> {
    cache.analyze(raw, options)
}
