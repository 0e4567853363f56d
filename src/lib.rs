//! SVG analysis and animation primitives.
//!
//! # Pipeline
//!
//! ```text
//! raw svg ─► sanitize ─► fit viewBox ─► classify ─► optimize ─► SvgAnalysisResult
//!                                          │
//!                                          ▼
//!                     Primitive::generate(metadata) ─► KeyframeEffectSpec
//!                                                             │
//!                                                             ▼
//!                                       player::resolve_* ─► ResolvedEffect
//! ```
//!
//! # Example
//!
//! ```
//! use motif::{Primitive, analyze_svg};
//!
//! let analysis = analyze_svg(r#"<svg><g><rect width="4" height="4"/></g></svg>"#)?;
//! let primitive = Primitive::from_json(r#"{"primitive":"staggerFadeIn","duration":300}"#)?;
//! let spec = primitive.generate(&analysis.metadata)?;
//! assert_eq!(spec.target_selector, "g > *");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod logger;
pub mod player;
pub mod primitive;
pub mod svg;

pub use analysis::{AnalysisCache, AnalyzeOptions, SvgAnalysisResult, analyze_svg, analyze_svg_with};
pub use error::{MotifError, MotifResult};
pub use primitive::{KeyframeEffectSpec, Primitive, PrimitiveError, Timing};
pub use svg::{Classification, SvgFlag, SvgMetadata, fit_svg_to_viewbox, sanitize};
