//! SVG processing stages.
//!
//! # Modules
//!
//! - [`sanitize`]: allow-list filtering of untrusted markup
//! - [`fit`]: viewBox fitting to the true content bounds
//! - [`parse`]: markup to [`SvgElement`] tree
//! - [`classify`]: element counts, flattened/structured, stroke detection
//! - [`optimize`]: minification (tree passes or usvg)
//!
//! # Architecture
//!
//! ```text
//! raw SVG
//!    │
//!    ▼
//! ┌──────────┐
//! │ sanitize │ ──► drop script/style/handlers
//! └────┬─────┘
//!      ▼
//! ┌──────────┐
//! │   fit    │ ──► bounds (+ transforms) -> viewBox
//! └────┬─────┘
//!      ├──────────────────┐
//!      ▼                  ▼
//! ┌──────────┐      ┌──────────┐
//! │  parse   │      │ optimize │ ──► cleaned string
//! └────┬─────┘      └──────────┘
//!      ▼
//! ┌──────────┐
//! │ classify │ ──► metadata
//! └──────────┘
//! ```

pub mod ast;
pub mod bounds;
pub mod classify;
pub mod fit;
pub mod number;
pub mod optimize;
pub mod parse;
pub mod sanitize;
pub mod serialize;
pub mod transform;

pub use ast::{Attrs, AttrsExt, SvgAstNode, SvgElement};
pub use bounds::{BBox, calculate_bounds, path_bounds};
pub use classify::{Classification, NodeCount, SvgFlag, SvgMetadata, classify};
pub use fit::{DEFAULT_VIEWPORT_PX, fit_svg_to_viewbox};
pub use optimize::{OptimizeBackend, OptimizeOptions, optimize};
pub use parse::parse;
pub use sanitize::sanitize;
pub use serialize::to_svg_string;
