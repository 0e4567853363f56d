//! Data-side support for playing effect specs.
//!
//! A player binds a [`KeyframeEffectSpec`](crate::primitive::KeyframeEffectSpec)
//! to concrete elements. This module does the platform-independent part:
//!
//! - [`Scene`]: arena of a rendered SVG's elements, addressed by [`ElementId`]
//! - [`Selector`]: matching of the selectors the primitives emit
//! - [`PathLengthCache`]: stroke lengths for `drawPath`, scoped to one pass
//! - [`resolve_effect`] / [`resolve_draw_path`]: one [`ResolvedEffect`] per match
//!
//! Driving an actual animation runtime is left to the embedding application.

mod length;
mod resolve;
mod scene;
mod selector;

pub use length::{PathLengthCache, element_length};
pub use resolve::{ResolvedEffect, resolve_draw_path, resolve_effect};
pub use scene::{ElementId, Scene};
pub use selector::{Selector, SelectorError};
