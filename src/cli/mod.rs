//! Command-line interface module.

mod args;
pub mod analyze;
pub mod animate;
pub mod common;
pub mod fit;

pub use args::{Cli, Commands};
