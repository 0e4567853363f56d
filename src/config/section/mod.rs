//! Configuration section definitions.
//!
//! Each module corresponds to a section in `motif.toml`:
//!
//! | Module     | TOML Section  | Purpose                          |
//! |------------|---------------|----------------------------------|
//! | `fit`      | `[fit]`       | Viewport used by the fitter      |
//! | `optimize` | `[optimize]`  | Precision, passes, backend       |
//! | `cache`    | `[cache]`     | Analysis cache capacity          |

mod cache;
mod fit;
mod optimize;

pub use cache::CacheConfig;
pub use fit::FitConfig;
pub use optimize::OptimizeConfig;
