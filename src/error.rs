//! Error types for the analysis pipeline.

use thiserror::Error;

/// Errors raised by the SVG analysis stages.
///
/// Every stage returns these unmodified; nothing in the pipeline catches and
/// rewraps another stage's error.
#[derive(Debug, Error)]
pub enum MotifError {
    /// Input was empty, whitespace only, or held no element at all.
    #[error("no root element found")]
    NoRootElement,

    /// The first element of the document is not `<svg>`.
    #[error("root element is not <svg>")]
    RootNotSvg {
        /// Tag name of the element that was found instead
        found: String,
    },

    /// Tokenizer error from the XML reader.
    #[error("XML parse error at position {position}: {message}")]
    Xml {
        /// Byte offset reported by the reader
        position: u64,
        /// Reader error description
        message: String,
    },

    /// Elements nested past the parser's depth limit.
    #[error("elements nested deeper than {limit} levels")]
    TooDeep { limit: usize },

    /// The optimizer backend failed.
    #[error("SVG optimization failed: {0}")]
    Optimize(String),
}

/// Result type alias for analysis operations.
pub type MotifResult<T> = Result<T, MotifError>;

impl MotifError {
    pub fn xml(position: u64, err: impl std::fmt::Display) -> Self {
        Self::Xml {
            position,
            message: err.to_string(),
        }
    }

    pub fn optimize(err: impl std::fmt::Display) -> Self {
        Self::Optimize(err.to_string())
    }
}
