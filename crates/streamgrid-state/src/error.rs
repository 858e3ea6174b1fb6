//! Error types for the streamgrid domain vocabulary.

use thiserror::Error;

/// Errors from parsing memory size literals.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseSizeError {
    #[error("empty memory size")]
    Empty,

    #[error("invalid byte count in {0:?}")]
    InvalidCount(String),

    #[error("unknown memory unit in {0:?}")]
    UnknownUnit(String),

    #[error("memory size {0:?} overflows")]
    Overflow(String),
}
