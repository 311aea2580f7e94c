//! Configuration errors, reported before any rendering work begins.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("image resolution must be non-zero, got {width}x{height}")]
    EmptyResolution { width: u32, height: u32 },

    #[error("the IFS system must contain at least one inverse map")]
    EmptySystem,

    #[error("iteration count must be positive")]
    ZeroIterations,

    #[error("inverse map {index} has a non-finite coefficient")]
    NonFiniteMap { index: usize },

    #[error("view scale must be positive and finite, got {0}")]
    InvalidScale(f64),

    #[error("gamma must be positive and finite, got {0}")]
    InvalidGamma(f64),
}
