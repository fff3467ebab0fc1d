//! Error types for sigfield-core.

use thiserror::Error;

/// Errors produced while constructing fields, regions, and color ramps.
///
/// Evaluation itself never fails: out-of-domain queries return documented
/// sentinel values. These errors only arise from invalid construction input.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Width or height was non-positive, or `width * height` overflowed.
    #[error("invalid dimensions: width and height must be positive and their product must fit in memory")]
    InvalidDimensions,

    /// A generator parameter was outside its valid domain.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A distance field produced too few points for the requested rank.
    #[error("distance field rank {k} needs at least {required} points, sampling produced {available}")]
    InsufficientPoints {
        k: i64,
        required: usize,
        available: usize,
    },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A color ramp name was unknown or its stops were unusable.
    #[error("invalid color ramp: {0}")]
    InvalidRamp(String),
}
