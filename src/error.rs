//! Error types for simdgeo operations.
//!
//! Only shape problems, singular inversions and bad configuration are reported
//! as errors. Degenerate normalize/divide cases resolve to sentinel values
//! instead, so frame-critical call sites never need an error path.

use thiserror::Error;

/// Errors that can occur during simdgeo operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MathError {
    /// A fixed-size type was built from a component list of the wrong length.
    #[error("Shape mismatch: expected {expected} components, got {actual}")]
    ShapeMismatch {
        /// Number of components the type holds.
        expected: usize,
        /// Number of components supplied.
        actual: usize,
    },

    /// Two dynamically sized matrices have incompatible shapes.
    #[error("Dimension mismatch: {left:?} is incompatible with {right:?}")]
    DimensionMismatch {
        /// (rows, cols) of the left operand.
        left: (usize, usize),
        /// (rows, cols) of the right operand.
        right: (usize, usize),
    },

    /// Determinant or inverse requested for a non-square matrix.
    #[error("Matrix is not square ({rows}x{cols})")]
    NotSquare {
        /// Row count.
        rows: usize,
        /// Column count.
        cols: usize,
    },

    /// Inversion of a matrix whose determinant is too close to zero.
    #[error("Matrix is singular (determinant {determinant:e})")]
    SingularMatrix {
        /// The determinant that failed the invertibility threshold.
        determinant: f32,
    },

    /// Batch inputs or outputs of different lengths.
    #[error("Batch length mismatch: expected {expected} elements, got {actual}")]
    LengthMismatch {
        /// Length of the primary input.
        expected: usize,
        /// Length of the offending slice.
        actual: usize,
    },

    /// A tier name that does not parse.
    #[error("Invalid SIMD tier '{value}' (expected scalar, sse2, sse4.1 or avx)")]
    InvalidTier {
        /// The rejected input.
        value: String,
    },
}

/// Result type alias for simdgeo operations.
pub type Result<T> = std::result::Result<T, MathError>;

/// Creates a shape mismatch error.
pub fn shape_mismatch(expected: usize, actual: usize) -> MathError {
    MathError::ShapeMismatch { expected, actual }
}

/// Creates a dimension mismatch error.
pub fn dimension_mismatch(left: (usize, usize), right: (usize, usize)) -> MathError {
    MathError::DimensionMismatch { left, right }
}

/// Creates a singular matrix error.
pub fn singular_matrix(determinant: f32) -> MathError {
    MathError::SingularMatrix { determinant }
}

/// Creates a batch length mismatch error.
pub fn length_mismatch(expected: usize, actual: usize) -> MathError {
    MathError::LengthMismatch { expected, actual }
}

/// Checks that a fixed-size literal list has exactly `expected` components.
#[inline]
pub(crate) fn check_shape(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(shape_mismatch(expected, actual))
    }
}
