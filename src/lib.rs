//! Real-time vector, matrix and quaternion math with runtime SIMD dispatch.
//!
//! Performance-critical types ([`Vector3`], [`Matrix3`], [`Matrix4`],
//! [`Quaternion`] and the [`batch`] operators) forward their arithmetic
//! through kernel tables. Every table starts bound to the portable scalar
//! tier; [`initialize`] detects the CPU once and rebinds them to the fastest
//! supported tier (SSE2, SSE4.1 or AVX).
//!
//! ```
//! use std::f32::consts::FRAC_PI_2;
//!
//! use simdgeo::{Matrix4, Quaternion, Vector3};
//!
//! simdgeo::initialize();
//!
//! let rotation = Quaternion::from_axis_angle(Vector3::UP, FRAC_PI_2);
//! let model = Matrix4::trs(Vector3::new(1.0, 0.0, 0.0), rotation, Vector3::ONE);
//! let p = model.transform_point(Vector3::new(1.0, 0.0, 0.0));
//! assert_eq!(p, Vector3::new(1.0, 0.0, -1.0));
//! ```
//!
//! Setting `SIMDGEO_MAX_TIER` (`scalar`, `sse2`, `sse4.1`, `avx`) caps the
//! tier chosen by [`initialize`].

pub mod batch;
pub mod error;
pub mod matrix;
pub mod quaternion;
pub mod simd;
pub mod vector;

pub use error::{MathError, Result};
pub use matrix::{Matrix2, Matrix3, Matrix4, MatrixMN};
pub use quaternion::Quaternion;
pub use simd::traits;
pub use simd::{
    active_tier, initialize, initialize_with, is_initialized, BatchOps, CpuFeatures, Dispatch,
    DispatchConfig, Tier,
};
pub use vector::{Vector2, Vector3, Vector4};

/// Threshold below which a length or divisor is treated as zero.
pub const EPSILON: f32 = 1e-6;

/// Per-component tolerance used by `==` on vectors, matrices and quaternions.
pub const COMPARE_EPSILON: f32 = 1e-5;

/// A matrix is invertible when `|det|` exceeds this.
pub const DETERMINANT_EPSILON: f32 = 1e-7;

/// Minimum slice length for the `par_*` batch operators to split work across
/// the rayon pool. Shorter inputs run on the calling thread.
pub const PARALLEL_BATCH_THRESHOLD: usize = 16_384;

/// Elements handed to each rayon task by the `par_*` batch operators.
pub const PARALLEL_CHUNK_SIZE: usize = 4_096;
