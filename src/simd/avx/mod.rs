//! AVX tier: 256-bit `Matrix4` arithmetic and two-`Vector3`-per-register batches.
//!
//! Vector3, Matrix3 and Quaternion tables are the SSE4.1 ones; a single value
//! of those types fits in 128 bits. `__m256` values never cross a function
//! boundary that lacks `#[target_feature(enable = "avx")]`.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

pub(crate) mod batch;
pub(crate) mod matrix4;

/// Loads four floats (16-byte aligned) into both halves of a 256-bit register.
///
/// # Safety
///
/// `ptr` must be valid for reading 4 floats and aligned to 16 bytes.
#[inline]
#[target_feature(enable = "avx")]
pub(crate) unsafe fn broadcast_row(ptr: *const f32) -> __m256 {
    let row = _mm_load_ps(ptr);
    _mm256_insertf128_ps(_mm256_castps128_ps256(row), row, 1)
}
