//! SSE4.1 tier: `dpps` dot products and native rounding on top of the SSE2 kernels.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::sse2::f32x4::F32x4;

pub(crate) mod matrix3;
pub(crate) mod matrix4;
pub(crate) mod quaternion;
pub(crate) mod vector3;

/// Masked dot product: `IMM` high nibble selects the multiplied lanes, low
/// nibble the lanes that receive the sum (the rest are zeroed).
#[inline]
#[target_feature(enable = "sse4.1")]
pub(crate) unsafe fn dp<const IMM: i32>(a: F32x4, b: F32x4) -> F32x4 {
    F32x4::from_raw(_mm_dp_ps(a.elements, b.elements, IMM))
}
