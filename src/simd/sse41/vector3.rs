//! SSE4.1 `Vector3` kernels: `dpps` lengths and native `floor`/`ceil`/`round`.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::{
    simd::{kernels::Vector3Kernels, scalar, sse2},
    vector::Vector3,
    EPSILON,
};

use super::{dp, F32x4};

pub(crate) const KERNELS: Vector3Kernels = Vector3Kernels {
    dot: |a, b| unsafe { dot(a, b) },
    length: |a| unsafe { dot(a, a).sqrt() },
    length_squared: |a| unsafe { dot(a, a) },
    distance: |a, b| unsafe { distance_squared(a, b).sqrt() },
    distance_squared: |a, b| unsafe { distance_squared(a, b) },
    normalize: |a| unsafe { normalize(a) },
    floor: |a| unsafe { floor(a) },
    ceil: |a| unsafe { ceil(a) },
    round: |a| unsafe { round(a) },
    ..sse2::vector3::KERNELS
};

#[inline]
#[target_feature(enable = "sse4.1")]
unsafe fn dot(a: Vector3, b: Vector3) -> f32 {
    dp::<0x71>(F32x4::from_vector3(&a), F32x4::from_vector3(&b)).first()
}

#[inline]
#[target_feature(enable = "sse4.1")]
unsafe fn distance_squared(a: Vector3, b: Vector3) -> f32 {
    let d = F32x4::from_vector3(&a) - F32x4::from_vector3(&b);
    dp::<0x71>(d, d).first()
}

#[inline]
#[target_feature(enable = "sse4.1")]
unsafe fn normalize(a: Vector3) -> Vector3 {
    let v = F32x4::from_vector3(&a);
    let len = dp::<0x7F>(v, v).sqrt();
    if len.first() <= EPSILON {
        return Vector3::ZERO;
    }
    if len.first() == f32::INFINITY {
        return scalar::vector3::normalize_overflowing(a);
    }
    (v / len).to_vector3()
}

#[inline]
#[target_feature(enable = "sse4.1")]
unsafe fn floor(a: Vector3) -> Vector3 {
    F32x4::from_raw(_mm_floor_ps(F32x4::from_vector3(&a).elements)).to_vector3()
}

#[inline]
#[target_feature(enable = "sse4.1")]
unsafe fn ceil(a: Vector3) -> Vector3 {
    F32x4::from_raw(_mm_ceil_ps(F32x4::from_vector3(&a).elements)).to_vector3()
}

/// Half away from zero: truncate, then step one unit outward when the
/// discarded fraction is at least one half.
#[inline]
#[target_feature(enable = "sse4.1")]
unsafe fn round(a: Vector3) -> Vector3 {
    let x = F32x4::from_vector3(&a);
    let truncated = F32x4::from_raw(_mm_round_ps(
        x.elements,
        _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC,
    ));
    let half_or_more = (x - truncated).abs().cmp_ge(F32x4::splat(0.5));
    let step = F32x4::splat(1.0).or(x.and(F32x4::sign_mask()));
    (truncated + half_or_more.and(step)).to_vector3()
}
