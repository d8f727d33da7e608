//! SSE2 `Vector3` kernels. Rounding has no SSE2 instruction and falls back
//! to the scalar slots.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::{
    simd::{kernels::Vector3Kernels, scalar},
    vector::Vector3,
    EPSILON,
};

use super::f32x4::{shuffle_mask, F32x4};

pub(crate) const KERNELS: Vector3Kernels = Vector3Kernels {
    add: |a, b| unsafe { add(a, b) },
    sub: |a, b| unsafe { sub(a, b) },
    neg: |a| unsafe { neg(a) },
    mul: |a, b| unsafe { mul(a, b) },
    scale: |a, s| unsafe { scale(a, s) },
    div: |a, s| unsafe { div(a, s) },
    dot: |a, b| unsafe { dot(a, b) },
    cross: |a, b| unsafe { cross(a, b) },
    length: |a| unsafe { length(a) },
    length_squared: |a| unsafe { dot(a, a) },
    distance: |a, b| unsafe { length(sub(a, b)) },
    distance_squared: |a, b| unsafe { distance_squared(a, b) },
    normalize: |a| unsafe { normalize(a) },
    min: |a, b| unsafe { min(a, b) },
    max: |a, b| unsafe { max(a, b) },
    abs: |a| unsafe { abs(a) },
    ..scalar::vector3::KERNELS
};

#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn add(a: Vector3, b: Vector3) -> Vector3 {
    (F32x4::from_vector3(&a) + F32x4::from_vector3(&b)).to_vector3()
}

#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn sub(a: Vector3, b: Vector3) -> Vector3 {
    (F32x4::from_vector3(&a) - F32x4::from_vector3(&b)).to_vector3()
}

#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn neg(a: Vector3) -> Vector3 {
    (-F32x4::from_vector3(&a)).to_vector3()
}

#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn mul(a: Vector3, b: Vector3) -> Vector3 {
    (F32x4::from_vector3(&a) * F32x4::from_vector3(&b)).to_vector3()
}

#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn scale(a: Vector3, s: f32) -> Vector3 {
    (F32x4::from_vector3(&a) * F32x4::splat(s)).to_vector3()
}

#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn div(a: Vector3, s: f32) -> Vector3 {
    if s.abs() <= EPSILON {
        return Vector3::ZERO;
    }
    (F32x4::from_vector3(&a) / F32x4::splat(s)).to_vector3()
}

#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn dot(a: Vector3, b: Vector3) -> f32 {
    (F32x4::from_vector3(&a) * F32x4::from_vector3(&b)).hsum3()
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn length(a: Vector3) -> f32 {
    dot(a, a).sqrt()
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn distance_squared(a: Vector3, b: Vector3) -> f32 {
    let d = sub(a, b);
    dot(d, d)
}

/// `a * b.yzx - a.yzx * b`, rotated back to `xyz` order.
#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn cross(a: Vector3, b: Vector3) -> Vector3 {
    let a = F32x4::from_vector3(&a);
    let b = F32x4::from_vector3(&b);
    let a_yzx = a.shuffle::<{ shuffle_mask(3, 0, 2, 1) }>();
    let b_yzx = b.shuffle::<{ shuffle_mask(3, 0, 2, 1) }>();
    let c = a * b_yzx - a_yzx * b;
    c.shuffle::<{ shuffle_mask(3, 0, 2, 1) }>().to_vector3()
}

#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn normalize(a: Vector3) -> Vector3 {
    let v = F32x4::from_vector3(&a);
    let len = (v * v).hsum3().sqrt();
    if len <= EPSILON {
        return Vector3::ZERO;
    }
    if len == f32::INFINITY {
        return scalar::vector3::normalize_overflowing(a);
    }
    (v / F32x4::splat(len)).to_vector3()
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn min(a: Vector3, b: Vector3) -> Vector3 {
    F32x4::from_vector3(&a).min(F32x4::from_vector3(&b)).to_vector3()
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn max(a: Vector3, b: Vector3) -> Vector3 {
    F32x4::from_vector3(&a).max(F32x4::from_vector3(&b)).to_vector3()
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn abs(a: Vector3) -> Vector3 {
    F32x4::from_vector3(&a).abs().to_vector3()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::scalar::vector3 as reference;

    fn sse2_available() -> bool {
        is_x86_feature_detected!("sse2")
    }

    #[test]
    fn test_cross_matches_scalar() {
        if !sse2_available() {
            return;
        }
        let a = Vector3::new(1.0, -2.0, 3.5);
        let b = Vector3::new(0.25, 4.0, -1.0);
        assert_eq!((KERNELS.cross)(a, b), reference::cross(a, b));
        assert_eq!((KERNELS.cross)(Vector3::RIGHT, Vector3::UP), Vector3::FORWARD);
    }

    #[test]
    fn test_dot_is_bit_exact() {
        if !sse2_available() {
            return;
        }
        let a = Vector3::new(0.1, 0.2, 0.3);
        let b = Vector3::new(1.7, -2.9, 3.3);
        assert_eq!((KERNELS.dot)(a, b).to_bits(), reference::dot(a, b).to_bits());
    }

    #[test]
    fn test_degenerate_inputs() {
        if !sse2_available() {
            return;
        }
        assert_eq!((KERNELS.normalize)(Vector3::ZERO), Vector3::ZERO);
        assert_eq!((KERNELS.div)(Vector3::ONE, 0.0), Vector3::ZERO);
    }

    #[test]
    fn test_results_keep_pad_zero() {
        if !sse2_available() {
            return;
        }
        let v = (KERNELS.normalize)(Vector3::new(3.0, 0.0, 4.0));
        assert_eq!(F32x4::from_vector3(&v).to_array(), [0.6, 0.0, 0.8, 0.0]);
        let n = (KERNELS.neg)(Vector3::ONE);
        assert_eq!(F32x4::from_vector3(&n).to_array()[3].to_bits(), 0);
    }

    #[test]
    fn test_abs_min_max() {
        if !sse2_available() {
            return;
        }
        let a = Vector3::new(-1.0, 2.0, -3.0);
        let b = Vector3::new(0.0, 1.0, 5.0);
        assert_eq!((KERNELS.abs)(a), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!((KERNELS.min)(a, b), Vector3::new(-1.0, 1.0, -3.0));
        assert_eq!((KERNELS.max)(a, b), Vector3::new(0.0, 2.0, 5.0));
    }

    #[test]
    fn test_rounding_uses_scalar_slots() {
        let v = Vector3::new(-2.5, 0.5, 1.49);
        assert_eq!((KERNELS.round)(v), reference::round(v));
        assert_eq!((KERNELS.floor)(v), reference::floor(v));
    }
}
