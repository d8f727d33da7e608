//! SSE2 `Quaternion` kernels.
//!
//! The Hamilton product broadcasts each component of the left operand and
//! multiplies it by a lane-permuted, sign-flipped copy of the right operand.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::{quaternion::Quaternion, simd::kernels::QuaternionKernels, EPSILON};

use super::f32x4::{shuffle_mask, F32x4};

pub(crate) const KERNELS: QuaternionKernels = QuaternionKernels {
    add: |a, b| unsafe { add(a, b) },
    sub: |a, b| unsafe { sub(a, b) },
    mul: |a, b| unsafe { mul(a, b) },
    scale: |a, s| unsafe { scale(a, s) },
    dot: |a, b| unsafe { dot(a, b) },
    length: |a| unsafe { dot(a, a).sqrt() },
    length_squared: |a| unsafe { dot(a, a) },
    normalize: |a| unsafe { normalize(a) },
};

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn add(a: Quaternion, b: Quaternion) -> Quaternion {
    (F32x4::from_quaternion(&a) + F32x4::from_quaternion(&b)).to_quaternion()
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn sub(a: Quaternion, b: Quaternion) -> Quaternion {
    (F32x4::from_quaternion(&a) - F32x4::from_quaternion(&b)).to_quaternion()
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn scale(a: Quaternion, s: f32) -> Quaternion {
    (F32x4::from_quaternion(&a) * F32x4::splat(s)).to_quaternion()
}

#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn mul(a: Quaternion, b: Quaternion) -> Quaternion {
    let a = F32x4::from_quaternion(&a);
    let b = F32x4::from_quaternion(&b);

    let aw = a.shuffle::<{ shuffle_mask(3, 3, 3, 3) }>();
    let ax = a.shuffle::<{ shuffle_mask(0, 0, 0, 0) }>();
    let ay = a.shuffle::<{ shuffle_mask(1, 1, 1, 1) }>();
    let az = a.shuffle::<{ shuffle_mask(2, 2, 2, 2) }>();

    // [bw, bz, by, bx] * [+, -, +, -]
    let t1 = b
        .shuffle::<{ shuffle_mask(0, 1, 2, 3) }>()
        .xor(F32x4::new(0.0, -0.0, 0.0, -0.0));
    // [bz, bw, bx, by] * [+, +, -, -]
    let t2 = b
        .shuffle::<{ shuffle_mask(1, 0, 3, 2) }>()
        .xor(F32x4::new(0.0, 0.0, -0.0, -0.0));
    // [by, bx, bw, bz] * [-, +, +, -]
    let t3 = b
        .shuffle::<{ shuffle_mask(2, 3, 0, 1) }>()
        .xor(F32x4::new(-0.0, 0.0, 0.0, -0.0));

    (((aw * b) + (ax * t1)) + (ay * t2) + (az * t3)).to_quaternion()
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn dot(a: Quaternion, b: Quaternion) -> f32 {
    (F32x4::from_quaternion(&a) * F32x4::from_quaternion(&b)).hsum4()
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn normalize(a: Quaternion) -> Quaternion {
    let q = F32x4::from_quaternion(&a);
    let len = (q * q).hsum4().sqrt();
    if len <= EPSILON {
        return Quaternion::IDENTITY;
    }
    (q / F32x4::splat(len)).to_quaternion()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::scalar::quaternion as reference;

    #[test]
    fn test_hamilton_product_matches_scalar() {
        if !is_x86_feature_detected!("sse2") {
            return;
        }
        let a = Quaternion::new(0.3, -1.2, 0.7, 2.0);
        let b = Quaternion::new(-0.5, 0.4, 1.1, -0.9);
        let simd = (KERNELS.mul)(a, b);
        let scalar = reference::mul(a, b);
        for (s, r) in [(simd.w, scalar.w), (simd.x, scalar.x), (simd.y, scalar.y), (simd.z, scalar.z)] {
            assert_eq!(s.to_bits(), r.to_bits());
        }
    }

    #[test]
    fn test_basic_ops_match_scalar() {
        if !is_x86_feature_detected!("sse2") {
            return;
        }
        let a = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        let b = Quaternion::new(-1.0, 0.5, 0.0, 2.0);
        assert_eq!((KERNELS.add)(a, b), reference::add(a, b));
        assert_eq!((KERNELS.sub)(a, b), reference::sub(a, b));
        assert_eq!((KERNELS.scale)(a, 3.0), reference::scale(a, 3.0));
        assert_eq!((KERNELS.dot)(a, b), reference::dot(a, b));
        assert_eq!((KERNELS.normalize)(a), reference::normalize(a));
        assert_eq!(
            (KERNELS.normalize)(Quaternion::new(0.0, 0.0, 0.0, 0.0)),
            Quaternion::IDENTITY
        );
    }
}
