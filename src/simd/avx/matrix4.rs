//! AVX `Matrix4` kernels; transforms inherit SSE4.1.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::{
    matrix::Matrix4,
    simd::{kernels::Matrix4Kernels, sse41},
};

use super::broadcast_row;

pub(crate) const KERNELS: Matrix4Kernels = Matrix4Kernels {
    mul: |a, b| unsafe { mul(a, b) },
    add: |a, b| unsafe { add(a, b) },
    sub: |a, b| unsafe { sub(a, b) },
    scale: |a, s| unsafe { scale(a, s) },
    ..sse41::matrix4::KERNELS
};

/// Two rows of `a` per register. Each row is multiplied by the matching
/// broadcast element against the rows of `b`, duplicated into both halves.
#[inline]
#[target_feature(enable = "avx")]
pub(crate) unsafe fn mul(a: &Matrix4, b: &Matrix4) -> Matrix4 {
    let ap = a.as_ptr();
    let bp = b.as_ptr();
    let b0 = broadcast_row(bp);
    let b1 = broadcast_row(bp.add(4));
    let b2 = broadcast_row(bp.add(8));
    let b3 = broadcast_row(bp.add(12));

    let mut out = Matrix4::ZERO;
    let op = out.as_mut_ptr();
    for half in 0..2 {
        let rows = _mm256_loadu_ps(ap.add(half * 8));
        let mut acc = _mm256_mul_ps(_mm256_permute_ps(rows, 0x00), b0);
        acc = _mm256_add_ps(acc, _mm256_mul_ps(_mm256_permute_ps(rows, 0x55), b1));
        acc = _mm256_add_ps(acc, _mm256_mul_ps(_mm256_permute_ps(rows, 0xAA), b2));
        acc = _mm256_add_ps(acc, _mm256_mul_ps(_mm256_permute_ps(rows, 0xFF), b3));
        _mm256_storeu_ps(op.add(half * 8), acc);
    }
    out
}

#[inline]
#[target_feature(enable = "avx")]
unsafe fn add(a: &Matrix4, b: &Matrix4) -> Matrix4 {
    let (ap, bp) = (a.as_ptr(), b.as_ptr());
    let mut out = Matrix4::ZERO;
    let op = out.as_mut_ptr();
    for offset in [0, 8] {
        let sum = _mm256_add_ps(_mm256_loadu_ps(ap.add(offset)), _mm256_loadu_ps(bp.add(offset)));
        _mm256_storeu_ps(op.add(offset), sum);
    }
    out
}

#[inline]
#[target_feature(enable = "avx")]
unsafe fn sub(a: &Matrix4, b: &Matrix4) -> Matrix4 {
    let (ap, bp) = (a.as_ptr(), b.as_ptr());
    let mut out = Matrix4::ZERO;
    let op = out.as_mut_ptr();
    for offset in [0, 8] {
        let diff = _mm256_sub_ps(_mm256_loadu_ps(ap.add(offset)), _mm256_loadu_ps(bp.add(offset)));
        _mm256_storeu_ps(op.add(offset), diff);
    }
    out
}

#[inline]
#[target_feature(enable = "avx")]
unsafe fn scale(a: &Matrix4, s: f32) -> Matrix4 {
    let ap = a.as_ptr();
    let s = _mm256_set1_ps(s);
    let mut out = Matrix4::ZERO;
    let op = out.as_mut_ptr();
    for offset in [0, 8] {
        _mm256_storeu_ps(op.add(offset), _mm256_mul_ps(_mm256_loadu_ps(ap.add(offset)), s));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::scalar::matrix4 as reference;

    fn sample(seed: f32) -> Matrix4 {
        let mut m = [0.0f32; 16];
        for (i, v) in m.iter_mut().enumerate() {
            *v = ((i as f32 + seed) * 0.37).sin() * 3.0;
        }
        Matrix4::from_array(m)
    }

    #[test]
    fn test_mul_matches_scalar() {
        if !is_x86_feature_detected!("avx") {
            return;
        }
        let a = sample(1.0);
        let b = sample(7.0);
        let simd = (KERNELS.mul)(&a, &b);
        let scalar = reference::mul(&a, &b);
        // same accumulation order, so bit-identical
        assert_eq!(
            simd.as_array().map(f32::to_bits),
            scalar.as_array().map(f32::to_bits)
        );
    }

    #[test]
    fn test_elementwise_match_scalar() {
        if !is_x86_feature_detected!("avx") {
            return;
        }
        let a = sample(2.0);
        let b = sample(-3.0);
        assert_eq!((KERNELS.add)(&a, &b), reference::add(&a, &b));
        assert_eq!((KERNELS.sub)(&a, &b), reference::sub(&a, &b));
        assert_eq!((KERNELS.scale)(&a, -1.5), reference::scale(&a, -1.5));
    }
}
