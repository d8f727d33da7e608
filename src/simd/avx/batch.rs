//! AVX batch kernels: two `Vector3`s per 256-bit register.
//!
//! A `Vector3` slice is a dense run of `[x, y, z, 0]` quadruples, so a pair
//! of elements is one unaligned 8-float load. An odd trailing element goes
//! through the SSE2 kernels.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::{
    matrix::Matrix4,
    simd::{kernels::BatchKernels, sse2},
    vector::Vector3,
    EPSILON,
};

use super::broadcast_row;

pub(crate) const KERNELS: BatchKernels = BatchKernels {
    add: |a, b, out| unsafe { add(a, b, out) },
    scale: |a, s, out| unsafe { scale(a, s, out) },
    normalize: |a, out| unsafe { normalize(a, out) },
    dot: |a, b, out| unsafe { dot(a, b, out) },
    transform: |m, points, out| unsafe { transform(m, points, out) },
};

const PAIR: usize = 2;

/// Clears lanes 3 and 7 so the padding of every stored `Vector3` stays zero.
#[inline]
#[target_feature(enable = "avx")]
unsafe fn xyz_mask() -> __m256 {
    _mm256_castsi256_ps(_mm256_setr_epi32(-1, -1, -1, 0, -1, -1, -1, 0))
}

#[inline]
#[target_feature(enable = "avx")]
unsafe fn load_pair(src: &[Vector3], i: usize) -> __m256 {
    _mm256_loadu_ps(src.as_ptr().add(i) as *const f32)
}

#[inline]
#[target_feature(enable = "avx")]
unsafe fn store_pair(dst: &mut [Vector3], i: usize, v: __m256) {
    _mm256_storeu_ps(dst.as_mut_ptr().add(i) as *mut f32, v)
}

#[target_feature(enable = "avx")]
unsafe fn add(a: &[Vector3], b: &[Vector3], out: &mut [Vector3]) {
    let n = a.len().min(b.len()).min(out.len());
    let paired = n - n % PAIR;
    let mask = xyz_mask();
    for i in (0..paired).step_by(PAIR) {
        let sum = _mm256_add_ps(load_pair(a, i), load_pair(b, i));
        store_pair(out, i, _mm256_and_ps(sum, mask));
    }
    (sse2::batch::KERNELS.add)(&a[paired..n], &b[paired..n], &mut out[paired..n]);
}

#[target_feature(enable = "avx")]
unsafe fn scale(a: &[Vector3], s: f32, out: &mut [Vector3]) {
    let n = a.len().min(out.len());
    let paired = n - n % PAIR;
    let factor = _mm256_set1_ps(s);
    let mask = xyz_mask();
    for i in (0..paired).step_by(PAIR) {
        store_pair(out, i, _mm256_and_ps(_mm256_mul_ps(load_pair(a, i), factor), mask));
    }
    (sse2::batch::KERNELS.scale)(&a[paired..n], s, &mut out[paired..n]);
}

#[target_feature(enable = "avx")]
unsafe fn normalize(a: &[Vector3], out: &mut [Vector3]) {
    let n = a.len().min(out.len());
    let paired = n - n % PAIR;
    let epsilon = _mm256_set1_ps(EPSILON);
    let infinity = _mm256_set1_ps(f32::INFINITY);
    let mask = xyz_mask();
    for i in (0..paired).step_by(PAIR) {
        let v = load_pair(a, i);
        // squared length broadcast across each half
        let len = _mm256_sqrt_ps(_mm256_dp_ps(v, v, 0x7F));
        if _mm256_movemask_ps(_mm256_cmp_ps(len, infinity, _CMP_EQ_OQ)) != 0 {
            (sse2::batch::KERNELS.normalize)(&a[i..i + PAIR], &mut out[i..i + PAIR]);
            continue;
        }
        let keep = _mm256_and_ps(_mm256_cmp_ps(len, epsilon, _CMP_GT_OQ), mask);
        store_pair(out, i, _mm256_and_ps(_mm256_div_ps(v, len), keep));
    }
    (sse2::batch::KERNELS.normalize)(&a[paired..n], &mut out[paired..n]);
}

#[target_feature(enable = "avx")]
unsafe fn dot(a: &[Vector3], b: &[Vector3], out: &mut [f32]) {
    let n = a.len().min(b.len()).min(out.len());
    let paired = n - n % PAIR;
    for i in (0..paired).step_by(PAIR) {
        let d = _mm256_dp_ps(load_pair(a, i), load_pair(b, i), 0x71);
        out[i] = _mm_cvtss_f32(_mm256_castps256_ps128(d));
        out[i + 1] = _mm_cvtss_f32(_mm256_extractf128_ps(d, 1));
    }
    (sse2::batch::KERNELS.dot)(&a[paired..n], &b[paired..n], &mut out[paired..n]);
}

#[target_feature(enable = "avx")]
unsafe fn transform(m: &Matrix4, points: &[Vector3], out: &mut [Vector3]) {
    let n = points.len().min(out.len());
    let paired = n - n % PAIR;
    let p = m.as_ptr();
    let r0 = broadcast_row(p);
    let r1 = broadcast_row(p.add(4));
    let r2 = broadcast_row(p.add(8));
    let r3 = broadcast_row(p.add(12));
    let ones = _mm256_set1_ps(1.0);
    let zero = _mm256_setzero_ps();
    let mask = xyz_mask();
    for i in (0..paired).step_by(PAIR) {
        // w = 1 in lanes 3 and 7
        let v = _mm256_blend_ps(load_pair(points, i), ones, 0b1000_1000);
        let x = _mm256_dp_ps(r0, v, 0xF1);
        let y = _mm256_dp_ps(r1, v, 0xF2);
        let z = _mm256_dp_ps(r2, v, 0xF4);
        let w = _mm256_dp_ps(r3, v, 0xF8);
        let xyzw = _mm256_add_ps(_mm256_add_ps(x, y), _mm256_add_ps(z, w));

        let w = _mm256_permute_ps(xyzw, 0xFF);
        let divisible = _mm256_cmp_ps(w, zero, _CMP_NEQ_UQ);
        let projected = _mm256_blendv_ps(xyzw, _mm256_div_ps(xyzw, w), divisible);
        store_pair(out, i, _mm256_and_ps(projected, mask));
    }
    (sse2::batch::KERNELS.transform)(m, &points[paired..n], &mut out[paired..n]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::scalar::batch as reference;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn random_vectors(rng: &mut StdRng, n: usize) -> Vec<Vector3> {
        (0..n)
            .map(|_| {
                Vector3::new(
                    rng.random_range(-10.0..10.0),
                    rng.random_range(-10.0..10.0),
                    rng.random_range(-10.0..10.0),
                )
            })
            .collect()
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() <= 1e-5 * a.abs().max(b.abs()).max(1.0)
    }

    fn assert_vectors_close(actual: &[Vector3], expected: &[Vector3]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            for k in 0..3 {
                assert!(close(a[k], e[k]), "{a} vs {e}");
            }
        }
    }

    #[test]
    fn test_kernels_match_scalar_for_odd_and_even_lengths() {
        if !is_x86_feature_detected!("avx") {
            return;
        }
        let mut rng = StdRng::seed_from_u64(7);
        for n in [0, 1, 2, 3, 8, 17] {
            let a = random_vectors(&mut rng, n);
            let b = random_vectors(&mut rng, n);
            let m = Matrix4::perspective(1.0, 1.3, 0.1, 100.0)
                * Matrix4::translation(Vector3::new(1.0, -2.0, -20.0));

            let mut got = vec![Vector3::ZERO; n];
            let mut want = vec![Vector3::ZERO; n];

            (KERNELS.add)(&a, &b, &mut got);
            reference::add(&a, &b, &mut want);
            assert_vectors_close(&got, &want);

            (KERNELS.scale)(&a, -0.75, &mut got);
            reference::scale(&a, -0.75, &mut want);
            assert_vectors_close(&got, &want);

            (KERNELS.normalize)(&a, &mut got);
            reference::normalize(&a, &mut want);
            assert_vectors_close(&got, &want);

            (KERNELS.transform)(&m, &a, &mut got);
            reference::transform(&m, &a, &mut want);
            assert_vectors_close(&got, &want);

            let mut got = vec![0.0; n];
            let mut want = vec![0.0; n];
            (KERNELS.dot)(&a, &b, &mut got);
            reference::dot(&a, &b, &mut want);
            for (g, w) in got.iter().zip(&want) {
                assert!((g - w).abs() <= 1e-3, "{g} vs {w}");
            }
        }
    }

    #[test]
    fn test_normalize_zero_vector_stays_zero() {
        if !is_x86_feature_detected!("avx") {
            return;
        }
        let a = [Vector3::ZERO, Vector3::new(0.0, 3.0, 4.0)];
        let mut out = [Vector3::ONE; 2];
        (KERNELS.normalize)(&a, &mut out);
        assert_eq!(out[0], Vector3::ZERO);
        assert_eq!(out[1], Vector3::new(0.0, 0.6, 0.8));
    }

    #[test]
    fn test_mismatched_lengths_process_common_prefix() {
        if !is_x86_feature_detected!("avx") {
            return;
        }
        let a = [Vector3::ONE; 5];
        let b = [Vector3::UP; 3];
        let mut out = [Vector3::ZERO; 4];
        (KERNELS.add)(&a, &b, &mut out);
        assert_eq!(out[2], Vector3::new(1.0, 2.0, 1.0));
        assert_eq!(out[3], Vector3::ZERO);
    }
}
