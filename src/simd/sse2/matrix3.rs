//! SSE2 `Matrix3` kernels. Each padded row is one register; transpose,
//! determinant and inverse stay scalar.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::{
    matrix::Matrix3,
    simd::{kernels::Matrix3Kernels, scalar},
    vector::Vector3,
};

use super::f32x4::{shuffle_mask, F32x4};

pub(crate) const KERNELS: Matrix3Kernels = Matrix3Kernels {
    mul: |a, b| unsafe { mul(a, b) },
    add: |a, b| unsafe { add(a, b) },
    sub: |a, b| unsafe { sub(a, b) },
    scale: |a, s| unsafe { scale(a, s) },
    transform: |a, v| unsafe { transform(a, v) },
    ..scalar::matrix3::KERNELS
};

#[inline(always)]
unsafe fn rows(m: &Matrix3) -> [F32x4; 3] {
    let p = m.as_ptr();
    [
        F32x4::load_aligned(p),
        F32x4::load_aligned(p.add(4)),
        F32x4::load_aligned(p.add(8)),
    ]
}

#[inline(always)]
unsafe fn from_rows(r: [F32x4; 3]) -> Matrix3 {
    let mut out = Matrix3::ZERO;
    let p = out.as_mut_ptr();
    let mask = F32x4::xyz_mask();
    r[0].and(mask).store_aligned(p);
    r[1].and(mask).store_aligned(p.add(4));
    r[2].and(mask).store_aligned(p.add(8));
    out
}

/// Row `i` of the product is `sum_k a[i][k] * b.row(k)`, accumulated in `k` order.
#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn mul(a: &Matrix3, b: &Matrix3) -> Matrix3 {
    let a_rows = rows(a);
    let [b0, b1, b2] = rows(b);
    let row = |r: F32x4| {
        let acc = r.shuffle::<{ shuffle_mask(0, 0, 0, 0) }>() * b0;
        let acc = acc + r.shuffle::<{ shuffle_mask(1, 1, 1, 1) }>() * b1;
        acc + r.shuffle::<{ shuffle_mask(2, 2, 2, 2) }>() * b2
    };
    from_rows([row(a_rows[0]), row(a_rows[1]), row(a_rows[2])])
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn add(a: &Matrix3, b: &Matrix3) -> Matrix3 {
    let (a, b) = (rows(a), rows(b));
    from_rows([a[0] + b[0], a[1] + b[1], a[2] + b[2]])
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn sub(a: &Matrix3, b: &Matrix3) -> Matrix3 {
    let (a, b) = (rows(a), rows(b));
    from_rows([a[0] - b[0], a[1] - b[1], a[2] - b[2]])
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn scale(a: &Matrix3, s: f32) -> Matrix3 {
    let a = rows(a);
    let s = F32x4::splat(s);
    from_rows([a[0] * s, a[1] * s, a[2] * s])
}

/// Row products, transposed so that one vertical add yields every output lane.
#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn transform(a: &Matrix3, v: Vector3) -> Vector3 {
    let [r0, r1, r2] = rows(a);
    let v = F32x4::from_vector3(&v);
    let (mut p0, mut p1, mut p2, mut p3) = (r0 * v, r1 * v, r2 * v, F32x4::zero());
    F32x4::transpose4(&mut p0, &mut p1, &mut p2, &mut p3);
    ((p0 + p1) + p2).to_vector3()
}
