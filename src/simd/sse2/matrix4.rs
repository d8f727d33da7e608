//! SSE2 `Matrix4` kernels, one register per row.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::{
    matrix::Matrix4,
    simd::{kernels::Matrix4Kernels, scalar},
    vector::{Vector3, Vector4},
};

use super::f32x4::{shuffle_mask, F32x4};

pub(crate) const KERNELS: Matrix4Kernels = Matrix4Kernels {
    mul: |a, b| unsafe { mul(a, b) },
    add: |a, b| unsafe { add(a, b) },
    sub: |a, b| unsafe { sub(a, b) },
    scale: |a, s| unsafe { scale(a, s) },
    transpose: |a| unsafe { transpose(a) },
    transform_point: |a, p| unsafe { transform_point(a, p) },
    transform_vector: |a, v| unsafe { transform_vector(a, v) },
    transform_vector4: |a, v| unsafe { transform_vector4(a, v) },
    ..scalar::matrix4::KERNELS
};

#[inline(always)]
pub(crate) unsafe fn rows(m: &Matrix4) -> [F32x4; 4] {
    let p = m.as_ptr();
    [
        F32x4::load_aligned(p),
        F32x4::load_aligned(p.add(4)),
        F32x4::load_aligned(p.add(8)),
        F32x4::load_aligned(p.add(12)),
    ]
}

#[inline(always)]
pub(crate) unsafe fn from_rows(r: [F32x4; 4]) -> Matrix4 {
    let mut out = Matrix4::ZERO;
    let p = out.as_mut_ptr();
    r[0].store_aligned(p);
    r[1].store_aligned(p.add(4));
    r[2].store_aligned(p.add(8));
    r[3].store_aligned(p.add(12));
    out
}

/// Perspective divide on the packed `[x, y, z, w]` result.
#[inline(always)]
pub(crate) fn project(xyzw: F32x4) -> Vector3 {
    let w = xyzw.shuffle::<{ shuffle_mask(3, 3, 3, 3) }>();
    if w.first() != 0.0 {
        (xyzw / w).to_vector3()
    } else {
        xyzw.to_vector3()
    }
}

#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn mul(a: &Matrix4, b: &Matrix4) -> Matrix4 {
    let a_rows = rows(a);
    let [b0, b1, b2, b3] = rows(b);
    let row = |r: F32x4| {
        let acc = r.shuffle::<{ shuffle_mask(0, 0, 0, 0) }>() * b0;
        let acc = acc + r.shuffle::<{ shuffle_mask(1, 1, 1, 1) }>() * b1;
        let acc = acc + r.shuffle::<{ shuffle_mask(2, 2, 2, 2) }>() * b2;
        acc + r.shuffle::<{ shuffle_mask(3, 3, 3, 3) }>() * b3
    };
    from_rows([
        row(a_rows[0]),
        row(a_rows[1]),
        row(a_rows[2]),
        row(a_rows[3]),
    ])
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn add(a: &Matrix4, b: &Matrix4) -> Matrix4 {
    let (a, b) = (rows(a), rows(b));
    from_rows([a[0] + b[0], a[1] + b[1], a[2] + b[2], a[3] + b[3]])
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn sub(a: &Matrix4, b: &Matrix4) -> Matrix4 {
    let (a, b) = (rows(a), rows(b));
    from_rows([a[0] - b[0], a[1] - b[1], a[2] - b[2], a[3] - b[3]])
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn scale(a: &Matrix4, s: f32) -> Matrix4 {
    let a = rows(a);
    let s = F32x4::splat(s);
    from_rows([a[0] * s, a[1] * s, a[2] * s, a[3] * s])
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn transpose(a: &Matrix4) -> Matrix4 {
    let [mut r0, mut r1, mut r2, mut r3] = rows(a);
    F32x4::transpose4(&mut r0, &mut r1, &mut r2, &mut r3);
    from_rows([r0, r1, r2, r3])
}

/// `M * v` for a packed column `v`: row products transposed, then summed
/// vertically in column order.
#[inline(always)]
unsafe fn transform_lanes(a: &Matrix4, v: F32x4) -> F32x4 {
    let [r0, r1, r2, r3] = rows(a);
    let (mut p0, mut p1, mut p2, mut p3) = (r0 * v, r1 * v, r2 * v, r3 * v);
    F32x4::transpose4(&mut p0, &mut p1, &mut p2, &mut p3);
    ((p0 + p1) + p2) + p3
}

#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn transform_point(a: &Matrix4, p: Vector3) -> Vector3 {
    project(transform_lanes(a, F32x4::new(p.x, p.y, p.z, 1.0)))
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn transform_vector(a: &Matrix4, v: Vector3) -> Vector3 {
    // the pad lane is zero, which is exactly w = 0
    transform_lanes(a, F32x4::from_vector3(&v)).to_vector3()
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn transform_vector4(a: &Matrix4, v: Vector4) -> Vector4 {
    let lanes = transform_lanes(a, F32x4::load_aligned(&v as *const Vector4 as *const f32));
    Vector4::from(lanes.to_array())
}
