//! SSE4.1 `Matrix4` transforms as four row dot products.

use crate::{
    matrix::Matrix4,
    simd::{kernels::Matrix4Kernels, sse2},
    vector::{Vector3, Vector4},
};

use super::{dp, F32x4};

pub(crate) const KERNELS: Matrix4Kernels = Matrix4Kernels {
    transform_point: |a, p| unsafe { transform_point(a, p) },
    transform_vector: |a, v| unsafe { transform_vector(a, v) },
    transform_vector4: |a, v| unsafe { transform_vector4(a, v) },
    ..sse2::matrix4::KERNELS
};

#[inline]
#[target_feature(enable = "sse4.1")]
unsafe fn row_dots(a: &Matrix4, v: F32x4) -> F32x4 {
    let [r0, r1, r2, r3] = sse2::matrix4::rows(a);
    let x = dp::<0xF1>(r0, v);
    let y = dp::<0xF2>(r1, v);
    let z = dp::<0xF4>(r2, v);
    let w = dp::<0xF8>(r3, v);
    (x + y) + (z + w)
}

#[inline]
#[target_feature(enable = "sse4.1")]
unsafe fn transform_point(a: &Matrix4, p: Vector3) -> Vector3 {
    sse2::matrix4::project(row_dots(a, F32x4::new(p.x, p.y, p.z, 1.0)))
}

#[inline]
#[target_feature(enable = "sse4.1")]
unsafe fn transform_vector(a: &Matrix4, v: Vector3) -> Vector3 {
    row_dots(a, F32x4::from_vector3(&v)).to_vector3()
}

#[inline]
#[target_feature(enable = "sse4.1")]
unsafe fn transform_vector4(a: &Matrix4, v: Vector4) -> Vector4 {
    Vector4::from(row_dots(a, F32x4::new(v.x, v.y, v.z, v.w)).to_array())
}
