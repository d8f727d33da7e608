//! SSE4.1 `Matrix3` transform; everything else is SSE2.

use crate::{
    matrix::Matrix3,
    simd::{kernels::Matrix3Kernels, sse2},
    vector::Vector3,
};

use super::{dp, F32x4};

pub(crate) const KERNELS: Matrix3Kernels = Matrix3Kernels {
    transform: |a, v| unsafe { transform(a, v) },
    ..sse2::matrix3::KERNELS
};

/// Each row's dot product lands in its own output lane, so the three partial
/// results combine with plain adds.
#[inline]
#[target_feature(enable = "sse4.1")]
unsafe fn transform(a: &Matrix3, v: Vector3) -> Vector3 {
    let p = a.as_ptr();
    let v = F32x4::from_vector3(&v);
    let x = dp::<0x71>(F32x4::load_aligned(p), v);
    let y = dp::<0x72>(F32x4::load_aligned(p.add(4)), v);
    let z = dp::<0x74>(F32x4::load_aligned(p.add(8)), v);
    (x + y + z).to_vector3()
}
