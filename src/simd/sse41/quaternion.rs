//! SSE4.1 quaternion dot, length and normalize.

use crate::{
    quaternion::Quaternion,
    simd::{kernels::QuaternionKernels, sse2},
    EPSILON,
};

use super::{dp, F32x4};

pub(crate) const KERNELS: QuaternionKernels = QuaternionKernels {
    dot: |a, b| unsafe { dot(a, b) },
    length: |a| unsafe { dot(a, a).sqrt() },
    length_squared: |a| unsafe { dot(a, a) },
    normalize: |a| unsafe { normalize(a) },
    ..sse2::quaternion::KERNELS
};

#[inline]
#[target_feature(enable = "sse4.1")]
unsafe fn dot(a: Quaternion, b: Quaternion) -> f32 {
    dp::<0xF1>(F32x4::from_quaternion(&a), F32x4::from_quaternion(&b)).first()
}

#[inline]
#[target_feature(enable = "sse4.1")]
unsafe fn normalize(a: Quaternion) -> Quaternion {
    let q = F32x4::from_quaternion(&a);
    let len = dp::<0xFF>(q, q).sqrt();
    if len.first() <= EPSILON {
        return Quaternion::IDENTITY;
    }
    (q / len).to_quaternion()
}
