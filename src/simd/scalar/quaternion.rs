//! Portable quaternion kernels.

use crate::{quaternion::Quaternion, simd::kernels::QuaternionKernels, EPSILON};

pub(crate) const KERNELS: QuaternionKernels = QuaternionKernels {
    add,
    sub,
    mul,
    scale,
    dot,
    length,
    length_squared,
    normalize,
};

pub(crate) fn add(a: Quaternion, b: Quaternion) -> Quaternion {
    Quaternion::new(a.w + b.w, a.x + b.x, a.y + b.y, a.z + b.z)
}

pub(crate) fn sub(a: Quaternion, b: Quaternion) -> Quaternion {
    Quaternion::new(a.w - b.w, a.x - b.x, a.y - b.y, a.z - b.z)
}

/// Hamilton product, summed in the same order as the SIMD tiers.
pub(crate) fn mul(a: Quaternion, b: Quaternion) -> Quaternion {
    Quaternion::new(
        ((a.w * b.w - a.x * b.x) - a.y * b.y) - a.z * b.z,
        ((a.w * b.x + a.x * b.w) + a.y * b.z) - a.z * b.y,
        ((a.w * b.y - a.x * b.z) + a.y * b.w) + a.z * b.x,
        ((a.w * b.z + a.x * b.y) - a.y * b.x) + a.z * b.w,
    )
}

pub(crate) fn scale(a: Quaternion, s: f32) -> Quaternion {
    Quaternion::new(a.w * s, a.x * s, a.y * s, a.z * s)
}

pub(crate) fn dot(a: Quaternion, b: Quaternion) -> f32 {
    ((a.x * b.x + a.y * b.y) + a.z * b.z) + a.w * b.w
}

pub(crate) fn length_squared(a: Quaternion) -> f32 {
    dot(a, a)
}

pub(crate) fn length(a: Quaternion) -> f32 {
    length_squared(a).sqrt()
}

pub(crate) fn normalize(a: Quaternion) -> Quaternion {
    let len = length(a);
    if len <= EPSILON {
        return Quaternion::IDENTITY;
    }
    Quaternion::new(a.w / len, a.x / len, a.y / len, a.z / len)
}
