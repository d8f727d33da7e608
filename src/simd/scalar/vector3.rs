//! Portable `Vector3` kernels.

use crate::{simd::kernels::Vector3Kernels, vector::Vector3, EPSILON};

pub(crate) const KERNELS: Vector3Kernels = Vector3Kernels {
    add,
    sub,
    neg,
    mul,
    scale,
    div,
    dot,
    cross,
    length,
    length_squared,
    distance,
    distance_squared,
    normalize,
    min,
    max,
    floor,
    ceil,
    round,
    abs,
};

#[inline]
pub(crate) fn add(a: Vector3, b: Vector3) -> Vector3 {
    Vector3::new(a.x + b.x, a.y + b.y, a.z + b.z)
}

#[inline]
pub(crate) fn sub(a: Vector3, b: Vector3) -> Vector3 {
    Vector3::new(a.x - b.x, a.y - b.y, a.z - b.z)
}

#[inline]
pub(crate) fn neg(a: Vector3) -> Vector3 {
    Vector3::new(-a.x, -a.y, -a.z)
}

#[inline]
pub(crate) fn mul(a: Vector3, b: Vector3) -> Vector3 {
    Vector3::new(a.x * b.x, a.y * b.y, a.z * b.z)
}

#[inline]
pub(crate) fn scale(a: Vector3, s: f32) -> Vector3 {
    Vector3::new(a.x * s, a.y * s, a.z * s)
}

#[inline]
pub(crate) fn div(a: Vector3, s: f32) -> Vector3 {
    if s.abs() <= EPSILON {
        return Vector3::ZERO;
    }
    Vector3::new(a.x / s, a.y / s, a.z / s)
}

#[inline]
pub(crate) fn dot(a: Vector3, b: Vector3) -> f32 {
    (a.x * b.x + a.y * b.y) + a.z * b.z
}

#[inline]
pub(crate) fn cross(a: Vector3, b: Vector3) -> Vector3 {
    Vector3::new(
        a.y * b.z - a.z * b.y,
        a.z * b.x - a.x * b.z,
        a.x * b.y - a.y * b.x,
    )
}

#[inline]
pub(crate) fn length_squared(a: Vector3) -> f32 {
    dot(a, a)
}

#[inline]
pub(crate) fn length(a: Vector3) -> f32 {
    length_squared(a).sqrt()
}

#[inline]
pub(crate) fn distance_squared(a: Vector3, b: Vector3) -> f32 {
    length_squared(sub(a, b))
}

#[inline]
pub(crate) fn distance(a: Vector3, b: Vector3) -> f32 {
    length(sub(a, b))
}

#[inline]
pub(crate) fn normalize(a: Vector3) -> Vector3 {
    let len = length(a);
    if len <= EPSILON {
        return Vector3::ZERO;
    }
    if len == f32::INFINITY {
        return normalize_overflowing(a);
    }
    Vector3::new(a.x / len, a.y / len, a.z / len)
}

/// Normalizes a vector whose squared length overflows `f32` by dividing
/// through by its largest component first. Shared by every tier.
#[cold]
pub(crate) fn normalize_overflowing(a: Vector3) -> Vector3 {
    let m = a.x.abs().max(a.y.abs()).max(a.z.abs());
    let s = Vector3::new(a.x / m, a.y / m, a.z / m);
    let len = length(s);
    Vector3::new(s.x / len, s.y / len, s.z / len)
}

#[inline]
pub(crate) fn min(a: Vector3, b: Vector3) -> Vector3 {
    Vector3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z))
}

#[inline]
pub(crate) fn max(a: Vector3, b: Vector3) -> Vector3 {
    Vector3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z))
}

#[inline]
pub(crate) fn floor(a: Vector3) -> Vector3 {
    Vector3::new(a.x.floor(), a.y.floor(), a.z.floor())
}

#[inline]
pub(crate) fn ceil(a: Vector3) -> Vector3 {
    Vector3::new(a.x.ceil(), a.y.ceil(), a.z.ceil())
}

#[inline]
pub(crate) fn round(a: Vector3) -> Vector3 {
    Vector3::new(a.x.round(), a.y.round(), a.z.round())
}

#[inline]
pub(crate) fn abs(a: Vector3) -> Vector3 {
    Vector3::new(a.x.abs(), a.y.abs(), a.z.abs())
}
