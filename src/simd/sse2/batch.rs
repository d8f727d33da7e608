//! SSE2 batch kernels: one `Vector3` per register, no tail handling needed.

use crate::{matrix::Matrix4, simd::kernels::BatchKernels, vector::Vector3};

use super::{f32x4::F32x4, matrix4, vector3};

pub(crate) const KERNELS: BatchKernels = BatchKernels {
    add: |a, b, out| unsafe { add(a, b, out) },
    scale: |a, s, out| unsafe { scale(a, s, out) },
    normalize: |a, out| unsafe { normalize(a, out) },
    dot: |a, b, out| unsafe { dot(a, b, out) },
    transform: |m, points, out| unsafe { transform(m, points, out) },
};

#[target_feature(enable = "sse2")]
unsafe fn add(a: &[Vector3], b: &[Vector3], out: &mut [Vector3]) {
    for ((o, x), y) in out.iter_mut().zip(a).zip(b) {
        *o = vector3::add(*x, *y);
    }
}

#[target_feature(enable = "sse2")]
unsafe fn scale(a: &[Vector3], s: f32, out: &mut [Vector3]) {
    let s = F32x4::splat(s);
    for (o, x) in out.iter_mut().zip(a) {
        *o = (F32x4::from_vector3(x) * s).to_vector3();
    }
}

#[target_feature(enable = "sse2")]
unsafe fn normalize(a: &[Vector3], out: &mut [Vector3]) {
    for (o, x) in out.iter_mut().zip(a) {
        *o = vector3::normalize(*x);
    }
}

#[target_feature(enable = "sse2")]
unsafe fn dot(a: &[Vector3], b: &[Vector3], out: &mut [f32]) {
    for ((o, x), y) in out.iter_mut().zip(a).zip(b) {
        *o = vector3::dot(*x, *y);
    }
}

#[target_feature(enable = "sse2")]
unsafe fn transform(m: &Matrix4, points: &[Vector3], out: &mut [Vector3]) {
    for (o, p) in out.iter_mut().zip(points) {
        *o = matrix4::transform_point(m, *p);
    }
}
