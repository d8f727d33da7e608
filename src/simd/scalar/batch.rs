//! Per-element batch loops over the scalar kernels.

use crate::{matrix::Matrix4, simd::kernels::BatchKernels, vector::Vector3};

use super::{matrix4, vector3};

pub(crate) const KERNELS: BatchKernels = BatchKernels {
    add,
    scale,
    normalize,
    dot,
    transform,
};

pub(crate) fn add(a: &[Vector3], b: &[Vector3], out: &mut [Vector3]) {
    for ((o, x), y) in out.iter_mut().zip(a).zip(b) {
        *o = vector3::add(*x, *y);
    }
}

pub(crate) fn scale(a: &[Vector3], s: f32, out: &mut [Vector3]) {
    for (o, x) in out.iter_mut().zip(a) {
        *o = vector3::scale(*x, s);
    }
}

pub(crate) fn normalize(a: &[Vector3], out: &mut [Vector3]) {
    for (o, x) in out.iter_mut().zip(a) {
        *o = vector3::normalize(*x);
    }
}

pub(crate) fn dot(a: &[Vector3], b: &[Vector3], out: &mut [f32]) {
    for ((o, x), y) in out.iter_mut().zip(a).zip(b) {
        *o = vector3::dot(*x, *y);
    }
}

pub(crate) fn transform(m: &Matrix4, points: &[Vector3], out: &mut [Vector3]) {
    for (o, p) in out.iter_mut().zip(points) {
        *o = matrix4::transform_point(m, *p);
    }
}
