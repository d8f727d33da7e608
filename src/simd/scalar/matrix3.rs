//! Portable `Matrix3` kernels, including the cofactor inverse every tier delegates to.

use crate::{
    error::{singular_matrix, Result},
    matrix::Matrix3,
    simd::kernels::Matrix3Kernels,
    vector::Vector3,
    DETERMINANT_EPSILON,
};

pub(crate) const KERNELS: Matrix3Kernels = Matrix3Kernels {
    mul,
    add,
    sub,
    scale,
    transpose,
    determinant,
    inverse,
    transform,
};

fn from_fn(f: impl Fn(usize, usize) -> f32) -> Matrix3 {
    let mut out = Matrix3::ZERO;
    for i in 0..3 {
        for j in 0..3 {
            out.set(i, j, f(i, j));
        }
    }
    out
}

pub(crate) fn mul(a: &Matrix3, b: &Matrix3) -> Matrix3 {
    from_fn(|i, j| {
        (a.get(i, 0) * b.get(0, j) + a.get(i, 1) * b.get(1, j)) + a.get(i, 2) * b.get(2, j)
    })
}

pub(crate) fn add(a: &Matrix3, b: &Matrix3) -> Matrix3 {
    from_fn(|i, j| a.get(i, j) + b.get(i, j))
}

pub(crate) fn sub(a: &Matrix3, b: &Matrix3) -> Matrix3 {
    from_fn(|i, j| a.get(i, j) - b.get(i, j))
}

pub(crate) fn scale(a: &Matrix3, s: f32) -> Matrix3 {
    from_fn(|i, j| a.get(i, j) * s)
}

pub(crate) fn transpose(a: &Matrix3) -> Matrix3 {
    from_fn(|i, j| a.get(j, i))
}

pub(crate) fn determinant(a: &Matrix3) -> f32 {
    let m = a.to_rows();
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1]) - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

pub(crate) fn inverse(a: &Matrix3) -> Result<Matrix3> {
    let det = determinant(a);
    if det.abs() <= DETERMINANT_EPSILON {
        return Err(singular_matrix(det));
    }
    let m = a.to_rows();
    let inv = 1.0 / det;
    Ok(Matrix3::from_rows([
        [
            (m[1][1] * m[2][2] - m[1][2] * m[2][1]) * inv,
            (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv,
            (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv,
        ],
        [
            (m[1][2] * m[2][0] - m[1][0] * m[2][2]) * inv,
            (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv,
            (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * inv,
        ],
        [
            (m[1][0] * m[2][1] - m[1][1] * m[2][0]) * inv,
            (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * inv,
            (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * inv,
        ],
    ]))
}

pub(crate) fn transform(a: &Matrix3, v: Vector3) -> Vector3 {
    let row = |i: usize| (a.get(i, 0) * v.x + a.get(i, 1) * v.y) + a.get(i, 2) * v.z;
    Vector3::new(row(0), row(1), row(2))
}
