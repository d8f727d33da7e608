//! Portable `Matrix4` kernels, including the cofactor inverse every tier delegates to.

use crate::{
    error::{singular_matrix, Result},
    matrix::Matrix4,
    simd::kernels::Matrix4Kernels,
    vector::{Vector3, Vector4},
    DETERMINANT_EPSILON,
};

pub(crate) const KERNELS: Matrix4Kernels = Matrix4Kernels {
    mul,
    add,
    sub,
    scale,
    transpose,
    determinant,
    inverse,
    transform_point,
    transform_vector,
    transform_vector4,
};

fn from_fn(f: impl Fn(usize, usize) -> f32) -> Matrix4 {
    let mut out = Matrix4::ZERO;
    for i in 0..4 {
        for j in 0..4 {
            out.set(i, j, f(i, j));
        }
    }
    out
}

pub(crate) fn mul(a: &Matrix4, b: &Matrix4) -> Matrix4 {
    from_fn(|i, j| {
        ((a.get(i, 0) * b.get(0, j) + a.get(i, 1) * b.get(1, j)) + a.get(i, 2) * b.get(2, j))
            + a.get(i, 3) * b.get(3, j)
    })
}

pub(crate) fn add(a: &Matrix4, b: &Matrix4) -> Matrix4 {
    from_fn(|i, j| a.get(i, j) + b.get(i, j))
}

pub(crate) fn sub(a: &Matrix4, b: &Matrix4) -> Matrix4 {
    from_fn(|i, j| a.get(i, j) - b.get(i, j))
}

pub(crate) fn scale(a: &Matrix4, s: f32) -> Matrix4 {
    from_fn(|i, j| a.get(i, j) * s)
}

pub(crate) fn transpose(a: &Matrix4) -> Matrix4 {
    from_fn(|i, j| a.get(j, i))
}

/// 2x2 sub-determinants of the top two rows (`s`) and bottom two rows (`c`).
fn sub_determinants(m: &[f32; 16]) -> ([f32; 6], [f32; 6]) {
    let s = [
        m[0] * m[5] - m[4] * m[1],
        m[0] * m[6] - m[4] * m[2],
        m[0] * m[7] - m[4] * m[3],
        m[1] * m[6] - m[5] * m[2],
        m[1] * m[7] - m[5] * m[3],
        m[2] * m[7] - m[6] * m[3],
    ];
    let c = [
        m[8] * m[13] - m[12] * m[9],
        m[8] * m[14] - m[12] * m[10],
        m[8] * m[15] - m[12] * m[11],
        m[9] * m[14] - m[13] * m[10],
        m[9] * m[15] - m[13] * m[11],
        m[10] * m[15] - m[14] * m[11],
    ];
    (s, c)
}

fn det_from(s: &[f32; 6], c: &[f32; 6]) -> f32 {
    s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0]
}

pub(crate) fn determinant(a: &Matrix4) -> f32 {
    let (s, c) = sub_determinants(a.as_array());
    det_from(&s, &c)
}

pub(crate) fn inverse(a: &Matrix4) -> Result<Matrix4> {
    let m = a.as_array();
    let (s, c) = sub_determinants(m);
    let det = det_from(&s, &c);
    if det.abs() <= DETERMINANT_EPSILON {
        return Err(singular_matrix(det));
    }
    let inv = 1.0 / det;

    Ok(Matrix4::from_array([
        (m[5] * c[5] - m[6] * c[4] + m[7] * c[3]) * inv,
        (-m[1] * c[5] + m[2] * c[4] - m[3] * c[3]) * inv,
        (m[13] * s[5] - m[14] * s[4] + m[15] * s[3]) * inv,
        (-m[9] * s[5] + m[10] * s[4] - m[11] * s[3]) * inv,
        //
        (-m[4] * c[5] + m[6] * c[2] - m[7] * c[1]) * inv,
        (m[0] * c[5] - m[2] * c[2] + m[3] * c[1]) * inv,
        (-m[12] * s[5] + m[14] * s[2] - m[15] * s[1]) * inv,
        (m[8] * s[5] - m[10] * s[2] + m[11] * s[1]) * inv,
        //
        (m[4] * c[4] - m[5] * c[2] + m[7] * c[0]) * inv,
        (-m[0] * c[4] + m[1] * c[2] - m[3] * c[0]) * inv,
        (m[12] * s[4] - m[13] * s[2] + m[15] * s[0]) * inv,
        (-m[8] * s[4] + m[9] * s[2] - m[11] * s[0]) * inv,
        //
        (-m[4] * c[3] + m[5] * c[1] - m[6] * c[0]) * inv,
        (m[0] * c[3] - m[1] * c[1] + m[2] * c[0]) * inv,
        (-m[12] * s[3] + m[13] * s[1] - m[14] * s[0]) * inv,
        (m[8] * s[3] - m[9] * s[1] + m[10] * s[0]) * inv,
    ]))
}

#[inline]
fn row_dot(a: &Matrix4, i: usize, x: f32, y: f32, z: f32, w: f32) -> f32 {
    ((a.get(i, 0) * x + a.get(i, 1) * y) + a.get(i, 2) * z) + a.get(i, 3) * w
}

pub(crate) fn transform_point(a: &Matrix4, p: Vector3) -> Vector3 {
    let x = row_dot(a, 0, p.x, p.y, p.z, 1.0);
    let y = row_dot(a, 1, p.x, p.y, p.z, 1.0);
    let z = row_dot(a, 2, p.x, p.y, p.z, 1.0);
    let w = row_dot(a, 3, p.x, p.y, p.z, 1.0);
    if w != 0.0 {
        Vector3::new(x / w, y / w, z / w)
    } else {
        Vector3::new(x, y, z)
    }
}

pub(crate) fn transform_vector(a: &Matrix4, v: Vector3) -> Vector3 {
    Vector3::new(
        row_dot(a, 0, v.x, v.y, v.z, 0.0),
        row_dot(a, 1, v.x, v.y, v.z, 0.0),
        row_dot(a, 2, v.x, v.y, v.z, 0.0),
    )
}

pub(crate) fn transform_vector4(a: &Matrix4, v: Vector4) -> Vector4 {
    Vector4::new(
        row_dot(a, 0, v.x, v.y, v.z, v.w),
        row_dot(a, 1, v.x, v.y, v.z, v.w),
        row_dot(a, 2, v.x, v.y, v.z, v.w),
        row_dot(a, 3, v.x, v.y, v.z, v.w),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Matrix4 {
        Matrix4::from_rows([
            [1.0, 2.0, 0.0, 1.0],
            [0.0, 1.0, 3.0, -2.0],
            [2.0, 0.0, 1.0, 0.5],
            [1.0, 1.0, -1.0, 2.0],
        ])
    }

    #[test]
    fn test_inverse_against_identity() {
        let m = sample();
        let inv = inverse(&m).unwrap();
        assert_eq!(mul(&m, &inv), Matrix4::IDENTITY);
        assert_eq!(mul(&inv, &m), Matrix4::IDENTITY);
    }

    #[test]
    fn test_determinant_of_transpose() {
        let m = sample();
        assert!((determinant(&m) - determinant(&transpose(&m))).abs() < 1e-4);
    }

    #[test]
    fn test_homogeneous_divide() {
        let m = scale(&Matrix4::IDENTITY, 2.0);
        // w' = 2, so the point comes back unchanged
        let p = Vector3::new(1.0, -2.0, 3.0);
        assert_eq!(transform_point(&m, p), p);
        assert_eq!(transform_vector(&m, p), p * 2.0);
    }
}
