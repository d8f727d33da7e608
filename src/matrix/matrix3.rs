use std::fmt;
use std::ops::{Add, Index, Mul, Sub};

use crate::{
    error::{check_shape, Result},
    quaternion::Quaternion,
    simd::dispatch,
    vector::Vector3,
    COMPARE_EPSILON, DETERMINANT_EPSILON,
};

/// 3x3 matrix whose rows are padded to four lanes.
///
/// Each row occupies 16 bytes so it can be loaded as one SIMD register; the
/// padding lane is always zero. Same conventions as [`super::Matrix4`].
#[repr(C, align(16))]
#[derive(Clone, Copy)]
pub struct Matrix3 {
    m: [f32; 12],
}

impl Matrix3 {
    pub const ZERO: Self = Self { m: [0.0; 12] };
    pub const IDENTITY: Self = Self::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);

    pub const fn from_rows(rows: [[f32; 3]; 3]) -> Self {
        let mut m = [0.0; 12];
        let mut i = 0;
        while i < 3 {
            let mut j = 0;
            while j < 3 {
                m[i * 4 + j] = rows[i][j];
                j += 1;
            }
            i += 1;
        }
        Self { m }
    }

    /// Builds a matrix from 9 row-major elements.
    pub fn from_slice(elements: &[f32]) -> Result<Self> {
        check_shape(9, elements.len())?;
        let mut out = Self::ZERO;
        for (index, value) in elements.iter().enumerate() {
            out.m[(index / 3) * 4 + index % 3] = *value;
        }
        Ok(out)
    }

    /// Matrix whose rows are the given vectors.
    pub fn from_row_vectors(r0: Vector3, r1: Vector3, r2: Vector3) -> Self {
        Self::from_rows([r0.to_array(), r1.to_array(), r2.to_array()])
    }

    pub fn to_rows(&self) -> [[f32; 3]; 3] {
        let mut rows = [[0.0; 3]; 3];
        for (i, row) in rows.iter_mut().enumerate() {
            row.copy_from_slice(&self.m[i * 4..i * 4 + 3]);
        }
        rows
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.m[offset(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.m[offset(row, col)] = value;
    }

    pub fn row(&self, i: usize) -> Vector3 {
        Vector3::new(self.get(i, 0), self.get(i, 1), self.get(i, 2))
    }

    pub fn column(&self, j: usize) -> Vector3 {
        Vector3::new(self.get(0, j), self.get(1, j), self.get(2, j))
    }

    #[inline]
    pub(crate) fn as_ptr(&self) -> *const f32 {
        self.m.as_ptr()
    }

    #[inline]
    pub(crate) fn as_mut_ptr(&mut self) -> *mut f32 {
        self.m.as_mut_ptr()
    }

    pub fn scale(factors: Vector3) -> Self {
        Self::from_rows([
            [factors.x, 0.0, 0.0],
            [0.0, factors.y, 0.0],
            [0.0, 0.0, factors.z],
        ])
    }

    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_rows([[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]])
    }

    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_rows([[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]])
    }

    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_rows([[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]])
    }

    pub fn from_axis_angle(axis: Vector3, angle: f32) -> Self {
        Self::from_quaternion(Quaternion::from_axis_angle(axis, angle))
    }

    /// Rotation matrix of a quaternion. The input is normalized first.
    pub fn from_quaternion(rotation: Quaternion) -> Self {
        let q = rotation.normalized();
        let (x, y, z, w) = (q.x, q.y, q.z, q.w);
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);
        Self::from_rows([
            [1.0 - 2.0 * (yy + zz), 2.0 * (xy - wz), 2.0 * (xz + wy)],
            [2.0 * (xy + wz), 1.0 - 2.0 * (xx + zz), 2.0 * (yz - wx)],
            [2.0 * (xz - wy), 2.0 * (yz + wx), 1.0 - 2.0 * (xx + yy)],
        ])
    }

    #[inline]
    pub fn transpose(&self) -> Self {
        (dispatch::matrix3().transpose)(self)
    }

    #[inline]
    pub fn determinant(&self) -> f32 {
        (dispatch::matrix3().determinant)(self)
    }

    #[inline]
    pub fn inverse(&self) -> Result<Self> {
        (dispatch::matrix3().inverse)(self)
    }

    pub fn is_invertible(&self) -> bool {
        self.determinant().abs() > DETERMINANT_EPSILON
    }

    #[inline]
    pub fn transform(&self, v: Vector3) -> Vector3 {
        (dispatch::matrix3().transform)(self, v)
    }
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PartialEq for Matrix3 {
    fn eq(&self, other: &Self) -> bool {
        self.to_rows()
            .iter()
            .flatten()
            .zip(other.to_rows().iter().flatten())
            .all(|(a, b)| (a - b).abs() <= COMPARE_EPSILON)
    }
}

impl fmt::Debug for Matrix3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix3").field("rows", &self.to_rows()).finish()
    }
}

impl fmt::Display for Matrix3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.to_rows() {
            writeln!(f, "[{}, {}, {}]", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}

impl Index<(usize, usize)> for Matrix3 {
    type Output = f32;

    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        &self.m[offset(row, col)]
    }
}

/// Position of `(row, col)` in the padded storage; the pad lane is never addressable.
#[inline]
fn offset(row: usize, col: usize) -> usize {
    assert!(row < 3 && col < 3, "Matrix3 index out of range: ({row}, {col})");
    row * 4 + col
}

impl Mul for Matrix3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        (dispatch::matrix3().mul)(&self, &rhs)
    }
}

impl Mul<&Matrix3> for &Matrix3 {
    type Output = Matrix3;

    #[inline]
    fn mul(self, rhs: &Matrix3) -> Matrix3 {
        (dispatch::matrix3().mul)(self, rhs)
    }
}

impl Mul<Vector3> for Matrix3 {
    type Output = Vector3;

    #[inline]
    fn mul(self, rhs: Vector3) -> Vector3 {
        (dispatch::matrix3().transform)(&self, rhs)
    }
}

impl Mul<f32> for Matrix3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        (dispatch::matrix3().scale)(&self, rhs)
    }
}

impl Add for Matrix3 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        (dispatch::matrix3().add)(&self, &rhs)
    }
}

impl Sub for Matrix3 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        (dispatch::matrix3().sub)(&self, &rhs)
    }
}
