use std::fmt;
use std::ops::{Add, Index, Mul, Sub};

use crate::{
    error::{check_shape, singular_matrix, Result},
    vector::Vector2,
    COMPARE_EPSILON, DETERMINANT_EPSILON,
};

/// Row-major 2x2 matrix. Portable only.
#[derive(Clone, Copy)]
pub struct Matrix2 {
    m: [f32; 4],
}

impl Matrix2 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0);

    /// Elements in row-major order: `[[m00, m01], [m10, m11]]`.
    #[inline]
    pub const fn new(m00: f32, m01: f32, m10: f32, m11: f32) -> Self {
        Self {
            m: [m00, m01, m10, m11],
        }
    }

    pub const fn from_rows(rows: [[f32; 2]; 2]) -> Self {
        Self::new(rows[0][0], rows[0][1], rows[1][0], rows[1][1])
    }

    pub fn from_slice(elements: &[f32]) -> Result<Self> {
        check_shape(4, elements.len())?;
        Ok(Self::new(elements[0], elements[1], elements[2], elements[3]))
    }

    pub fn rotation(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(c, -s, s, c)
    }

    pub fn scale(factors: Vector2) -> Self {
        Self::new(factors.x, 0.0, 0.0, factors.y)
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.m[row * 2 + col]
    }

    pub fn to_rows(&self) -> [[f32; 2]; 2] {
        [[self.m[0], self.m[1]], [self.m[2], self.m[3]]]
    }

    pub fn determinant(&self) -> f32 {
        self.m[0] * self.m[3] - self.m[1] * self.m[2]
    }

    pub fn is_invertible(&self) -> bool {
        self.determinant().abs() > DETERMINANT_EPSILON
    }

    pub fn inverse(&self) -> Result<Self> {
        let det = self.determinant();
        if det.abs() <= DETERMINANT_EPSILON {
            return Err(singular_matrix(det));
        }
        let inv = 1.0 / det;
        Ok(Self::new(
            self.m[3] * inv,
            -self.m[1] * inv,
            -self.m[2] * inv,
            self.m[0] * inv,
        ))
    }

    pub fn transpose(&self) -> Self {
        Self::new(self.m[0], self.m[2], self.m[1], self.m[3])
    }

    pub fn transform(&self, v: Vector2) -> Vector2 {
        Vector2::new(
            self.m[0] * v.x + self.m[1] * v.y,
            self.m[2] * v.x + self.m[3] * v.y,
        )
    }
}

impl Default for Matrix2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PartialEq for Matrix2 {
    fn eq(&self, other: &Self) -> bool {
        self.m
            .iter()
            .zip(other.m.iter())
            .all(|(a, b)| (a - b).abs() <= COMPARE_EPSILON)
    }
}

impl fmt::Debug for Matrix2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix2").field("rows", &self.to_rows()).finish()
    }
}

impl Index<(usize, usize)> for Matrix2 {
    type Output = f32;

    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        &self.m[row * 2 + col]
    }
}

impl Mul for Matrix2 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let a = &self.m;
        let b = &rhs.m;
        Self::new(
            a[0] * b[0] + a[1] * b[2],
            a[0] * b[1] + a[1] * b[3],
            a[2] * b[0] + a[3] * b[2],
            a[2] * b[1] + a[3] * b[3],
        )
    }
}

impl Mul<Vector2> for Matrix2 {
    type Output = Vector2;

    fn mul(self, rhs: Vector2) -> Vector2 {
        self.transform(rhs)
    }
}

impl Mul<f32> for Matrix2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.m[0] * rhs, self.m[1] * rhs, self.m[2] * rhs, self.m[3] * rhs)
    }
}

impl Add for Matrix2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.m[0] + rhs.m[0],
            self.m[1] + rhs.m[1],
            self.m[2] + rhs.m[2],
            self.m[3] + rhs.m[3],
        )
    }
}

impl Sub for Matrix2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.m[0] - rhs.m[0],
            self.m[1] - rhs.m[1],
            self.m[2] - rhs.m[2],
            self.m[3] - rhs.m[3],
        )
    }
}
