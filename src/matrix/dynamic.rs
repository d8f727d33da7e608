use std::fmt;
use std::ops::{Index, IndexMut};

use crate::{
    error::{dimension_mismatch, singular_matrix, MathError, Result},
    COMPARE_EPSILON, DETERMINANT_EPSILON,
};

use super::{Matrix2, Matrix3, Matrix4};

/// Heap-backed `rows x cols` matrix, row-major.
///
/// Shape errors are reported through [`MathError`] rather than panicking, since
/// the shape is only known at runtime.
#[derive(Clone)]
pub struct MatrixMN {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl MatrixMN {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut out = Self::zeros(n, n);
        for i in 0..n {
            out.data[i * n + i] = 1.0;
        }
        out
    }

    /// Takes ownership of `rows * cols` row-major elements.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(MathError::ShapeMismatch {
                expected: rows * cols,
                actual: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    pub fn from_slice(rows: usize, cols: usize, data: &[f32]) -> Result<Self> {
        Self::from_vec(rows, cols, data.to_vec())
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Element at `(row, col)`, or `None` when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Writes an element; out-of-range indices are a dimension error.
    pub fn set(&mut self, row: usize, col: usize, value: f32) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(dimension_mismatch((row + 1, col + 1), self.shape()));
        }
        self.data[row * self.cols + col] = value;
        Ok(())
    }

    pub fn transpose(&self) -> Self {
        let mut out = Self::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                out.data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        out
    }

    pub fn add(&self, rhs: &Self) -> Result<Self> {
        self.zip_with(rhs, |a, b| a + b)
    }

    pub fn sub(&self, rhs: &Self) -> Result<Self> {
        self.zip_with(rhs, |a, b| a - b)
    }

    pub fn scale(&self, factor: f32) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|v| v * factor).collect(),
        }
    }

    fn zip_with(&self, rhs: &Self, op: impl Fn(f32, f32) -> f32) -> Result<Self> {
        if self.shape() != rhs.shape() {
            return Err(dimension_mismatch(self.shape(), rhs.shape()));
        }
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(rhs.data.iter())
                .map(|(a, b)| op(*a, *b))
                .collect(),
        })
    }

    /// Matrix product; `self.cols` must equal `rhs.rows`.
    pub fn mul(&self, rhs: &Self) -> Result<Self> {
        if self.cols != rhs.rows {
            return Err(dimension_mismatch(self.shape(), rhs.shape()));
        }
        let mut out = Self::zeros(self.rows, rhs.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self.data[i * self.cols + k];
                let rhs_row = &rhs.data[k * rhs.cols..(k + 1) * rhs.cols];
                let out_row = &mut out.data[i * rhs.cols..(i + 1) * rhs.cols];
                for (o, b) in out_row.iter_mut().zip(rhs_row) {
                    *o += a * b;
                }
            }
        }
        Ok(out)
    }

    /// Matrix-vector product; `v.len()` must equal `self.cols`.
    pub fn mul_vec(&self, v: &[f32]) -> Result<Vec<f32>> {
        if v.len() != self.cols {
            return Err(dimension_mismatch(self.shape(), (v.len(), 1)));
        }
        Ok(self
            .data
            .chunks_exact(self.cols.max(1))
            .take(self.rows)
            .map(|row| row.iter().zip(v).map(|(a, b)| a * b).sum())
            .collect())
    }

    fn require_square(&self) -> Result<()> {
        if self.is_square() {
            Ok(())
        } else {
            Err(MathError::NotSquare {
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Matrix with row `row` and column `col` removed.
    pub fn minor(&self, row: usize, col: usize) -> Result<Self> {
        self.require_square()?;
        if row >= self.rows || col >= self.cols || self.rows == 0 {
            return Err(dimension_mismatch((row + 1, col + 1), self.shape()));
        }
        let n = self.rows;
        let mut data = Vec::with_capacity((n - 1) * (n - 1));
        for i in (0..n).filter(|&i| i != row) {
            for j in (0..n).filter(|&j| j != col) {
                data.push(self.data[i * n + j]);
            }
        }
        Ok(Self {
            rows: n - 1,
            cols: n - 1,
            data,
        })
    }

    /// Signed minor determinant at `(row, col)`.
    pub fn cofactor(&self, row: usize, col: usize) -> Result<f32> {
        let minor = self.minor(row, col)?.determinant()?;
        Ok(if (row + col) % 2 == 0 { minor } else { -minor })
    }

    /// Determinant by cofactor expansion along the first row.
    pub fn determinant(&self) -> Result<f32> {
        self.require_square()?;
        Ok(cofactor_determinant(self.rows, &self.data))
    }

    pub fn is_invertible(&self) -> bool {
        matches!(self.determinant(), Ok(det) if det.abs() > DETERMINANT_EPSILON)
    }

    /// Inverse through the adjugate: `adj(A) / det(A)`.
    pub fn inverse(&self) -> Result<Self> {
        let det = self.determinant()?;
        if det.abs() <= DETERMINANT_EPSILON {
            return Err(singular_matrix(det));
        }
        let n = self.rows;
        if n == 1 {
            return Ok(Self {
                rows: 1,
                cols: 1,
                data: vec![1.0 / det],
            });
        }
        let mut out = Self::zeros(n, n);
        for i in 0..n {
            for j in 0..n {
                // adjugate is the transposed cofactor matrix
                out.data[j * n + i] = self.cofactor(i, j)? / det;
            }
        }
        Ok(out)
    }
}

fn cofactor_determinant(n: usize, data: &[f32]) -> f32 {
    match n {
        0 => 1.0,
        1 => data[0],
        2 => data[0] * data[3] - data[1] * data[2],
        _ => {
            let mut det = 0.0;
            let mut minor = Vec::with_capacity((n - 1) * (n - 1));
            for col in 0..n {
                let pivot = data[col];
                if pivot == 0.0 {
                    continue;
                }
                minor.clear();
                for i in 1..n {
                    for j in (0..n).filter(|&j| j != col) {
                        minor.push(data[i * n + j]);
                    }
                }
                let term = pivot * cofactor_determinant(n - 1, &minor);
                if col % 2 == 0 {
                    det += term;
                } else {
                    det -= term;
                }
            }
            det
        }
    }
}

impl PartialEq for MatrixMN {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| (a - b).abs() <= COMPARE_EPSILON)
    }
}

impl fmt::Debug for MatrixMN {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatrixMN")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("data", &self.data)
            .finish()
    }
}

impl Index<(usize, usize)> for MatrixMN {
    type Output = f32;

    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        assert!(row < self.rows && col < self.cols, "MatrixMN index out of range");
        &self.data[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for MatrixMN {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
        assert!(row < self.rows && col < self.cols, "MatrixMN index out of range");
        &mut self.data[row * self.cols + col]
    }
}

impl From<Matrix2> for MatrixMN {
    fn from(m: Matrix2) -> Self {
        let data = m.to_rows().iter().flatten().copied().collect();
        Self { rows: 2, cols: 2, data }
    }
}

impl From<Matrix3> for MatrixMN {
    fn from(m: Matrix3) -> Self {
        let data = m.to_rows().iter().flatten().copied().collect();
        Self { rows: 3, cols: 3, data }
    }
}

impl From<Matrix4> for MatrixMN {
    fn from(m: Matrix4) -> Self {
        Self {
            rows: 4,
            cols: 4,
            data: m.as_array().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_is_checked() {
        assert!(matches!(
            MatrixMN::from_vec(2, 3, vec![0.0; 5]),
            Err(MathError::ShapeMismatch {
                expected: 6,
                actual: 5
            })
        ));
        let m = MatrixMN::from_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(m.get(1, 2), Some(6.0));
        assert_eq!(m.get(2, 0), None);
    }

    #[test]
    fn test_set_out_of_range() {
        let mut m = MatrixMN::zeros(2, 2);
        assert!(m.set(1, 1, 3.0).is_ok());
        assert_eq!(m[(1, 1)], 3.0);
        assert!(matches!(m.set(2, 0, 1.0), Err(MathError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_mul_shapes() {
        let a = MatrixMN::from_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let b = a.transpose();
        let c = a.mul(&b).unwrap();
        assert_eq!(c.shape(), (2, 2));
        assert_eq!(c, MatrixMN::from_slice(2, 2, &[14.0, 32.0, 32.0, 77.0]).unwrap());
        assert!(matches!(
            a.mul(&a),
            Err(MathError::DimensionMismatch {
                left: (2, 3),
                right: (2, 3)
            })
        ));
        assert_eq!(a.mul_vec(&[1.0, 1.0, 1.0]).unwrap(), vec![6.0, 15.0]);
    }

    #[test]
    fn test_add_sub() {
        let a = MatrixMN::identity(3);
        assert_eq!(a.add(&a).unwrap(), a.scale(2.0));
        assert_eq!(a.sub(&a).unwrap(), MatrixMN::zeros(3, 3));
        assert!(a.add(&MatrixMN::zeros(3, 2)).is_err());
    }

    #[test]
    fn test_determinant() {
        let m = MatrixMN::from(Matrix2::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(m.determinant().unwrap(), -2.0);
        assert_eq!(MatrixMN::identity(5).determinant().unwrap(), 1.0);
        assert!(matches!(
            MatrixMN::zeros(2, 3).determinant(),
            Err(MathError::NotSquare { rows: 2, cols: 3 })
        ));
    }

    #[test]
    fn test_inverse() {
        let m = MatrixMN::from_slice(
            4,
            4,
            &[
                4.0, 0.0, 0.0, 1.0, //
                0.0, 3.0, 1.0, 0.0, //
                0.0, 1.0, 2.0, 0.0, //
                1.0, 0.0, 0.0, 2.0,
            ],
        )
        .unwrap();
        let inv = m.inverse().unwrap();
        assert_eq!(m.mul(&inv).unwrap(), MatrixMN::identity(4));
        assert_eq!(inv.inverse().unwrap(), m);
        assert!(matches!(
            MatrixMN::zeros(3, 3).inverse(),
            Err(MathError::SingularMatrix { .. })
        ));
    }

    #[test]
    fn test_minor_and_cofactor() {
        let m = MatrixMN::from(Matrix3::from_rows([
            [1.0, 2.0, 3.0],
            [0.0, 4.0, 5.0],
            [1.0, 0.0, 6.0],
        ]));
        let minor = m.minor(0, 1).unwrap();
        assert_eq!(minor, MatrixMN::from_slice(2, 2, &[0.0, 5.0, 1.0, 6.0]).unwrap());
        assert_eq!(m.cofactor(0, 1).unwrap(), 5.0);
        assert_eq!(m.determinant().unwrap(), 22.0);
    }
}
