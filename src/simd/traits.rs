use crate::{
    batch,
    error::{length_mismatch, Result},
    matrix::Matrix4,
    vector::Vector3,
};

use super::dispatch::{self, Dispatch};

/// Allocating batch operations on `Vector3` slices.
///
/// Each operation comes in three flavours:
/// - `scalar_*` always runs the portable kernels,
/// - `simd_*` runs the globally bound tier,
/// - `par_simd_*` runs the bound tier on the rayon pool for long inputs.
pub trait BatchOps {
    fn scalar_add(&self, rhs: &[Vector3]) -> Result<Vec<Vector3>>;
    fn simd_add(&self, rhs: &[Vector3]) -> Result<Vec<Vector3>>;
    fn par_simd_add(&self, rhs: &[Vector3]) -> Result<Vec<Vector3>>;

    fn scalar_scale(&self, s: f32) -> Vec<Vector3>;
    fn simd_scale(&self, s: f32) -> Vec<Vector3>;
    fn par_simd_scale(&self, s: f32) -> Vec<Vector3>;

    fn scalar_normalize(&self) -> Vec<Vector3>;
    fn simd_normalize(&self) -> Vec<Vector3>;
    fn par_simd_normalize(&self) -> Vec<Vector3>;

    fn scalar_dot(&self, rhs: &[Vector3]) -> Result<Vec<f32>>;
    fn simd_dot(&self, rhs: &[Vector3]) -> Result<Vec<f32>>;
    fn par_simd_dot(&self, rhs: &[Vector3]) -> Result<Vec<f32>>;

    fn scalar_transform(&self, m: &Matrix4) -> Vec<Vector3>;
    fn simd_transform(&self, m: &Matrix4) -> Vec<Vector3>;
    fn par_simd_transform(&self, m: &Matrix4) -> Vec<Vector3>;
}

fn same_length(a: &[Vector3], b: &[Vector3]) -> Result<()> {
    if a.len() == b.len() {
        Ok(())
    } else {
        Err(length_mismatch(a.len(), b.len()))
    }
}

impl BatchOps for [Vector3] {
    fn scalar_add(&self, rhs: &[Vector3]) -> Result<Vec<Vector3>> {
        same_length(self, rhs)?;
        let mut out = vec![Vector3::ZERO; self.len()];
        (Dispatch::SCALAR.batch.add)(self, rhs, &mut out);
        Ok(out)
    }

    fn simd_add(&self, rhs: &[Vector3]) -> Result<Vec<Vector3>> {
        let mut out = vec![Vector3::ZERO; self.len()];
        batch::add_batch(self, rhs, &mut out)?;
        Ok(out)
    }

    fn par_simd_add(&self, rhs: &[Vector3]) -> Result<Vec<Vector3>> {
        let mut out = vec![Vector3::ZERO; self.len()];
        batch::par_add_batch(self, rhs, &mut out)?;
        Ok(out)
    }

    fn scalar_scale(&self, s: f32) -> Vec<Vector3> {
        let mut out = vec![Vector3::ZERO; self.len()];
        (Dispatch::SCALAR.batch.scale)(self, s, &mut out);
        out
    }

    fn simd_scale(&self, s: f32) -> Vec<Vector3> {
        let mut out = vec![Vector3::ZERO; self.len()];
        (dispatch::batch().scale)(self, s, &mut out);
        out
    }

    fn par_simd_scale(&self, s: f32) -> Vec<Vector3> {
        let mut out = vec![Vector3::ZERO; self.len()];
        batch::par_scale(self, s, &mut out);
        out
    }

    fn scalar_normalize(&self) -> Vec<Vector3> {
        let mut out = vec![Vector3::ZERO; self.len()];
        (Dispatch::SCALAR.batch.normalize)(self, &mut out);
        out
    }

    fn simd_normalize(&self) -> Vec<Vector3> {
        let mut out = vec![Vector3::ZERO; self.len()];
        (dispatch::batch().normalize)(self, &mut out);
        out
    }

    fn par_simd_normalize(&self) -> Vec<Vector3> {
        let mut out = vec![Vector3::ZERO; self.len()];
        batch::par_normalize(self, &mut out);
        out
    }

    fn scalar_dot(&self, rhs: &[Vector3]) -> Result<Vec<f32>> {
        same_length(self, rhs)?;
        let mut out = vec![0.0; self.len()];
        (Dispatch::SCALAR.batch.dot)(self, rhs, &mut out);
        Ok(out)
    }

    fn simd_dot(&self, rhs: &[Vector3]) -> Result<Vec<f32>> {
        let mut out = vec![0.0; self.len()];
        batch::dot_batch(self, rhs, &mut out)?;
        Ok(out)
    }

    fn par_simd_dot(&self, rhs: &[Vector3]) -> Result<Vec<f32>> {
        let mut out = vec![0.0; self.len()];
        batch::par_dot_batch(self, rhs, &mut out)?;
        Ok(out)
    }

    fn scalar_transform(&self, m: &Matrix4) -> Vec<Vector3> {
        let mut out = vec![Vector3::ZERO; self.len()];
        (Dispatch::SCALAR.batch.transform)(m, self, &mut out);
        out
    }

    fn simd_transform(&self, m: &Matrix4) -> Vec<Vector3> {
        let mut out = vec![Vector3::ZERO; self.len()];
        (dispatch::batch().transform)(m, self, &mut out);
        out
    }

    fn par_simd_transform(&self, m: &Matrix4) -> Vec<Vector3> {
        let mut out = vec![Vector3::ZERO; self.len()];
        batch::par_transform(m, self, &mut out);
        out
    }
}
