//! Slice operators over `Vector3` with caller-provided outputs.
//!
//! Each operator checks that every slice has the same length, then hands the
//! whole run to the bound batch kernel. The `par_*` variants split inputs
//! longer than [`PARALLEL_BATCH_THRESHOLD`] into [`PARALLEL_CHUNK_SIZE`]
//! chunks on the rayon pool and run the same kernel on each chunk, so their
//! results are identical to the sequential ones.

use rayon::prelude::*;

use crate::{
    error::{length_mismatch, Result},
    matrix::Matrix4,
    simd::dispatch,
    vector::Vector3,
    PARALLEL_BATCH_THRESHOLD, PARALLEL_CHUNK_SIZE,
};

fn check_lengths(expected: usize, others: &[usize]) -> Result<()> {
    match others.iter().find(|len| **len != expected) {
        Some(actual) => Err(length_mismatch(expected, *actual)),
        None => Ok(()),
    }
}

/// `out[i] = a[i] + b[i]`.
pub fn add_batch(a: &[Vector3], b: &[Vector3], out: &mut [Vector3]) -> Result<()> {
    check_lengths(a.len(), &[b.len(), out.len()])?;
    (dispatch::batch().add)(a, b, out);
    Ok(())
}

/// `out[i] = a[i] * s`.
pub fn scale_batch(a: &[Vector3], s: f32, out: &mut [Vector3]) -> Result<()> {
    check_lengths(a.len(), &[out.len()])?;
    (dispatch::batch().scale)(a, s, out);
    Ok(())
}

/// `out[i] = a[i].normalized()`; near-zero inputs give zero.
pub fn normalize_batch(a: &[Vector3], out: &mut [Vector3]) -> Result<()> {
    check_lengths(a.len(), &[out.len()])?;
    (dispatch::batch().normalize)(a, out);
    Ok(())
}

/// `out[i] = a[i].dot(b[i])`.
pub fn dot_batch(a: &[Vector3], b: &[Vector3], out: &mut [f32]) -> Result<()> {
    check_lengths(a.len(), &[b.len(), out.len()])?;
    (dispatch::batch().dot)(a, b, out);
    Ok(())
}

/// `out[i] = m.transform_point(points[i])`, perspective divide included.
pub fn transform_batch(m: &Matrix4, points: &[Vector3], out: &mut [Vector3]) -> Result<()> {
    check_lengths(points.len(), &[out.len()])?;
    (dispatch::batch().transform)(m, points, out);
    Ok(())
}

pub fn par_add_batch(a: &[Vector3], b: &[Vector3], out: &mut [Vector3]) -> Result<()> {
    check_lengths(a.len(), &[b.len(), out.len()])?;
    par_add(a, b, out);
    Ok(())
}

pub fn par_scale_batch(a: &[Vector3], s: f32, out: &mut [Vector3]) -> Result<()> {
    check_lengths(a.len(), &[out.len()])?;
    par_scale(a, s, out);
    Ok(())
}

pub fn par_normalize_batch(a: &[Vector3], out: &mut [Vector3]) -> Result<()> {
    check_lengths(a.len(), &[out.len()])?;
    par_normalize(a, out);
    Ok(())
}

pub fn par_dot_batch(a: &[Vector3], b: &[Vector3], out: &mut [f32]) -> Result<()> {
    check_lengths(a.len(), &[b.len(), out.len()])?;
    par_dot(a, b, out);
    Ok(())
}

pub fn par_transform_batch(m: &Matrix4, points: &[Vector3], out: &mut [Vector3]) -> Result<()> {
    check_lengths(points.len(), &[out.len()])?;
    par_transform(m, points, out);
    Ok(())
}

// Unchecked chunked drivers. Lengths are validated by the callers.

pub(crate) fn par_add(a: &[Vector3], b: &[Vector3], out: &mut [Vector3]) {
    let kernel = dispatch::batch().add;
    if out.len() < PARALLEL_BATCH_THRESHOLD {
        return kernel(a, b, out);
    }
    out.par_chunks_mut(PARALLEL_CHUNK_SIZE)
        .zip(a.par_chunks(PARALLEL_CHUNK_SIZE))
        .zip(b.par_chunks(PARALLEL_CHUNK_SIZE))
        .for_each(|((out, a), b)| kernel(a, b, out));
}

pub(crate) fn par_scale(a: &[Vector3], s: f32, out: &mut [Vector3]) {
    let kernel = dispatch::batch().scale;
    if out.len() < PARALLEL_BATCH_THRESHOLD {
        return kernel(a, s, out);
    }
    out.par_chunks_mut(PARALLEL_CHUNK_SIZE)
        .zip(a.par_chunks(PARALLEL_CHUNK_SIZE))
        .for_each(|(out, a)| kernel(a, s, out));
}

pub(crate) fn par_normalize(a: &[Vector3], out: &mut [Vector3]) {
    let kernel = dispatch::batch().normalize;
    if out.len() < PARALLEL_BATCH_THRESHOLD {
        return kernel(a, out);
    }
    out.par_chunks_mut(PARALLEL_CHUNK_SIZE)
        .zip(a.par_chunks(PARALLEL_CHUNK_SIZE))
        .for_each(|(out, a)| kernel(a, out));
}

pub(crate) fn par_dot(a: &[Vector3], b: &[Vector3], out: &mut [f32]) {
    let kernel = dispatch::batch().dot;
    if out.len() < PARALLEL_BATCH_THRESHOLD {
        return kernel(a, b, out);
    }
    out.par_chunks_mut(PARALLEL_CHUNK_SIZE)
        .zip(a.par_chunks(PARALLEL_CHUNK_SIZE))
        .zip(b.par_chunks(PARALLEL_CHUNK_SIZE))
        .for_each(|((out, a), b)| kernel(a, b, out));
}

pub(crate) fn par_transform(m: &Matrix4, points: &[Vector3], out: &mut [Vector3]) {
    let kernel = dispatch::batch().transform;
    if out.len() < PARALLEL_BATCH_THRESHOLD {
        return kernel(m, points, out);
    }
    out.par_chunks_mut(PARALLEL_CHUNK_SIZE)
        .zip(points.par_chunks(PARALLEL_CHUNK_SIZE))
        .for_each(|(out, points)| kernel(m, points, out));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MathError;

    fn ramp(n: usize) -> Vec<Vector3> {
        (0..n)
            .map(|i| {
                let t = i as f32 * 0.001;
                Vector3::new(t.sin(), t.cos(), 1.0 - t)
            })
            .collect()
    }

    mod lengths {
        use super::*;

        #[test]
        fn test_add_rejects_short_output() {
            let a = ramp(4);
            let b = ramp(4);
            let mut out = vec![Vector3::ZERO; 3];
            assert_eq!(
                add_batch(&a, &b, &mut out),
                Err(MathError::LengthMismatch {
                    expected: 4,
                    actual: 3
                })
            );
        }

        #[test]
        fn test_dot_rejects_mismatched_inputs() {
            let a = ramp(5);
            let b = ramp(2);
            let mut out = vec![0.0; 5];
            assert!(matches!(
                dot_batch(&a, &b, &mut out),
                Err(MathError::LengthMismatch {
                    expected: 5,
                    actual: 2
                })
            ));
        }

        #[test]
        fn test_parallel_rejects_mismatch_above_threshold() {
            let a = ramp(PARALLEL_BATCH_THRESHOLD + 1);
            let mut out = vec![Vector3::ZERO; PARALLEL_BATCH_THRESHOLD];
            assert!(par_normalize_batch(&a, &mut out).is_err());
        }

        #[test]
        fn test_empty_slices_are_accepted() {
            let mut out: Vec<Vector3> = Vec::new();
            assert!(add_batch(&[], &[], &mut out).is_ok());
            assert!(transform_batch(&Matrix4::IDENTITY, &[], &mut out).is_ok());
        }
    }

    mod values {
        use super::*;

        #[test]
        fn test_add_and_scale() {
            let a = [Vector3::new(1.0, 2.0, 3.0), Vector3::new(-1.0, 0.5, 0.0)];
            let b = [Vector3::ONE, Vector3::UP];
            let mut out = [Vector3::ZERO; 2];

            add_batch(&a, &b, &mut out).unwrap();
            assert_eq!(out, [Vector3::new(2.0, 3.0, 4.0), Vector3::new(-1.0, 1.5, 0.0)]);

            scale_batch(&a, 2.0, &mut out).unwrap();
            assert_eq!(out, [Vector3::new(2.0, 4.0, 6.0), Vector3::new(-2.0, 1.0, 0.0)]);
        }

        #[test]
        fn test_transform_translates_points() {
            let m = Matrix4::translation(Vector3::new(0.0, 0.0, 5.0));
            let points = [Vector3::ZERO, Vector3::ONE, Vector3::LEFT];
            let mut out = [Vector3::ZERO; 3];
            transform_batch(&m, &points, &mut out).unwrap();
            for (p, o) in points.iter().zip(&out) {
                assert_eq!(*o, *p + Vector3::new(0.0, 0.0, 5.0));
            }
        }

        #[test]
        fn test_parallel_matches_sequential() {
            let n = PARALLEL_BATCH_THRESHOLD * 2 + 3;
            let a = ramp(n);
            let b: Vec<Vector3> = a.iter().map(|v| v.cross(Vector3::UP)).collect();

            let mut seq = vec![Vector3::ZERO; n];
            let mut par = vec![Vector3::ZERO; n];
            normalize_batch(&a, &mut seq).unwrap();
            par_normalize_batch(&a, &mut par).unwrap();
            assert_eq!(seq, par);

            add_batch(&a, &b, &mut seq).unwrap();
            par_add_batch(&a, &b, &mut par).unwrap();
            assert_eq!(seq, par);

            let mut seq_dot = vec![0.0; n];
            let mut par_dot = vec![0.0; n];
            dot_batch(&a, &b, &mut seq_dot).unwrap();
            par_dot_batch(&a, &b, &mut par_dot).unwrap();
            for (s, p) in seq_dot.iter().zip(&par_dot) {
                assert!((s - p).abs() < 1e-6);
            }
        }
    }
}
