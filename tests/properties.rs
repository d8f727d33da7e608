//! Algebraic properties of the value types, checked on the globally bound tier.

use std::f32::consts::FRAC_PI_2;

use ndarray::Array2;
use rand::{rngs::StdRng, Rng, SeedableRng};
use simdgeo::{MathError, Matrix2, Matrix3, Matrix4, MatrixMN, Quaternion, Vector2, Vector3};

const SAMPLES: usize = 200;

fn random_vector(rng: &mut StdRng, range: f32) -> Vector3 {
    Vector3::new(
        rng.random_range(-range..range),
        rng.random_range(-range..range),
        rng.random_range(-range..range),
    )
}

fn random_rotation(rng: &mut StdRng) -> Quaternion {
    let axis = random_vector(rng, 1.0);
    Quaternion::from_axis_angle(axis, rng.random_range(-3.0..3.0)).normalized()
}

fn random_transform(rng: &mut StdRng) -> Matrix4 {
    let scale = Vector3::new(
        rng.random_range(0.5..2.0),
        rng.random_range(0.5..2.0),
        rng.random_range(0.5..2.0),
    );
    Matrix4::trs(random_vector(rng, 10.0), random_rotation(rng), scale)
}

fn assert_matrix4_close(a: &Matrix4, b: &Matrix4, tolerance: f32) {
    for (x, y) in a.as_array().iter().zip(b.as_array()) {
        assert!((x - y).abs() <= tolerance, "{a}\n!=\n{b}");
    }
}

mod vectors {
    use super::*;

    #[test]
    fn test_addition_commutes_and_associates() {
        simdgeo::initialize();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..SAMPLES {
            let a = random_vector(&mut rng, 100.0);
            let b = random_vector(&mut rng, 100.0);
            let c = random_vector(&mut rng, 100.0);
            assert_eq!(a + b, b + a);
            let (left, right) = ((a + b) + c, a + (b + c));
            for k in 0..3 {
                assert!((left[k] - right[k]).abs() <= 1e-4);
            }
        }
    }

    #[test]
    fn test_normalized_length_is_one_or_zero() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..SAMPLES {
            let v = random_vector(&mut rng, 50.0);
            assert!((v.normalized().length() - 1.0).abs() < 1e-5);
        }
        assert_eq!(Vector3::ZERO.normalized(), Vector3::ZERO);
        assert_eq!(Vector3::splat(1e-8).normalized(), Vector3::ZERO);
        assert_eq!(Vector2::new(0.0, 0.0).normalized(), Vector2::new(0.0, 0.0));
    }

    #[test]
    fn test_cross_is_orthogonal_to_both_inputs() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..SAMPLES {
            let a = random_vector(&mut rng, 1.0);
            let b = random_vector(&mut rng, 1.0);
            let c = a.cross(b);
            assert!(c.dot(a).abs() < 1e-5);
            assert!(c.dot(b).abs() < 1e-5);
        }
        assert_eq!(Vector3::RIGHT.cross(Vector3::UP), Vector3::FORWARD);
    }

    #[test]
    fn test_construction_checks_component_count() {
        assert_eq!(
            Vector3::from_slice(&[1.0, 2.0]),
            Err(MathError::ShapeMismatch {
                expected: 3,
                actual: 2
            })
        );
        assert!(Vector3::try_from(&[1.0, 2.0, 3.0, 4.0][..]).is_err());
        assert_eq!(
            Vector3::try_from(&[1.0, 2.0, 3.0][..]),
            Ok(Vector3::new(1.0, 2.0, 3.0))
        );
    }
}

mod matrices {
    use super::*;

    #[test]
    fn test_matrix4_inverse_round_trips() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..SAMPLES {
            let m = random_transform(&mut rng);
            let inverse = m.inverse().unwrap();
            assert_matrix4_close(&(m * inverse), &Matrix4::IDENTITY, 1e-4);
            assert_matrix4_close(&inverse.inverse().unwrap(), &m, 1e-3);
        }
    }

    #[test]
    fn test_matrix3_inverse_round_trips() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..SAMPLES {
            let m = random_rotation(&mut rng).to_matrix3()
                * Matrix3::scale(Vector3::new(
                    rng.random_range(0.5..2.0),
                    rng.random_range(0.5..2.0),
                    rng.random_range(0.5..2.0),
                ));
            let product = m * m.inverse().unwrap();
            for i in 0..3 {
                for j in 0..3 {
                    let expected = if i == j { 1.0 } else { 0.0 };
                    assert!((product.get(i, j) - expected).abs() < 1e-4);
                }
            }
        }
    }

    #[test]
    fn test_singular_inverse_is_an_error() {
        let flat = Matrix4::scale(Vector3::new(1.0, 0.0, 1.0));
        assert!(!flat.is_invertible());
        assert!(matches!(
            flat.inverse(),
            Err(MathError::SingularMatrix { .. })
        ));
        assert!(Matrix3::ZERO.inverse().is_err());
    }

    #[test]
    fn test_matrix2_worked_example() {
        let m = Matrix2::new(1.0, 2.0, 3.0, 4.0);
        assert!((m.determinant() + 2.0).abs() < 1e-6);
        assert_eq!(m.inverse().unwrap(), Matrix2::new(-2.0, 1.0, 1.5, -0.5));
    }

    #[test]
    fn test_translation_moves_points_not_directions() {
        let m = Matrix4::translation(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(m.transform_point(Vector3::ZERO), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(m.transform_vector(Vector3::UP), Vector3::UP);
    }

    #[test]
    fn test_construction_checks_element_count() {
        assert!(Matrix4::from_slice(&[0.0; 15]).is_err());
        assert!(Matrix3::from_slice(&[0.0; 9]).is_ok());
        assert!(Matrix2::from_slice(&[0.0; 5]).is_err());
        assert!(MatrixMN::from_vec(2, 3, vec![0.0; 5]).is_err());
    }

    #[test]
    fn test_dynamic_product_matches_ndarray() {
        let mut rng = StdRng::seed_from_u64(6);
        let (m, k, n) = (4, 6, 3);
        let a: Vec<f32> = (0..m * k).map(|_| rng.random_range(-1.0..1.0)).collect();
        let b: Vec<f32> = (0..k * n).map(|_| rng.random_range(-1.0..1.0)).collect();

        let ours = MatrixMN::from_vec(m, k, a.clone())
            .unwrap()
            .mul(&MatrixMN::from_vec(k, n, b.clone()).unwrap())
            .unwrap();
        let reference = Array2::from_shape_vec((m, k), a)
            .unwrap()
            .dot(&Array2::from_shape_vec((k, n), b).unwrap());

        assert_eq!(ours.shape(), (m, n));
        for i in 0..m {
            for j in 0..n {
                let got = ours.get(i, j).unwrap();
                assert!((got - reference[[i, j]]).abs() < 1e-5, "({i}, {j})");
            }
        }
    }

    #[test]
    fn test_dynamic_shape_errors() {
        let a = MatrixMN::zeros(2, 3);
        assert!(matches!(a.mul(&a), Err(MathError::DimensionMismatch { .. })));
        assert!(matches!(
            a.determinant(),
            Err(MathError::NotSquare { rows: 2, cols: 3 })
        ));
    }

    #[test]
    fn test_dynamic_determinant_and_inverse_agree_with_fixed_sizes() {
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..20 {
            let fixed = random_transform(&mut rng);
            let dynamic = MatrixMN::from(fixed);
            let det = dynamic.determinant().unwrap();
            assert!((det - fixed.determinant()).abs() <= 1e-3 * det.abs().max(1.0));

            let inverse = dynamic.inverse().unwrap();
            let product = dynamic.mul(&inverse).unwrap();
            for i in 0..4 {
                for j in 0..4 {
                    let expected = if i == j { 1.0 } else { 0.0 };
                    let got = product.get(i, j).unwrap();
                    assert!((got - expected).abs() < 1e-4, "({i}, {j}): {got}");
                }
            }
        }
    }
}

mod rotations {
    use super::*;

    #[test]
    fn test_quarter_turns() {
        let about_y = Quaternion::from_axis_angle(Vector3::UP, FRAC_PI_2);
        assert_eq!(about_y * Vector3::RIGHT, Vector3::new(0.0, 0.0, -1.0));

        let about_x = Quaternion::from_axis_angle(Vector3::RIGHT, FRAC_PI_2);
        assert_eq!(about_x.rotate_vector(Vector3::UP), Vector3::new(0.0, 0.0, 1.0));

        let m = Matrix4::from_quaternion(about_y);
        assert_eq!(m.transform_vector(Vector3::RIGHT), Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_unit_inverse_and_conjugate() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..SAMPLES {
            let q = random_rotation(&mut rng);
            assert_eq!(q * q.inverse(), Quaternion::IDENTITY);
            assert_eq!(q.conjugate(), q.inverse());
        }
    }

    #[test]
    fn test_product_is_associative_but_not_commutative() {
        let i = Quaternion::new(0.0, 1.0, 0.0, 0.0);
        let j = Quaternion::new(0.0, 0.0, 1.0, 0.0);
        let k = Quaternion::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(i * j, k);
        assert_eq!(j * i, k * -1.0);

        let mut rng = StdRng::seed_from_u64(10);
        for _ in 0..SAMPLES {
            let (a, b, c) = (
                random_rotation(&mut rng),
                random_rotation(&mut rng),
                random_rotation(&mut rng),
            );
            assert_eq!((a * b) * c, a * (b * c));
        }
    }

    #[test]
    fn test_slerp_endpoints_and_norm() {
        let from = Quaternion::from_axis_angle(Vector3::UP, 0.2);
        let to = Quaternion::from_axis_angle(Vector3::new(1.0, 1.0, 0.0), 1.3);
        assert_eq!(from.slerp(to, 0.0), from);
        assert_eq!(from.slerp(to, 1.0), to);
        for step in 1..10 {
            let q = from.slerp(to, step as f32 / 10.0);
            assert!((q.length() - 1.0).abs() < 1e-5);
            assert!((from.lerp(to, step as f32 / 10.0).length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_matrix_round_trip() {
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..SAMPLES {
            let q = random_rotation(&mut rng);
            let back = Quaternion::from_rotation_matrix(&q.to_matrix3());
            // q and -q encode the same rotation
            assert!(back == q || back == q * -1.0, "{back} vs {q}");
        }
    }
}
