//! Binding lifecycle. Kept as a single test so nothing else in this binary
//! initializes the tables first.

use simdgeo::{CpuFeatures, Dispatch, DispatchConfig, Matrix4, Quaternion, Tier, Vector3};

#[test]
fn test_scalar_before_initialize_then_bound_once() {
    assert!(!simdgeo::is_initialized());
    assert_eq!(simdgeo::active_tier(), Tier::Scalar);
    assert_eq!(Dispatch::active().tier, Tier::Scalar);

    // Arithmetic is defined before any binding happens.
    let before = Matrix4::translation(Vector3::new(0.0, 1.0, 0.0))
        .transform_point(Vector3::new(1.0, 2.0, 3.0));
    assert_eq!(before, Vector3::new(1.0, 3.0, 3.0));
    assert_eq!(Vector3::new(3.0, 0.0, 4.0).normalized(), Vector3::new(0.6, 0.0, 0.8));

    let cap = Tier::Sse2;
    let bound = simdgeo::initialize_with(DispatchConfig::default().with_max_tier(cap));
    let host_best = CpuFeatures::detect().best_tier();
    assert_eq!(bound, host_best.min(cap));
    assert!(simdgeo::is_initialized());
    assert_eq!(simdgeo::active_tier(), bound);

    // Later calls keep the first configuration.
    assert_eq!(simdgeo::initialize(), bound);
    assert_eq!(
        simdgeo::initialize_with(DispatchConfig::default().with_max_tier(Tier::Avx)),
        bound
    );

    let after = Matrix4::translation(Vector3::new(0.0, 1.0, 0.0))
        .transform_point(Vector3::new(1.0, 2.0, 3.0));
    assert_eq!(before, after);

    let q = Quaternion::from_axis_angle(Vector3::FORWARD, std::f32::consts::PI);
    assert_eq!(q * Vector3::RIGHT, Vector3::LEFT);
}
