//! Unit tests for the explicit Euler step and the Lorentz acceleration

use glam::Vec3;
use lorentz_core::tests::test_helpers::{approx_eq_f32, vec3_approx_eq};
use lorentz_core::{lorentz_acceleration, step, FieldVector, ParticleState, PhysicalConstants};

#[test]
fn test_single_step_zero_field_is_exact() {
    let state = ParticleState::from_array([0.0, 0.0, 0.0, 2.0, 0.0, 0.5]);
    let next = step(
        &state,
        &FieldVector::default(),
        &PhysicalConstants::new(1.0, 1.0),
        0.01,
    );

    assert_eq!(next.to_array(), [0.02, 0.0, 0.005, 2.0, 0.0, 0.5]);
}

#[test]
fn test_lorentz_acceleration_is_v_cross_b() {
    let vel = Vec3::new(1.0, 0.0, 0.0);
    let fields = FieldVector::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
    let accel = lorentz_acceleration(vel, &fields, &PhysicalConstants::new(1.0, 1.0));

    assert_eq!(accel, vel.cross(fields.magnetic));
    // ay = Ey + vz*Bx - vx*Bz
    assert_eq!(accel, Vec3::new(0.0, -1.0, 0.0));
}

#[test]
fn test_acceleration_components_match_expanded_formula() {
    let vel = Vec3::new(0.3, -1.2, 2.5);
    let fields = FieldVector::new(Vec3::new(0.5, 1.0, -0.25), Vec3::new(-0.7, 0.4, 1.5));
    let constants = PhysicalConstants::new(2.0, 0.5);
    let accel = lorentz_acceleration(vel, &fields, &constants);

    let (e, b, k) = (fields.electric, fields.magnetic, 4.0);
    let expected = Vec3::new(
        k * (e.x + vel.y * b.z - vel.z * b.y),
        k * (e.y + vel.z * b.x - vel.x * b.z),
        k * (e.z + vel.x * b.y - vel.y * b.x),
    );
    assert!(vec3_approx_eq(accel, expected, 1e-5));
}

#[test]
fn test_electric_field_accelerates_along_e() {
    let state = ParticleState::from_array([0.0; 6]);
    let fields = FieldVector::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
    let next = step(&state, &fields, &PhysicalConstants::new(1.0, 2.0), 0.1);

    assert_eq!(next.pos, Vec3::ZERO, "position uses the pre-step velocity");
    assert!(approx_eq_f32(next.vel.z, 0.5, 1e-6));
}

#[test]
fn test_negative_charge_reverses_force() {
    let vel = Vec3::new(1.0, 0.0, 0.0);
    let fields = FieldVector::new(Vec3::ZERO, Vec3::Z);
    let positive = lorentz_acceleration(vel, &fields, &PhysicalConstants::new(1.0, 1.0));
    let negative = lorentz_acceleration(vel, &fields, &PhysicalConstants::new(-1.0, 1.0));

    assert_eq!(positive, -negative);
}

#[test]
fn test_non_finite_state_returns_input_unchanged() {
    let fields = FieldVector::new(Vec3::ONE, Vec3::ONE);
    let constants = PhysicalConstants::default();

    let inf = ParticleState::from_array([0.0, 0.0, 0.0, f32::INFINITY, 0.0, 0.0]);
    assert_eq!(step(&inf, &fields, &constants, 0.01), inf);

    let neg_inf = ParticleState::from_array([f32::NEG_INFINITY, 1.0, 1.0, 1.0, 1.0, 1.0]);
    assert_eq!(step(&neg_inf, &fields, &constants, 0.01), neg_inf);

    // NaN != NaN, so compare bit patterns
    let nan = ParticleState::from_array([1.0, 2.0, 3.0, 4.0, f32::NAN, 6.0]);
    let next = step(&nan, &fields, &constants, 0.01);
    let bits = |s: &ParticleState| s.to_array().map(f32::to_bits);
    assert_eq!(bits(&next), bits(&nan));
}
