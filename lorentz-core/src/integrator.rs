use crate::engine::{lorentz_acceleration, FieldVector, ParticleState, PhysicalConstants};

/// Advance the state by dt using explicit Euler integration
///
/// Both updates use the pre-step velocity: x += v*dt, then v += a*dt.
/// A state with a non-finite component is returned unchanged.
pub fn step(
    state: &ParticleState,
    fields: &FieldVector,
    constants: &PhysicalConstants,
    dt: f32,
) -> ParticleState {
    if !state.is_finite() {
        log::error!("invalid state detected: {:?}", state.to_array());
        return *state;
    }

    let accel = lorentz_acceleration(state.vel, fields, constants);

    ParticleState {
        pos: state.pos + state.vel * dt,
        vel: state.vel + accel * dt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn position_uses_pre_step_velocity() {
        let state = ParticleState::from_array([0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let fields = FieldVector::new(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO);
        let next = step(&state, &fields, &PhysicalConstants::default(), 0.5);

        // Semi-implicit Euler would have moved the particle already
        assert_eq!(next.pos, Vec3::ZERO);
        assert_eq!(next.vel, Vec3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn nan_state_is_identity() {
        let state = ParticleState::from_array([f32::NAN, 1.0, 2.0, 3.0, 4.0, 5.0]);
        let fields = FieldVector::new(Vec3::ONE, Vec3::ONE);
        let next = step(&state, &fields, &PhysicalConstants::default(), 0.01);
        assert!(next.pos.x.is_nan());
        assert_eq!(&next.to_array()[1..], &state.to_array()[1..]);
    }
}
