use crate::error::{Error, Result};
use glam::Vec3;

/// Position and velocity of the particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleState {
    pub pos: Vec3,
    pub vel: Vec3,
}

impl ParticleState {
    pub fn new(pos: Vec3, vel: Vec3) -> Self {
        Self { pos, vel }
    }

    /// Build a state from `[x, y, z, vx, vy, vz]`
    pub fn from_array(values: [f32; 6]) -> Self {
        let [x, y, z, vx, vy, vz] = values;
        Self {
            pos: Vec3::new(x, y, z),
            vel: Vec3::new(vx, vy, vz),
        }
    }

    /// Flatten into `[x, y, z, vx, vy, vz]`
    pub fn to_array(&self) -> [f32; 6] {
        [
            self.pos.x, self.pos.y, self.pos.z, self.vel.x, self.vel.y, self.vel.z,
        ]
    }

    /// True when all six components are finite
    pub fn is_finite(&self) -> bool {
        self.pos.is_finite() && self.vel.is_finite()
    }
}

impl Default for ParticleState {
    fn default() -> Self {
        Self::from_array([0.0, 0.0, 0.0, 2.0, 0.0, 0.5])
    }
}

/// Uniform electric and magnetic fields applied at every step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FieldVector {
    pub electric: Vec3, // V/m
    pub magnetic: Vec3, // T
}

impl FieldVector {
    pub fn new(electric: Vec3, magnetic: Vec3) -> Self {
        Self { electric, magnetic }
    }

    /// Build fields from the flat form `[Ex, Ey, Ez, Bx, By, Bz]`
    pub fn from_slice(values: &[f32]) -> Result<Self> {
        match values {
            [ex, ey, ez, bx, by, bz] => Ok(Self {
                electric: Vec3::new(*ex, *ey, *ez),
                magnetic: Vec3::new(*bx, *by, *bz),
            }),
            _ => Err(Error::FieldLength(values.len())),
        }
    }

    pub fn to_array(&self) -> [f32; 6] {
        [
            self.electric.x,
            self.electric.y,
            self.electric.z,
            self.magnetic.x,
            self.magnetic.y,
            self.magnetic.z,
        ]
    }

    pub fn is_finite(&self) -> bool {
        self.electric.is_finite() && self.magnetic.is_finite()
    }
}

/// Charge and mass of the particle, fixed for a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalConstants {
    pub charge: f32, // C
    pub mass: f32,   // kg
}

impl PhysicalConstants {
    pub fn new(charge: f32, mass: f32) -> Self {
        Self { charge, mass }
    }

    pub fn charge_to_mass(&self) -> f32 {
        self.charge / self.mass
    }
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            charge: 1.0,
            mass: 1.0,
        }
    }
}

/// Acceleration from the Lorentz force: (q/m) * (E + v x B)
pub fn lorentz_acceleration(
    vel: Vec3,
    fields: &FieldVector,
    constants: &PhysicalConstants,
) -> Vec3 {
    constants.charge_to_mass() * (fields.electric + vel.cross(fields.magnetic))
}
