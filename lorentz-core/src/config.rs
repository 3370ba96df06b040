//! Scenario files describing a single-particle run.
//!
//! Every key is optional; missing keys fall back to the built-in scenario:
//!
//! ```yaml
//! particle:
//!   position: [0.0, 0.0, 0.0]   # m
//!   velocity: [2.0, 0.0, 0.5]   # m/s
//!   charge: 1.0                 # C
//!   mass: 1.0                   # kg
//!
//! fields:
//!   electric: [0.0, 0.0, 0.0]   # V/m
//!   magnetic: [0.0, 0.0, 0.0]   # T
//!
//! simulation:
//!   dt: 0.01                    # simulated seconds per step
//!   max_steps: 40               # trajectory cap
//!   tick_interval_ms: 1000      # wall-clock delay between steps
//! ```

use crate::engine::{FieldVector, ParticleState, PhysicalConstants};
use crate::error::{Error, Result};
use crate::simulation::Timing;
use glam::Vec3;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Upper bound on `simulation.max_steps`
pub const MAX_STEPS_LIMIT: usize = 10_000_000;

/// Initial state and physical constants of the particle
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ParticleConfig {
    pub position: [f32; 3],
    pub velocity: [f32; 3],
    pub charge: f32,
    pub mass: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            velocity: [2.0, 0.0, 0.5],
            charge: 1.0,
            mass: 1.0,
        }
    }
}

/// Initial fields; not validated
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
    pub electric: [f32; 3],
    pub magnetic: [f32; 3],
}

/// Step size, step cap and pacing
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub dt: f32,
    pub max_steps: usize,
    pub tick_interval_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            dt: 0.01,
            max_steps: 40,
            tick_interval_ms: 1000,
        }
    }
}

/// Top-level scenario
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ScenarioConfig {
    pub particle: ParticleConfig,
    pub fields: FieldConfig,
    pub simulation: SimulationConfig,
}

impl ScenarioConfig {
    /// Parse and validate a scenario from YAML text
    pub fn from_yaml(source: &str) -> Result<Self> {
        let config: ScenarioConfig = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a scenario file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_yaml(&source)
    }

    pub fn validate(&self) -> Result<()> {
        let p = &self.particle;
        if !p.mass.is_finite() || p.mass <= 0.0 {
            return Err(Error::InvalidParam("mass must be finite and > 0".into()));
        }
        if !p.charge.is_finite() {
            return Err(Error::InvalidParam("charge must be finite".into()));
        }
        if !self.initial_state().is_finite() {
            return Err(Error::InvalidParam(
                "initial position and velocity must be finite".into(),
            ));
        }

        let s = &self.simulation;
        if !s.dt.is_finite() || s.dt <= 0.0 {
            return Err(Error::InvalidParam("dt must be finite and > 0".into()));
        }
        if s.max_steps == 0 || s.max_steps > MAX_STEPS_LIMIT {
            return Err(Error::InvalidParam(format!(
                "max_steps must be in 1..={}",
                MAX_STEPS_LIMIT
            )));
        }
        Ok(())
    }

    pub fn initial_state(&self) -> ParticleState {
        ParticleState::new(
            Vec3::from_array(self.particle.position),
            Vec3::from_array(self.particle.velocity),
        )
    }

    pub fn field_vector(&self) -> FieldVector {
        FieldVector::new(
            Vec3::from_array(self.fields.electric),
            Vec3::from_array(self.fields.magnetic),
        )
    }

    pub fn constants(&self) -> PhysicalConstants {
        PhysicalConstants::new(self.particle.charge, self.particle.mass)
    }

    pub fn timing(&self) -> Timing {
        Timing {
            dt: self.simulation.dt,
            max_steps: self.simulation.max_steps,
            tick_interval: Duration::from_millis(self.simulation.tick_interval_ms),
        }
    }
}
