pub mod config;
pub mod engine;
pub mod error;
pub mod integrator;
pub mod runtime;
pub mod simulation;
pub mod trajectory;

pub use config::ScenarioConfig;
pub use engine::{lorentz_acceleration, FieldVector, ParticleState, PhysicalConstants};
pub use error::{Error, Result};
pub use glam;
pub use integrator::step;
pub use runtime::{
    build_simulation, build_simulation_from_source, run_scenario, run_scenario_source,
    SimulationResult,
};
pub use simulation::{PendingTick, Phase, Simulation, TickOutcome, Timing};
pub use trajectory::Trajectory;
