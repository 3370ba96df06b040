use crate::config::ScenarioConfig;
use crate::engine::ParticleState;
use crate::error::Result;
use crate::simulation::{Simulation, TickOutcome};
use glam::Vec3;

/// Final result of running a scenario headless
#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub trajectory: Vec<Vec3>,
    pub final_state: ParticleState,
    pub stalled_steps: usize,
}

/// Build a fresh simulation from a validated scenario
pub fn build_simulation(config: &ScenarioConfig) -> Result<Simulation> {
    config.validate()?;
    Ok(Simulation::new(
        config.initial_state(),
        config.field_vector(),
        config.constants(),
        config.timing(),
    ))
}

/// Parse a scenario and build a simulation from it
pub fn build_simulation_from_source(source: &str) -> Result<Simulation> {
    let config = ScenarioConfig::from_yaml(source)?;
    build_simulation(&config)
}

/// Main entry point: run a scenario to its step cap without wall-clock pacing
pub fn run_scenario(config: &ScenarioConfig) -> Result<SimulationResult> {
    let mut sim = build_simulation(config)?;
    let outcomes = sim.run_to_completion();
    let stalled_steps = outcomes
        .iter()
        .filter(|o| matches!(o, TickOutcome::Stalled { .. }))
        .count();

    Ok(SimulationResult {
        trajectory: sim.trajectory().points().to_vec(),
        final_state: *sim.state(),
        stalled_steps,
    })
}

/// Parse and run a scenario given as YAML text
pub fn run_scenario_source(source: &str) -> Result<SimulationResult> {
    let config = ScenarioConfig::from_yaml(source)?;
    run_scenario(&config)
}
