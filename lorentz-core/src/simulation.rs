//! Simulation lifecycle: start/pause control, the per-firing `tick` driver,
//! and the single pending-tick scheduler.
//!
//! The simulation never owns a timer. A driver (frame loop or headless runner)
//! calls [`Simulation::poll`] with its own clock, which fires the pending tick
//! once it is due and arms the next one `tick_interval` later.

use crate::engine::{FieldVector, ParticleState, PhysicalConstants};
use crate::error::Result;
use crate::integrator::step;
use crate::trajectory::Trajectory;
use glam::Vec3;
use std::time::{Duration, Instant};

/// Lifecycle phase, derived from the pause flag and the trajectory length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    Halted,
}

/// Result of one tick firing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// The integrator advanced and `position` was recorded as step `step`
    Advanced { step: usize, position: Vec3 },
    /// The next state was non-finite; the previous position was recorded again
    Stalled { step: usize, position: Vec3 },
    /// Fired while paused; nothing changed
    Paused,
    /// Trajectory already at `max_steps`; nothing changed
    Halted,
}

/// When the pending tick fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingTick {
    Immediately,
    At(Instant),
}

impl PendingTick {
    fn is_due(&self, now: Instant) -> bool {
        match self {
            PendingTick::Immediately => true,
            PendingTick::At(deadline) => *deadline <= now,
        }
    }
}

/// Timing parameters of a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub dt: f32,
    pub max_steps: usize,
    pub tick_interval: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            dt: 0.01,
            max_steps: 40,
            tick_interval: Duration::from_millis(1000),
        }
    }
}

/// A single charged particle advanced under uniform E and B fields
#[derive(Debug, Clone)]
pub struct Simulation {
    initial: ParticleState,
    state: ParticleState,
    fields: FieldVector,
    constants: PhysicalConstants,
    trajectory: Trajectory,
    timing: Timing,
    paused: bool,
    started: bool,
    pending: Option<PendingTick>,
}

impl Simulation {
    pub fn new(
        initial: ParticleState,
        fields: FieldVector,
        constants: PhysicalConstants,
        timing: Timing,
    ) -> Self {
        Self {
            initial,
            state: initial,
            fields,
            constants,
            trajectory: Trajectory::new(timing.max_steps),
            timing,
            paused: false,
            started: false,
            pending: None,
        }
    }

    /// Begin or resume stepping. Arms an immediate tick unless one is already pending.
    pub fn start(&mut self) {
        if self.trajectory.is_full() {
            log::info!("simulation already halted after {} steps", self.trajectory.len());
            return;
        }

        self.paused = false;
        self.started = true;
        if self.pending.is_none() {
            self.pending = Some(PendingTick::Immediately);
        }
        log::info!("simulation started");
    }

    /// Gate further ticks. A tick already pending stays queued and fires as a no-op.
    pub fn pause(&mut self) {
        if !self.paused {
            log::info!("simulation paused");
        }
        self.paused = true;
    }

    /// Replace the active fields; applies from the next step on
    pub fn set_fields(&mut self, fields: FieldVector) {
        if !fields.is_finite() {
            log::warn!("non-finite field components received: {:?}", fields.to_array());
        }
        log::info!("fields set to {:?}", fields.to_array());
        self.fields = fields;
    }

    /// Replace the active fields from `[Ex, Ey, Ez, Bx, By, Bz]`
    pub fn set_fields_from_slice(&mut self, values: &[f32]) -> Result<()> {
        let fields = FieldVector::from_slice(values)?;
        self.set_fields(fields);
        Ok(())
    }

    /// Fire one tick: integrate, record, and report the new position.
    ///
    /// Does not touch the scheduler; see [`Simulation::poll`].
    pub fn tick(&mut self) -> TickOutcome {
        if self.paused {
            return TickOutcome::Paused;
        }
        if self.trajectory.is_full() {
            return TickOutcome::Halted;
        }

        let next = step(&self.state, &self.fields, &self.constants, self.timing.dt);
        let stalled = !next.is_finite();
        if stalled {
            log::warn!(
                "rejected non-finite state {:?}, keeping {:?}",
                next.to_array(),
                self.state.to_array()
            );
        } else {
            self.state = next;
        }

        let position = self.state.pos;
        self.trajectory.push(position);
        let step = self.trajectory.len();
        log::debug!("step {}: state {:?}", step, self.state.to_array());

        if self.trajectory.is_full() {
            self.pending = None;
            log::info!("simulation halted after {} steps", step);
        }

        if stalled {
            TickOutcome::Stalled { step, position }
        } else {
            TickOutcome::Advanced { step, position }
        }
    }

    /// Fire the pending tick if it is due at `now`, then arm the next one.
    ///
    /// Returns `None` when nothing was due. A firing that lands while paused
    /// consumes the pending slot without rescheduling.
    pub fn poll(&mut self, now: Instant) -> Option<TickOutcome> {
        let pending = self.pending?;
        if !pending.is_due(now) {
            return None;
        }
        self.pending = None;

        let outcome = self.tick();
        if matches!(
            outcome,
            TickOutcome::Advanced { .. } | TickOutcome::Stalled { .. }
        ) && !self.trajectory.is_full()
        {
            self.pending = Some(PendingTick::At(now + self.timing.tick_interval));
        }
        Some(outcome)
    }

    /// Tick repeatedly until the run halts or is paused, ignoring the wall clock
    pub fn run_to_completion(&mut self) -> Vec<TickOutcome> {
        self.start();
        let mut outcomes = Vec::new();
        loop {
            match self.tick() {
                TickOutcome::Paused | TickOutcome::Halted => break,
                outcome => outcomes.push(outcome),
            }
        }
        self.pending = None;
        outcomes
    }

    pub fn phase(&self) -> Phase {
        if self.trajectory.is_full() {
            Phase::Halted
        } else if self.paused {
            Phase::Paused
        } else if self.started {
            Phase::Running
        } else {
            Phase::Idle
        }
    }

    pub fn next_tick_due(&self) -> Option<PendingTick> {
        self.pending
    }

    /// State the run started from; never recorded in the trajectory
    pub fn initial_state(&self) -> &ParticleState {
        &self.initial
    }

    pub fn state(&self) -> &ParticleState {
        &self.state
    }

    pub fn position(&self) -> Vec3 {
        self.state.pos
    }

    pub fn fields(&self) -> &FieldVector {
        &self.fields
    }

    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(
            ParticleState::default(),
            FieldVector::default(),
            PhysicalConstants::default(),
            Timing::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_simulation_is_idle_with_nothing_pending() {
        let sim = Simulation::default();
        assert_eq!(sim.phase(), Phase::Idle);
        assert_eq!(sim.next_tick_due(), None);
        assert!(sim.trajectory().is_empty());
    }

    #[test]
    fn pause_before_start_is_paused() {
        let mut sim = Simulation::default();
        sim.pause();
        assert_eq!(sim.phase(), Phase::Paused);
        assert_eq!(sim.tick(), TickOutcome::Paused);
    }

    #[test]
    fn halt_clears_pending_tick() {
        let timing = Timing {
            max_steps: 1,
            ..Timing::default()
        };
        let mut sim = Simulation::new(
            ParticleState::default(),
            FieldVector::default(),
            PhysicalConstants::default(),
            timing,
        );
        sim.start();
        let outcome = sim.poll(Instant::now());
        assert!(matches!(outcome, Some(TickOutcome::Advanced { step: 1, .. })));
        assert_eq!(sim.phase(), Phase::Halted);
        assert_eq!(sim.next_tick_due(), None);
    }
}
