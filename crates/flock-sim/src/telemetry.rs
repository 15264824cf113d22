//! Run statistics gathered through the observer hooks.
//!
//! `Telemetry` only reads what the engine reports; attaching it never changes
//! a run.

use flock_core::geo::signed_angle_between;
use flock_core::{AgentId, DVec2, Step};
use rustc_hash::FxHashMap;

use crate::observer::{Catch, StepView};
use crate::SimObserver;

/// Default smallest per-step heading change, in degrees, that counts as
/// turning.
pub const DEFAULT_TURN_SIGMA_DEG: f64 = 0.1;

/// Default shortest turn, in seconds, worth recording.
pub const DEFAULT_MIN_TURN_DURATION: f64 = 0.1;

/// One completed prey turn.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Turn {
    pub agent:     AgentId,
    /// Accumulated heading change, in degrees (unsigned).
    pub angle_deg: f64,
    pub duration:  f64,
}

/// In-progress turn of one prey.
#[derive(Copy, Clone, Debug, Default)]
struct TurnState {
    prev_velocity: DVec2,
    angle_deg:     f64,
    duration:      f64,
}

/// Catch counts per step and prey turn statistics.
///
/// A prey is turning while its heading changes by at least `turn_sigma_deg`
/// per step in a consistent direction.  The turn ends on a smaller change or
/// a reversal; it is recorded when it lasted longer than
/// `min_turn_duration`.
#[derive(Debug)]
pub struct Telemetry {
    pub turn_sigma_deg:    f64,
    pub min_turn_duration: f64,

    caught:  FxHashMap<Step, usize>,
    turning: FxHashMap<AgentId, TurnState>,
    turns:   Vec<Turn>,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self {
            turn_sigma_deg:    DEFAULT_TURN_SIGMA_DEG,
            min_turn_duration: DEFAULT_MIN_TURN_DURATION,
            caught:  FxHashMap::default(),
            turning: FxHashMap::default(),
            turns:   Vec::new(),
        }
    }
}

impl Telemetry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prey caught during `step`.
    pub fn caught_at(&self, step: Step) -> usize {
        self.caught.get(&step).copied().unwrap_or(0)
    }

    /// Total prey caught during steps `0..=step`.
    pub fn caught_prey_up_to(&self, step: Step) -> usize {
        self.caught
            .iter()
            .filter(|&(s, _)| *s <= step)
            .map(|(_, n)| n)
            .sum()
    }

    pub fn total_caught(&self) -> usize {
        self.caught.values().sum()
    }

    /// Completed turns, in completion order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of prey with turn state held.
    pub fn tracked_prey(&self) -> usize {
        self.turning.len()
    }

    pub fn clear(&mut self) {
        self.caught.clear();
        self.turning.clear();
        self.turns.clear();
    }

    fn track_turn(&mut self, agent: AgentId, velocity: DVec2, dt: f64) {
        let state = self.turning.entry(agent).or_insert_with(|| TurnState {
            prev_velocity: velocity,
            ..TurnState::default()
        });

        // Heading change from the current velocity back to the previous one.
        let angle = signed_angle_between(velocity, state.prev_velocity).to_degrees();
        let reversed = state.angle_deg != 0.0 && angle.signum() != state.angle_deg.signum();

        if angle.abs() < self.turn_sigma_deg || reversed {
            if state.duration > self.min_turn_duration {
                self.turns.push(Turn {
                    agent,
                    angle_deg: state.angle_deg.abs(),
                    duration:  state.duration,
                });
            }
            state.angle_deg = 0.0;
            state.duration = 0.0;
        } else {
            state.angle_deg += angle;
            state.duration += dt;
        }
        state.prev_velocity = velocity;
    }
}

impl SimObserver for Telemetry {
    fn on_catch(&mut self, step: Step, catch: &Catch) {
        *self.caught.entry(step).or_insert(0) += 1;
        // A caught prey's unfinished turn is dropped.
        self.turning.remove(&catch.prey);
    }

    fn on_step_end(&mut self, view: &StepView<'_>) {
        let dt = view.report.dt;
        for boid in view.prey {
            self.track_turn(boid.id(), boid.velocity(), dt);
        }
    }

    fn on_reset(&mut self) {
        self.clear();
    }
}
