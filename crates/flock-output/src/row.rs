//! Plain data row types written by output backends.

use std::fmt;

use flock_agent::{Boid, HuntingState, Predator};

/// Which population a snapshot row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentKind {
    Prey,
    Predator,
}

impl AgentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AgentKind::Prey     => "prey",
            AgentKind::Predator => "predator",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kinematic state of one agent at a given step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub step:     u64,
    pub agent_id: u32,
    pub kind:     AgentKind,
    pub x:        f64,
    pub y:        f64,
    pub vx:       f64,
    pub vy:       f64,
    /// `None` for prey.
    pub hunting_state: Option<HuntingState>,
}

impl AgentSnapshotRow {
    pub fn prey(step: u64, boid: &Boid) -> Self {
        let (p, v) = (boid.position(), boid.velocity());
        Self {
            step,
            agent_id: boid.id().0,
            kind: AgentKind::Prey,
            x: p.x,
            y: p.y,
            vx: v.x,
            vy: v.y,
            hunting_state: None,
        }
    }

    pub fn predator(step: u64, predator: &Predator) -> Self {
        Self {
            kind: AgentKind::Predator,
            hunting_state: Some(predator.state()),
            ..Self::prey(step, predator.boid())
        }
    }
}

/// Summary statistics for one simulation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSummaryRow {
    pub step: u64,
    /// Elapsed simulated seconds at the end of the step.
    pub time:                f64,
    pub prey_alive:          u64,
    pub caught:              u64,
    pub predators_attacking: u64,
    pub predators_resting:   u64,
}
