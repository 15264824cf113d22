//! Simulation time model.
//!
//! # Design
//!
//! The engine advances in discrete steps of caller-supplied length `dt`
//! (seconds).  The step counter is the canonical time unit for telemetry
//! keys; the accumulated `elapsed` seconds are kept alongside it because
//! `dt` may vary from call to call.

use std::fmt;

// ── Step ─────────────────────────────────────────────────────────────────────

/// An absolute simulation step counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step(pub u64);

impl Step {
    pub const ZERO: Step = Step(0);

    /// The step after `self`.
    #[inline]
    pub fn next(self) -> Step {
        Step(self.0 + 1)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Step counter plus elapsed simulated seconds.
///
/// `SimClock` is cheap to copy and intentionally holds no heap data.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// The current step, advanced by `SimClock::advance()` once per update.
    pub current_step: Step,
    /// Sum of every `dt` passed to `advance`.
    pub elapsed_secs: f64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by one step of `dt` seconds.
    #[inline]
    pub fn advance(&mut self, dt: f64) {
        self.current_step = self.current_step.next();
        self.elapsed_secs += dt;
    }

    /// Return to step 0, time 0.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.3} s)", self.current_step, self.elapsed_secs)
    }
}
