//! Simulation observer trait for progress reporting and data collection.

use flock_agent::{Boid, Predator};
use flock_core::{AgentId, DVec2, SimClock, Step};

// ── Step results ──────────────────────────────────────────────────────────────

/// One prey removed by a successful attack.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Catch {
    /// The predator credited with the catch.  When several predators catch
    /// the same prey in one step, the first in collection order wins.
    pub predator: AgentId,
    pub prey:     AgentId,
    /// Where the prey was when it was caught.
    pub position: DVec2,
}

/// What happened during one call to
/// [`SimEngine::update`][crate::SimEngine::update].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepReport {
    /// The step that was processed (the clock has since advanced past it).
    pub step: Step,

    /// Length of the step in seconds.
    pub dt: f64,

    /// Prey removed this step, in descending index order.
    pub catches: Vec<Catch>,
}

impl StepReport {
    #[inline]
    pub fn caught(&self) -> usize {
        self.catches.len()
    }
}

/// Read-only view of the world at the end of a step.
pub struct StepView<'a> {
    pub report:    &'a StepReport,
    /// The clock after advancing past `report.step`.
    pub clock:     SimClock,
    pub prey:      &'a [Boid],
    pub predators: &'a [Predator],
}

// ── SimObserver ───────────────────────────────────────────────────────────────

/// Callbacks invoked by [`SimEngine::run`][crate::SimEngine::run] and
/// [`SimEngine::run_steps`][crate::SimEngine::run_steps] at key points in the
/// step loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  Observers see the world read-only and
/// cannot influence the run.
///
/// # Example: catch printer
///
/// ```rust,ignore
/// struct CatchPrinter;
///
/// impl SimObserver for CatchPrinter {
///     fn on_catch(&mut self, step: Step, catch: &Catch) {
///         println!("{step}: {} caught {}", catch.predator, catch.prey);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each step, before any processing.
    fn on_step_start(&mut self, _step: Step) {}

    /// Called once per prey removed during the step.
    fn on_catch(&mut self, _step: Step, _catch: &Catch) {}

    /// Called at the end of each step.
    fn on_step_end(&mut self, _view: &StepView<'_>) {}

    /// Called after `on_step_end` every `config.snapshot_interval` steps.
    fn on_snapshot(&mut self, _view: &StepView<'_>) {}

    /// Called when the engine is reset.
    fn on_reset(&mut self) {}

    /// Called once after the final step of `run`.
    fn on_sim_end(&mut self, _clock: &SimClock) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Fan out every callback to two observers, first `.0` then `.1`.
impl<A: SimObserver, B: SimObserver> SimObserver for (A, B) {
    fn on_step_start(&mut self, step: Step) {
        self.0.on_step_start(step);
        self.1.on_step_start(step);
    }

    fn on_catch(&mut self, step: Step, catch: &Catch) {
        self.0.on_catch(step, catch);
        self.1.on_catch(step, catch);
    }

    fn on_step_end(&mut self, view: &StepView<'_>) {
        self.0.on_step_end(view);
        self.1.on_step_end(view);
    }

    fn on_snapshot(&mut self, view: &StepView<'_>) {
        self.0.on_snapshot(view);
        self.1.on_snapshot(view);
    }

    fn on_reset(&mut self) {
        self.0.on_reset();
        self.1.on_reset();
    }

    fn on_sim_end(&mut self, clock: &SimClock) {
        self.0.on_sim_end(clock);
        self.1.on_sim_end(clock);
    }
}

/// An absent observer ignores every callback.
impl<O: SimObserver> SimObserver for Option<O> {
    fn on_step_start(&mut self, step: Step) {
        if let Some(o) = self {
            o.on_step_start(step);
        }
    }

    fn on_catch(&mut self, step: Step, catch: &Catch) {
        if let Some(o) = self {
            o.on_catch(step, catch);
        }
    }

    fn on_step_end(&mut self, view: &StepView<'_>) {
        if let Some(o) = self {
            o.on_step_end(view);
        }
    }

    fn on_snapshot(&mut self, view: &StepView<'_>) {
        if let Some(o) = self {
            o.on_snapshot(view);
        }
    }

    fn on_reset(&mut self) {
        if let Some(o) = self {
            o.on_reset();
        }
    }

    fn on_sim_end(&mut self, clock: &SimClock) {
        if let Some(o) = self {
            o.on_sim_end(clock);
        }
    }
}
