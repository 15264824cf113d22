//! The `SimEngine` struct and its step pipeline.

use flock_agent::{Boid, Predator};
use flock_behavior::{Behavior, StepContext};
use flock_core::{AgentId, SimClock, SimConfig, Step, Torus, ensure_positive};
use rustc_hash::FxHashSet;
use tracing::{debug, info};

use crate::observer::{Catch, StepReport, StepView};
use crate::{SimError, SimObserver, SimResult};

// ── SimEngine ─────────────────────────────────────────────────────────────────

/// The simulation runner.
///
/// `SimEngine<P, H>` owns both populations and drives the fixed per-step
/// pipeline:
///
/// 1. **Attacks**: every predator attempts [`Predator::attack_prey`] against
///    the full prey collection; caught indices are unioned.
/// 2. **Removal**: caught prey are removed in descending index order.  Every
///    predator whose selected-prey handle named a removed prey forgets it.
/// 3. **Prey steering**: `P` over the shrunk prey collection.
/// 4. **Predator steering**: `H` over the predators against the prey.
/// 5. **Integration**: each prey integrates, rolls its acceleration over,
///    loses its targeted flag and wraps; each predator integrates, rolls
///    over, wraps and re-marks its selected prey as targeted.
/// 6. **Clock**: step counter and elapsed time advance by `dt`.
///
/// No agent moves before every agent's steering for the step has been
/// computed, so all forces derive from one consistent snapshot.
///
/// Create via [`SimEngine::new`] or [`SimBuilder`][crate::SimBuilder].
pub struct SimEngine<P, H> {
    config:    SimConfig,
    torus:     Torus,
    clock:     SimClock,
    prey:      Vec<Boid>,
    predators: Vec<Predator>,

    /// Every id added since the last reset, caught prey included.
    ids: FxHashSet<AgentId>,

    prey_behavior: P,
    hunt_behavior: H,
}

impl<P, H> SimEngine<P, H>
where
    P: Behavior<Friendly = Boid, Enemy = Predator>,
    H: Behavior<Friendly = Predator, Enemy = Boid>,
{
    /// Validate `config` and create an empty engine.
    pub fn new(config: SimConfig, prey_behavior: P, hunt_behavior: H) -> SimResult<Self> {
        config.validate()?;
        Ok(Self {
            torus: config.world.torus(),
            config,
            clock: SimClock::new(),
            prey: Vec::new(),
            predators: Vec::new(),
            ids: FxHashSet::default(),
            prey_behavior,
            hunt_behavior,
        })
    }

    // ── Population ────────────────────────────────────────────────────────

    /// Add a prey.  Its id must lie in the prey range and be new to this run.
    pub fn add_prey(&mut self, boid: Boid) -> SimResult<()> {
        let id = boid.id();
        if !id.is_prey() {
            return Err(SimError::WrongIdRange { id, expected: "prey" });
        }
        self.register(id)?;
        self.prey.push(boid);
        Ok(())
    }

    /// Add a predator.  Its id must lie in the predator range and be new to
    /// this run.
    pub fn add_predator(&mut self, predator: Predator) -> SimResult<()> {
        let id = predator.id();
        if !id.is_predator() {
            return Err(SimError::WrongIdRange { id, expected: "predator" });
        }
        self.register(id)?;
        self.predators.push(predator);
        Ok(())
    }

    fn register(&mut self, id: AgentId) -> SimResult<()> {
        if self.ids.insert(id) {
            Ok(())
        } else {
            Err(SimError::DuplicateId(id))
        }
    }

    /// Clear both populations and rewind the clock.
    pub fn reset(&mut self) {
        info!(
            step      = %self.clock.current_step,
            prey      = self.prey.len(),
            predators = self.predators.len(),
            "engine reset",
        );
        self.prey.clear();
        self.predators.clear();
        self.ids.clear();
        self.clock.reset();
    }

    /// [`reset`](Self::reset), then notify `observer`.
    pub fn reset_observed<O: SimObserver>(&mut self, observer: &mut O) {
        self.reset();
        observer.on_reset();
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn prey(&self) -> &[Boid] {
        &self.prey
    }

    #[inline]
    pub fn predators(&self) -> &[Predator] {
        &self.predators
    }

    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[inline]
    pub fn torus(&self) -> &Torus {
        &self.torus
    }

    #[inline]
    pub fn clock(&self) -> SimClock {
        self.clock
    }

    /// Number of completed steps.
    #[inline]
    pub fn step(&self) -> Step {
        self.clock.current_step
    }

    /// Elapsed simulated seconds.
    #[inline]
    pub fn time(&self) -> f64 {
        self.clock.elapsed_secs
    }

    pub fn prey_behavior(&self) -> &P {
        &self.prey_behavior
    }

    pub fn hunt_behavior(&self) -> &H {
        &self.hunt_behavior
    }

    // ── Step ──────────────────────────────────────────────────────────────

    /// Advance the world by one step of `dt` seconds.
    pub fn update(&mut self, dt: f64) -> StepReport {
        let step = self.clock.current_step;
        let ctx = StepContext::new(&self.config.world, dt);
        let torus = self.torus;

        // ── Phase 1: attacks ──────────────────────────────────────────────
        //
        // (prey index, credited predator); an index caught by several
        // predators is credited to the first.
        let mut caught: Vec<(usize, AgentId)> = Vec::new();
        for predator in &mut self.predators {
            for idx in predator.attack_prey(&self.prey, &torus) {
                if !caught.iter().any(|&(i, _)| i == idx) {
                    caught.push((idx, predator.id()));
                }
            }
        }

        // ── Phase 2: removal, highest index first ─────────────────────────
        caught.sort_unstable_by(|a, b| b.0.cmp(&a.0));
        let mut catches = Vec::with_capacity(caught.len());
        for (idx, predator) in caught {
            let prey = self.prey.remove(idx);
            let prey_id = prey.id();
            for p in &mut self.predators {
                if p.selected_prey() == Some(prey_id) {
                    p.forget_prey();
                }
            }
            debug!(%step, %predator, prey = %prey_id, "prey caught");
            catches.push(Catch { predator, prey: prey_id, position: prey.position() });
        }

        // ── Phases 3–4: steering ──────────────────────────────────────────
        self.prey_behavior.update(&mut self.prey, &self.predators, &ctx);
        self.hunt_behavior.update(&mut self.predators, &self.prey, &ctx);

        // ── Phase 5: integration and housekeeping ─────────────────────────
        for boid in &mut self.prey {
            boid.update(dt);
            boid.rollover_acceleration();
            boid.set_targeted(false);
            boid.rollover_coordinates(&torus);
        }
        for predator in &mut self.predators {
            let boid = predator.boid_mut();
            boid.update(dt);
            boid.rollover_acceleration();
            boid.rollover_coordinates(&torus);

            if let Some(id) = predator.selected_prey() {
                if let Some(target) = self.prey.iter_mut().find(|p| p.id() == id) {
                    target.set_targeted(true);
                }
            }
        }

        // ── Phase 6: clock ────────────────────────────────────────────────
        self.clock.advance(dt);

        StepReport { step, dt, catches }
    }

    // ── Run loops ─────────────────────────────────────────────────────────

    /// Step with `config.dt` until elapsed time exceeds `max_time`.
    ///
    /// Calls observer hooks at every step boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, max_time: f64, observer: &mut O) -> SimResult<()> {
        ensure_positive("max_time", max_time)?;
        info!(
            prey      = self.prey.len(),
            predators = self.predators.len(),
            prey_behavior = self.prey_behavior.name(),
            hunt_behavior = self.hunt_behavior.name(),
            max_time,
            "simulation started",
        );

        while self.clock.elapsed_secs <= max_time {
            self.observed_step(observer);
        }
        observer.on_sim_end(&self.clock);

        info!(
            steps     = self.clock.current_step.0,
            prey      = self.prey.len(),
            predators = self.predators.len(),
            time      = self.clock.elapsed_secs,
            "simulation finished",
        );
        Ok(())
    }

    /// Run exactly `n` steps of `config.dt` (ignores `max_time`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_steps<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.observed_step(observer);
        }
    }

    fn observed_step<O: SimObserver>(&mut self, observer: &mut O) {
        let step = self.clock.current_step;
        observer.on_step_start(step);

        let report = self.update(self.config.dt);
        for catch in &report.catches {
            observer.on_catch(step, catch);
        }

        let view = StepView {
            report:    &report,
            clock:     self.clock,
            prey:      &self.prey,
            predators: &self.predators,
        };
        observer.on_step_end(&view);
        if self.config.snapshot_interval > 0
            && step.0.is_multiple_of(self.config.snapshot_interval)
        {
            observer.on_snapshot(&view);
        }
    }
}
