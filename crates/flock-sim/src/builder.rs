//! Fluent builder for constructing a [`SimEngine`].

use flock_agent::{Boid, Predator};
use flock_behavior::Behavior;
use flock_core::SimConfig;

use crate::{SimEngine, SimResult};

/// Fluent builder for [`SimEngine<P, H>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: world, `dt`, seed
/// - `P: Behavior<Friendly = Boid, Enemy = Predator>`: prey steering
/// - `H: Behavior<Friendly = Predator, Enemy = Boid>`: predator steering
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default          |
/// |-------------------|------------------|
/// | `.prey(v)`        | no prey          |
/// | `.predators(v)`   | no predators     |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, prey_behavior, PredatorStrategy::Nearest.build(hunt)?)
///     .prey(seed_prey_grid(200, &config.world, &BoidParams::prey())?)
///     .predators(seed_predator_column(3, &config.world, &BoidParams::predator(), config.seed)?)
///     .build()?;
/// sim.run(config.max_time, &mut NoopObserver)?;
/// ```
pub struct SimBuilder<P, H> {
    config:        SimConfig,
    prey_behavior: P,
    hunt_behavior: H,
    prey:          Vec<Boid>,
    predators:     Vec<Predator>,
}

impl<P, H> SimBuilder<P, H>
where
    P: Behavior<Friendly = Boid, Enemy = Predator>,
    H: Behavior<Friendly = Predator, Enemy = Boid>,
{
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, prey_behavior: P, hunt_behavior: H) -> Self {
        Self {
            config,
            prey_behavior,
            hunt_behavior,
            prey:      Vec::new(),
            predators: Vec::new(),
        }
    }

    /// Supply the initial prey.  May be called repeatedly; populations append.
    pub fn prey(mut self, prey: Vec<Boid>) -> Self {
        self.prey.extend(prey);
        self
    }

    /// Supply the initial predators.  May be called repeatedly.
    pub fn predators(mut self, predators: Vec<Predator>) -> Self {
        self.predators.extend(predators);
        self
    }

    /// Validate the configuration and every agent id, and return a ready-to-run
    /// [`SimEngine`].
    pub fn build(self) -> SimResult<SimEngine<P, H>> {
        let mut engine = SimEngine::new(self.config, self.prey_behavior, self.hunt_behavior)?;
        for boid in self.prey {
            engine.add_prey(boid)?;
        }
        for predator in self.predators {
            engine.add_predator(predator)?;
        }
        Ok(engine)
    }
}
