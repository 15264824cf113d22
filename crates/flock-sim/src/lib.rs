//! `flock-sim` — step pipeline orchestrator for the flock simulator.
//!
//! # Step pipeline
//!
//! ```text
//! every update(dt):
//!   ① Attacks   — each predator tries attack_prey on the full prey list;
//!                 caught indices are unioned.
//!   ② Removal   — caught prey removed, highest index first; predators
//!                 whose handle named a removed prey forget it.
//!   ③ Prey      — prey Behavior (compute phase parallel with `parallel`).
//!   ④ Predators — hunt Behavior.
//!   ⑤ Integrate — update(dt), rollover acceleration, clear/re-mark
//!                 targeted flags, wrap on a torus.
//!   ⑥ Clock     — step += 1, time += dt.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `parallel` | Runs the prey compute phase on Rayon's thread pool.        |
//! | `serde`    | Serde derives on every configuration type.                 |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use flock_agent::BoidParams;
//! use flock_behavior::{HuntConfig, PredatorStrategy, PreyConfig, WeightedPreyBehavior};
//! use flock_core::SimConfig;
//! use flock_sim::{NoopObserver, SimBuilder, seed_predator_column, seed_prey_grid};
//!
//! let config = SimConfig::default();
//! let mut sim = SimBuilder::new(
//!         config.clone(),
//!         WeightedPreyBehavior::new(PreyConfig::default())?,
//!         PredatorStrategy::Peripheral.build(HuntConfig::default())?,
//!     )
//!     .prey(seed_prey_grid(100, &config.world, &BoidParams::prey())?)
//!     .predators(seed_predator_column(2, &config.world, &BoidParams::predator(), config.seed)?)
//!     .build()?;
//! sim.run(config.max_time, &mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod population;
pub mod sim;
pub mod telemetry;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{Catch, NoopObserver, SimObserver, StepReport, StepView};
pub use population::{seed_predator_column, seed_prey_grid, seed_prey_scatter};
pub use sim::SimEngine;
pub use telemetry::{Telemetry, Turn};
