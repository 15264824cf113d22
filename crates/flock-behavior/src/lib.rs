//! `flock-behavior` — steering behaviors for prey and predators.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                       |
//! |----------------|----------------------------------------------------------------|
//! | [`model`]      | `Behavior` trait                                               |
//! | [`context`]    | `StepContext` — world metric, occlusion angle and `dt`         |
//! | [`perception`] | `perceive` — radius, field-of-view and occlusion query         |
//! | [`prey`]       | `PreyConfig`, `WeightedPreyBehavior`                           |
//! | [`hunt`]       | `HuntConfig`, `HuntBehavior<S>`, the four `TargetSelector`s    |
//! | [`strategy`]   | `PredatorStrategy` (by-name selection), `BoxedHunt`            |
//! | [`noop`]       | `NoopBehavior` — agents coast                                  |
//! | [`error`]      | `BehaviorError`, `BehaviorResult<T>`                           |
//!
//! # Design notes
//!
//! The prey behavior runs in two phases:
//!
//! 1. **Compute phase** (parallel with the `parallel` feature): every prey's
//!    [`Steering`] is derived from the unchanged pre-step snapshot of both
//!    populations.
//!
//! 2. **Apply phase** (sequential): predation flags, wiggle phases and
//!    desired accelerations are written back in collection order.
//!
//! Predator behaviors mutate only the predator being processed and read the
//! prey immutably, so they run sequentially without a snapshot.

pub mod context;
pub mod error;
pub mod hunt;
pub mod model;
pub mod noop;
pub mod perception;
pub mod prey;
pub mod strategy;

#[cfg(test)]
mod tests;

pub use context::StepContext;
pub use error::{BehaviorError, BehaviorResult};
pub use hunt::{
    CentroidSelector, HuntBehavior, HuntCentroid, HuntConfig, HuntNearest, HuntPeripheral,
    HuntRandom, NearestSelector, PeripheralSelector, RandomSelector, TargetSelector,
};
pub use model::Behavior;
pub use noop::NoopBehavior;
pub use perception::{FieldOfView, Sighting, perceive};
pub use prey::{PreyConfig, Steering, WeightedPreyBehavior};
pub use strategy::{BoxedHunt, PredatorStrategy};
