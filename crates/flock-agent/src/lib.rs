//! `flock-agent` — the agent model for the flock simulator.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`params`]      | `BoidParams` — kinematic bounds and silhouette             |
//! | [`boid`]        | `Boid` — kinematics, perception primitives, integration    |
//! | [`rotation`]    | `RotationPolicy` — per-step heading-change limit           |
//! | [`predator`]    | `Predator`, `HuntingState`, attack resolution              |
//! | [`builder`]     | `BoidBuilder` (validated construction)                     |
//!
//! A predator is a `Boid` plus a hunting-state extension rather than a
//! subtype: every kinematic operation lives on `Boid`, and `Predator` exposes
//! its core through `boid()` / `boid_mut()` and `AsRef<Boid>`.

pub mod boid;
pub mod builder;
pub mod params;
pub mod predator;
pub mod rotation;


pub use boid::{AccelerationBuffer, Boid};
pub use builder::BoidBuilder;
pub use params::BoidParams;
pub use predator::{HuntingState, Predator, capture_probability};
pub use rotation::RotationPolicy;
