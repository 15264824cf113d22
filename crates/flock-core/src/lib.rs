//! `flock-core` — foundational types for the flock predator-prey simulator.
//!
//! This crate is a dependency of every other `flock-*` crate.  It
//! intentionally has no `flock-*` dependencies and minimal external ones
//! (`glam`, `rand` and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `AgentId` with disjoint prey / predator ranges            |
//! | [`geo`]         | `DVec2` helpers, signed angles, `Torus` metric            |
//! | [`time`]        | `Step`, `SimClock`                                        |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)                 |
//! | [`config`]      | `WorldConfig`, `SimConfig`                                |
//! | [`error`]       | `FlockError`, `FlockResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{SimConfig, WorldConfig};
pub use error::{FlockError, FlockResult, ensure_in_range, ensure_positive};
pub use geo::{DVec2, Torus};
pub use ids::{AgentId, PREDATOR_ID_BASE};
pub use rng::{AgentRng, SimRng};
pub use time::{SimClock, Step};
