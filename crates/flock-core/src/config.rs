//! World- and run-level configuration.
//!
//! Both structs are immutable inputs handed to the engine at construction;
//! nothing in the simulation reads ambient globals.  With the `serde`
//! feature they deserialize from partial documents: missing fields take
//! their `Default` value.

use crate::error::{ensure_in_range, ensure_positive};
use crate::{FlockResult, Torus};

// ── WorldConfig ───────────────────────────────────────────────────────────────

/// Extent and topology of the simulated plane.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldConfig {
    /// World width in world units.
    pub width: f64,

    /// World height in world units.
    pub height: f64,

    /// Glue opposite edges together (toroidal metric and position wrapping).
    pub toroidal: bool,

    /// Two perceived agents whose bearings differ by less than this many
    /// degrees occlude one another; only the nearer one is kept.  The default
    /// of 0 disables occlusion culling entirely.
    pub occlusion_angle_deg: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width:               1_000.0,
            height:              1_000.0,
            toroidal:            true,
            occlusion_angle_deg: 0.0,
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> FlockResult<()> {
        ensure_positive("world.width", self.width)?;
        ensure_positive("world.height", self.height)?;
        ensure_in_range("world.occlusion_angle_deg", self.occlusion_angle_deg, 0.0, 180.0)
    }

    /// The metric used by every distance query.
    #[inline]
    pub fn torus(&self) -> Torus {
        Torus::from(self)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// the simulation builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    pub world: WorldConfig,

    /// Seconds per step used by the engine's `run` loop.
    pub dt: f64,

    /// Stop once elapsed simulated time exceeds this many seconds.
    pub max_time: f64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Report an agent snapshot to observers every N steps.  0 disables
    /// snapshots.
    pub snapshot_interval: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world:             WorldConfig::default(),
            dt:                0.02,
            max_time:          60.0,
            seed:              42,
            snapshot_interval: 50,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> FlockResult<()> {
        self.world.validate()?;
        ensure_positive("dt", self.dt)?;
        ensure_positive("max_time", self.max_time)
    }
}
