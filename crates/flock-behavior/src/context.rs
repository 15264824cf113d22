//! Per-step read-only state passed to every behavior call.

use flock_core::{Torus, WorldConfig};

/// World metric and timing shared by all behavior calls of one step.
///
/// Built once per step by flock-sim.  `StepContext` is `Copy`; behaviors take
/// it by reference and must not retain it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepContext {
    /// Toroidal (or open) world metric used for every offset and distance.
    pub torus: Torus,

    /// Angular threshold of the occlusion filter, in degrees.  `0` disables
    /// occlusion culling.
    pub occlusion_angle_deg: f64,

    /// Length of the current step in seconds.
    pub dt: f64,
}

impl StepContext {
    #[inline]
    pub fn new(world: &WorldConfig, dt: f64) -> Self {
        Self {
            torus:               world.torus(),
            occlusion_angle_deg: world.occlusion_angle_deg,
            dt,
        }
    }
}
