//! Fluent builder for constructing validated [`Boid`]s and [`Predator`]s.
//!
//! # Usage
//!
//! ```rust
//! use flock_agent::{BoidBuilder, BoidParams};
//! use flock_core::{AgentId, DVec2};
//!
//! let prey = BoidBuilder::new(AgentId::prey(0), BoidParams::prey())
//!     .position(DVec2::new(100.0, 50.0))
//!     .velocity(DVec2::new(60.0, 0.0))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(prey.position(), DVec2::new(100.0, 50.0));
//! ```

use flock_core::{AgentId, DVec2, FlockError, FlockResult};

use crate::predator::DEFAULT_REST_DURATION;
use crate::{Boid, BoidParams, Predator, RotationPolicy};

/// Fluent builder for [`Boid`] and [`Predator`].
///
/// Unset fields default to the origin, a zero velocity (reset to a unit
/// heading on the first integration step) and [`RotationPolicy::Unlimited`].
pub struct BoidBuilder {
    id:            AgentId,
    params:        BoidParams,
    position:      DVec2,
    velocity:      DVec2,
    rotation:      RotationPolicy,
    rest_duration: f64,
}

impl BoidBuilder {
    pub fn new(id: AgentId, params: BoidParams) -> Self {
        Self {
            id,
            params,
            position:      DVec2::ZERO,
            velocity:      DVec2::ZERO,
            rotation:      RotationPolicy::default(),
            rest_duration: DEFAULT_REST_DURATION,
        }
    }

    pub fn position(mut self, position: DVec2) -> Self {
        self.position = position;
        self
    }

    pub fn velocity(mut self, velocity: DVec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn rotation(mut self, rotation: RotationPolicy) -> Self {
        self.rotation = rotation;
        self
    }

    /// Rest period after a catch.  Only used by [`build_predator`](Self::build_predator).
    pub fn rest_duration(mut self, secs: f64) -> Self {
        self.rest_duration = secs;
        self
    }

    /// Validate the parameters and construct a prey [`Boid`].
    pub fn build(self) -> FlockResult<Boid> {
        self.params.validate()?;
        if !self.position.is_finite() || !self.velocity.is_finite() {
            return Err(FlockError::Config(format!(
                "agent {} has a non-finite initial state",
                self.id
            )));
        }
        let mut boid = Boid::new(self.id, self.params, self.position, self.velocity);
        boid.set_rotation_policy(self.rotation);
        Ok(boid)
    }

    /// Validate and construct a [`Predator`] whose RNG stream derives from
    /// `seed`.
    pub fn build_predator(self, seed: u64) -> FlockResult<Predator> {
        let rest = self.rest_duration;
        flock_core::ensure_in_range("rest_duration", rest, 0.0, f64::MAX)?;
        Ok(Predator::new(self.build()?, seed).with_rest_duration(rest))
    }
}
