//! Weighted flocking for the prey population.
//!
//! Six additive contributions per prey per step:
//!
//! | Term       | Direction                                                     |
//! |------------|---------------------------------------------------------------|
//! | separation | away from perceived neighbours closer than `separation_distance` |
//! | cohesion   | mean unit vector toward perceived neighbours                  |
//! | alignment  | mean neighbour velocity minus own velocity                    |
//! | wiggle     | own velocity, swung sinusoidally while a predator is in view  |
//! | dodge      | broadside, away from the side a perceived predator heads to   |
//! | repel      | away from each perceived predator closer than `repel_distance` |

use flock_agent::{Boid, Predator};
use flock_core::geo::{perp, rotate_deg, signed_angle_between};
use flock_core::{DVec2, ensure_in_range, ensure_positive};

use crate::perception::{FieldOfView, perceive};
use crate::{Behavior, BehaviorResult, StepContext};

// ── Configuration ─────────────────────────────────────────────────────────────

/// Perception limits and steering weights of the prey population.
///
/// All `*_coef` fields must lie in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PreyConfig {
    pub perception_radius:   f64,
    pub separation_distance: f64,

    /// Half-width of the field of view, in degrees.
    pub fov_deg: f64,

    pub separation_coef: f64,
    pub cohesion_coef:   f64,
    pub alignment_coef:  f64,
    pub wiggle_coef:     f64,
    pub dodge_coef:      f64,
    pub repel_coef:      f64,

    pub repel_distance: f64,

    /// Peak swing of the evasive wiggle, in degrees.
    pub wiggle_amplitude_deg: f64,

    /// Angular frequency of the evasive wiggle, in radians per second.
    pub wiggle_frequency: f64,
}

impl Default for PreyConfig {
    fn default() -> Self {
        Self {
            perception_radius:    100.0,
            separation_distance:  25.0,
            fov_deg:              135.0,
            separation_coef:      0.6,
            cohesion_coef:        0.3,
            alignment_coef:       0.5,
            wiggle_coef:          0.2,
            dodge_coef:           0.4,
            repel_coef:           0.8,
            repel_distance:       60.0,
            wiggle_amplitude_deg: 30.0,
            wiggle_frequency:     14.0,
        }
    }
}

impl PreyConfig {
    pub fn validate(&self) -> BehaviorResult<()> {
        ensure_positive("perception_radius", self.perception_radius)?;
        ensure_in_range("separation_distance", self.separation_distance, 0.0, f64::MAX)?;
        ensure_in_range("fov_deg", self.fov_deg, 0.0, 180.0)?;
        ensure_in_range("separation_coef", self.separation_coef, 0.0, 1.0)?;
        ensure_in_range("cohesion_coef", self.cohesion_coef, 0.0, 1.0)?;
        ensure_in_range("alignment_coef", self.alignment_coef, 0.0, 1.0)?;
        ensure_in_range("wiggle_coef", self.wiggle_coef, 0.0, 1.0)?;
        ensure_in_range("dodge_coef", self.dodge_coef, 0.0, 1.0)?;
        ensure_in_range("repel_coef", self.repel_coef, 0.0, 1.0)?;
        ensure_in_range("repel_distance", self.repel_distance, 0.0, f64::MAX)?;
        ensure_in_range("wiggle_amplitude_deg", self.wiggle_amplitude_deg, 0.0, 180.0)?;
        ensure_in_range("wiggle_frequency", self.wiggle_frequency, 0.0, f64::MAX)?;
        Ok(())
    }

    #[inline]
    pub fn field_of_view(&self) -> FieldOfView {
        FieldOfView { radius: self.perception_radius, angle_deg: self.fov_deg }
    }
}

// ── Steering ──────────────────────────────────────────────────────────────────

/// Output of the compute phase for one prey, applied sequentially afterwards.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Steering {
    pub desired:      DVec2,
    pub predation:    bool,
    pub wiggle_phase: f64,
}

/// Weighted six-term flocking with predator evasion.
#[derive(Clone, Debug)]
pub struct WeightedPreyBehavior {
    config: PreyConfig,
}

impl WeightedPreyBehavior {
    /// Validate `config` and build the behavior.
    pub fn new(config: PreyConfig) -> BehaviorResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PreyConfig {
        &self.config
    }

    /// Compute the steering of `prey[index]` from the pre-step snapshot.
    pub fn steer(
        &self,
        index:     usize,
        prey:      &[Boid],
        predators: &[Predator],
        ctx:       &StepContext,
    ) -> Steering {
        let cfg = &self.config;
        let me = &prey[index];
        let fov = cfg.field_of_view();
        let velocity = me.velocity();

        let neighbors = perceive(me, prey, Some(index), fov, ctx);
        let threats = perceive(me, predators, None, fov, ctx);
        let predation = !threats.is_empty();

        // Flocking.
        let sep_sq = cfg.separation_distance * cfg.separation_distance;
        let mut separation = DVec2::ZERO;
        let mut cohesion = DVec2::ZERO;
        let mut alignment = DVec2::ZERO;
        for n in &neighbors {
            if n.dist_sq < sep_sq {
                separation -= n.offset;
            }
            cohesion += n.offset.normalize_or_zero();
            alignment += n.boid.velocity();
        }
        if !neighbors.is_empty() {
            let k = neighbors.len() as f64;
            cohesion /= k;
            alignment /= k;
        }
        alignment -= velocity;

        // Wiggle: the phase only advances while a predator stays in view.
        let (wiggle, wiggle_phase) = if predation {
            let phase = me.wiggle_phase() + cfg.wiggle_frequency * ctx.dt;
            (rotate_deg(velocity, cfg.wiggle_amplitude_deg * phase.sin()), phase)
        } else {
            (velocity, 0.0)
        };

        // Evasion.
        let mut dodge = DVec2::ZERO;
        for t in &threats {
            let side = -signed_angle_between(t.boid.velocity(), velocity);
            dodge += perp(velocity) * cfg.dodge_coef.copysign(side);
        }

        let repel_sq = cfg.repel_distance * cfg.repel_distance;
        let mut repel = DVec2::ZERO;
        for t in threats.iter().filter(|t| t.dist_sq < repel_sq) {
            repel -= t.offset * cfg.repel_coef;
        }

        let desired = separation * cfg.separation_coef
            + cohesion * cfg.cohesion_coef
            + alignment * cfg.alignment_coef
            + wiggle * cfg.wiggle_coef
            + dodge
            + repel;

        Steering { desired, predation, wiggle_phase }
    }

    /// Compute phase: one [`Steering`] per prey, from an immutable snapshot.
    pub fn compute(
        &self,
        prey:      &[Boid],
        predators: &[Predator],
        ctx:       &StepContext,
    ) -> Vec<Steering> {
        #[cfg(not(feature = "parallel"))]
        {
            (0..prey.len())
                .map(|i| self.steer(i, prey, predators, ctx))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            (0..prey.len())
                .into_par_iter()
                .map(|i| self.steer(i, prey, predators, ctx))
                .collect()
        }
    }
}

impl Behavior for WeightedPreyBehavior {
    type Friendly = Boid;
    type Enemy    = Predator;

    fn name(&self) -> &'static str {
        "WeightedPrey"
    }

    fn update(&self, prey: &mut [Boid], predators: &[Predator], ctx: &StepContext) {
        let steering = self.compute(prey, predators, ctx);

        // Apply phase.  Predation goes first: it selects the magnitude clamp
        // used by `set_desired_acceleration`.
        for (boid, s) in prey.iter_mut().zip(steering) {
            boid.set_predation(s.predation);
            boid.set_wiggle_phase(s.wiggle_phase);
            boid.set_desired_acceleration(s.desired);
        }
    }
}
