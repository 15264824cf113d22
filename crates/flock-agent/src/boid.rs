//! The `Boid` kinematic core shared by prey and predators.
//!
//! # Double-buffered acceleration
//!
//! `acceleration` holds an `(applied, pending)` pair.  Behaviours write only
//! the pending half through [`Boid::set_desired_acceleration`] while every
//! other agent is still in its pre-step state; [`Boid::update`] integrates
//! with the pending value and [`Boid::rollover_acceleration`] then shifts it
//! into the applied slot for use as next step's heading reference.

use flock_core::geo::{NEAR_ZERO_SQ, heading_deg, is_usable, scale_to_length};
use flock_core::{AgentId, DVec2, Torus};

use crate::{BoidParams, RotationPolicy};

/// Trail samples kept before a non-targeted agent starts a fresh trail.
pub const MAX_TRAIL_LEN: usize = 100;

/// A jump longer than this between consecutive trail samples (a wrap-around
/// teleport) starts a fresh trail.
pub const TRAIL_JUMP: f64 = 600.0;

/// Acceleration pair: `applied` was integrated last step, `pending`
/// accumulates this step's steering.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AccelerationBuffer {
    pub applied: DVec2,
    pub pending: DVec2,
}

/// An autonomous steering agent.
#[derive(Clone, Debug)]
pub struct Boid {
    id:               AgentId,
    params:           BoidParams,
    collision_radius: f64,
    rotation:         RotationPolicy,

    position:     DVec2,
    velocity:     DVec2,
    acceleration: AccelerationBuffer,

    predation:   bool,
    evasion:     bool,
    is_targeted: bool,

    wiggle_phase:          f64,
    escape_time_remaining: f64,

    trail: Vec<DVec2>,
}

impl Boid {
    /// Create an agent at `position` moving with `velocity`.
    ///
    /// `params` are taken as given; use [`BoidBuilder`](crate::BoidBuilder)
    /// for validated construction.
    pub fn new(id: AgentId, params: BoidParams, position: DVec2, velocity: DVec2) -> Self {
        Self {
            id,
            collision_radius: params.collision_radius(),
            escape_time_remaining: params.escape_reaction_time,
            params,
            rotation: RotationPolicy::default(),
            position,
            velocity,
            acceleration: AccelerationBuffer::default(),
            predation: false,
            evasion: false,
            is_targeted: false,
            wiggle_phase: 0.0,
            trail: Vec::new(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> AgentId {
        self.id
    }

    #[inline]
    pub fn params(&self) -> &BoidParams {
        &self.params
    }

    #[inline]
    pub fn position(&self) -> DVec2 {
        self.position
    }

    #[inline]
    pub fn set_position(&mut self, position: DVec2) {
        self.position = position;
    }

    #[inline]
    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    #[inline]
    pub fn set_velocity(&mut self, velocity: DVec2) {
        self.velocity = velocity;
    }

    /// The acceleration integrated during the previous step.
    #[inline]
    pub fn acceleration(&self) -> DVec2 {
        self.acceleration.applied
    }

    /// Steering accumulated for the current step, not yet integrated.
    #[inline]
    pub fn pending_acceleration(&self) -> DVec2 {
        self.acceleration.pending
    }

    #[inline]
    pub fn collision_radius(&self) -> f64 {
        self.collision_radius
    }

    #[inline]
    pub fn rotation_policy(&self) -> RotationPolicy {
        self.rotation
    }

    #[inline]
    pub fn set_rotation_policy(&mut self, rotation: RotationPolicy) {
        self.rotation = rotation;
    }

    /// `true` while hunting (predator) or being hunted (prey).  Selects the
    /// `max_acceleration` clamp instead of `base_acceleration`.
    #[inline]
    pub fn predation(&self) -> bool {
        self.predation
    }

    #[inline]
    pub fn set_predation(&mut self, predation: bool) {
        self.predation = predation;
    }

    #[inline]
    pub fn evasion(&self) -> bool {
        self.evasion
    }

    #[inline]
    pub fn set_evasion(&mut self, evasion: bool) {
        self.evasion = evasion;
    }

    /// Set by the engine while some predator has this agent selected.
    #[inline]
    pub fn is_targeted(&self) -> bool {
        self.is_targeted
    }

    #[inline]
    pub fn set_targeted(&mut self, targeted: bool) {
        self.is_targeted = targeted;
    }

    /// Phase of the evasive wiggle, in radians.  Persists across steps while
    /// a predator stays in view.
    #[inline]
    pub fn wiggle_phase(&self) -> f64 {
        self.wiggle_phase
    }

    #[inline]
    pub fn set_wiggle_phase(&mut self, phase: f64) {
        self.wiggle_phase = phase;
    }

    #[inline]
    pub fn escape_reaction_time(&self) -> f64 {
        self.escape_time_remaining
    }

    #[inline]
    pub fn decrease_escape_reaction_time(&mut self, amount: f64) {
        self.escape_time_remaining -= amount;
    }

    #[inline]
    pub fn reset_escape_reaction_time(&mut self) {
        self.escape_time_remaining = self.params.escape_reaction_time;
    }

    /// Recent positions, oldest first.
    #[inline]
    pub fn trail(&self) -> &[DVec2] {
        &self.trail
    }

    // ── Perception primitives ─────────────────────────────────────────────

    /// Shortest displacement from this agent to `other`.
    #[inline]
    pub fn direction_to(&self, other: &Boid, torus: &Torus) -> DVec2 {
        torus.offset(self.position, other.position)
    }

    #[inline]
    pub fn distance_squared_to(&self, other: &Boid, torus: &Torus) -> f64 {
        torus.distance_squared(self.position, other.position)
    }

    /// Unsigned angle in degrees, `[0, 180]`, between this agent's heading
    /// and the direction to `other`.
    pub fn angle_between(&self, other: &Boid, torus: &Torus) -> f64 {
        let diff = self.direction_to(other, torus);
        let angle = (heading_deg(diff) - heading_deg(self.velocity)).rem_euclid(360.0);
        angle.min(360.0 - angle)
    }

    /// `true` if some entry of `neighbors` lies at nearly the same bearing
    /// (`< occlusion_deg` apart) as a candidate seen at `angle` and is nearer
    /// than the candidate's `dist_sq`.
    pub fn is_occluded_by_neighbor(
        &self,
        angle:         f64,
        dist_sq:       f64,
        neighbors:     &[&Boid],
        torus:         &Torus,
        occlusion_deg: f64,
    ) -> bool {
        neighbors.iter().any(|n| {
            (angle - self.angle_between(n, torus)).abs() < occlusion_deg
                && self.distance_squared_to(n, torus) < dist_sq
        })
    }

    /// Indices of `neighbors` hidden behind a candidate seen at `angle` and
    /// `dist_sq`, i.e. at nearly the same bearing but farther away.
    pub fn occluded_neighbors(
        &self,
        angle:         f64,
        dist_sq:       f64,
        neighbors:     &[&Boid],
        torus:         &Torus,
        occlusion_deg: f64,
    ) -> Vec<usize> {
        neighbors
            .iter()
            .enumerate()
            .filter(|(_, n)| {
                (angle - self.angle_between(n, torus)).abs() < occlusion_deg
                    && self.distance_squared_to(n, torus) > dist_sq
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices of every entry whose collision circle overlaps this agent's.
    pub fn collide_with_others<B: AsRef<Boid>>(&self, others: &[B], torus: &Torus) -> Vec<usize> {
        others
            .iter()
            .enumerate()
            .filter_map(|(i, other)| {
                let other: &Boid = other.as_ref();
                let reach = self.collision_radius + other.collision_radius;
                (self.distance_squared_to(other, torus) <= reach * reach).then_some(i)
            })
            .collect()
    }

    // ── Steering and integration ──────────────────────────────────────────

    /// Store `desired` as this step's pending acceleration.
    ///
    /// Usable input is rescaled to `max_acceleration` (predation) or
    /// `base_acceleration`, then passed through the rotation policy relative
    /// to the applied acceleration (or the velocity when nothing was
    /// applied).  Near-zero input is stored as-is and non-finite input as
    /// zero; both act as "no force".
    pub fn set_desired_acceleration(&mut self, desired: DVec2) {
        if !desired.is_finite() {
            self.acceleration.pending = DVec2::ZERO;
            return;
        }
        if desired.length_squared() < NEAR_ZERO_SQ {
            self.acceleration.pending = desired;
            return;
        }

        let magnitude = if self.predation {
            self.params.max_acceleration
        } else {
            self.params.base_acceleration
        };
        let scaled = scale_to_length(desired, magnitude);

        let heading = if self.acceleration.applied != DVec2::ZERO {
            self.acceleration.applied
        } else {
            self.velocity
        };

        self.acceleration.pending = match (heading.try_normalize(), scaled.try_normalize()) {
            (Some(h), Some(d)) => {
                self.rotation.limit(h, d, self.params.max_rotation_angle_deg) * magnitude
            }
            _ => scaled,
        };
    }

    /// Integrate one step of `dt` seconds with the pending acceleration.
    ///
    /// Velocity is clamped into `[cruise_velocity, max_velocity]`; position
    /// advances with the pre-update velocity plus the half-step acceleration
    /// term.
    pub fn update(&mut self, dt: f64) {
        let initial_velocity = self.velocity;
        let acc = self.acceleration.pending;

        self.velocity += acc * dt;
        self.enforce_speed_bounds();

        self.position += initial_velocity * dt + acc * (dt * dt * 0.5);

        self.record_trail();
    }

    /// Shift pending into applied and zero the pending slot.
    #[inline]
    pub fn rollover_acceleration(&mut self) {
        self.acceleration.applied = self.acceleration.pending;
        self.acceleration.pending = DVec2::ZERO;
    }

    /// Wrap the position into the world when `torus.wrap` is set.
    #[inline]
    pub fn rollover_coordinates(&mut self, torus: &Torus) {
        self.position = torus.wrap_point(self.position);
    }

    fn enforce_speed_bounds(&mut self) {
        if !is_usable(self.velocity) {
            self.velocity = DVec2::X;
        }

        let speed = self.velocity.length();
        if speed > self.params.max_velocity {
            self.velocity = scale_to_length(self.velocity, self.params.max_velocity);
        } else if speed < self.params.cruise_velocity {
            self.velocity = scale_to_length(self.velocity, self.params.cruise_velocity);
        }
    }

    fn record_trail(&mut self) {
        if !self.is_targeted {
            let jumped = self.trail.len() > 1
                && self
                    .trail
                    .last()
                    .is_some_and(|last| last.distance_squared(self.position) > TRAIL_JUMP * TRAIL_JUMP);
            if self.trail.len() > MAX_TRAIL_LEN || jumped {
                self.trail.clear();
            }
        }
        self.trail.push(self.position);
    }
}

impl AsRef<Boid> for Boid {
    #[inline]
    fn as_ref(&self) -> &Boid {
        self
    }
}
