//! Per-step heading-change policy applied by `Boid::set_desired_acceleration`.

use flock_core::DVec2;
use flock_core::geo::{heading_deg, rotate_deg};

/// How far a new steering direction may turn away from the current heading
/// reference in a single step.
///
/// The shipped behaviour is [`Unlimited`](Self::Unlimited): the desired
/// direction passes through unchanged.  [`Clamped`](Self::Clamped) caps the
/// turn at the agent's `max_rotation_angle_deg`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RotationPolicy {
    #[default]
    Unlimited,
    Clamped,
}

impl RotationPolicy {
    /// Limit `desired` relative to `heading`.  Both inputs are unit vectors;
    /// the result is a unit vector.
    pub fn limit(self, heading: DVec2, desired: DVec2, max_angle_deg: f64) -> DVec2 {
        match self {
            RotationPolicy::Unlimited => desired,
            RotationPolicy::Clamped => clamp_rotation(heading, desired, max_angle_deg),
        }
    }
}

fn clamp_rotation(heading: DVec2, desired: DVec2, max_angle_deg: f64) -> DVec2 {
    // Raw difference of polar angles, in (-360, 360).
    let angle = heading_deg(desired) - heading_deg(heading);
    let wrapped = angle.rem_euclid(360.0);
    let turn = wrapped.min(360.0 - wrapped);
    if turn <= max_angle_deg {
        return desired;
    }

    let clockwise = (-180.0..=0.0).contains(&angle) || angle > 180.0;
    let sign = if clockwise { -1.0 } else { 1.0 };
    rotate_deg(heading, sign * max_angle_deg)
}
