//! Per-population physical bounds.

use flock_core::{FlockError, FlockResult, ensure_in_range, ensure_positive};

/// Kinematic limits and silhouette of one agent population.
///
/// Speeds are world units per second, accelerations world units per second
/// squared.  The silhouette is an isosceles triangle `body_length` long and
/// `body_width` wide; its circumradius is the collision radius.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BoidParams {
    /// Lower speed clamp.
    pub cruise_velocity: f64,

    /// Upper speed clamp.
    pub max_velocity: f64,

    /// Steering magnitude while hunting or being hunted.
    pub max_acceleration: f64,

    /// Steering magnitude otherwise.
    pub base_acceleration: f64,

    /// Largest heading change per step allowed by a clamping
    /// [`RotationPolicy`](crate::RotationPolicy), in degrees.
    pub max_rotation_angle_deg: f64,

    /// Initial value of the escape-reaction countdown, in seconds.
    pub escape_reaction_time: f64,

    pub body_length: f64,
    pub body_width:  f64,
}

impl BoidParams {
    /// Defaults for the prey population.
    pub fn prey() -> Self {
        Self {
            cruise_velocity:        60.0,
            max_velocity:           120.0,
            max_acceleration:       200.0,
            base_acceleration:      80.0,
            max_rotation_angle_deg: 20.0,
            escape_reaction_time:   0.5,
            body_length:            20.0,
            body_width:             12.0,
        }
    }

    /// Defaults for the predator population.
    pub fn predator() -> Self {
        Self {
            cruise_velocity:        80.0,
            max_velocity:           160.0,
            max_acceleration:       300.0,
            base_acceleration:      100.0,
            max_rotation_angle_deg: 15.0,
            escape_reaction_time:   0.0,
            body_length:            40.0,
            body_width:             24.0,
        }
    }

    pub fn validate(&self) -> FlockResult<()> {
        ensure_positive("cruise_velocity", self.cruise_velocity)?;
        ensure_positive("max_velocity", self.max_velocity)?;
        if self.cruise_velocity > self.max_velocity {
            return Err(FlockError::Config(format!(
                "cruise_velocity {} exceeds max_velocity {}",
                self.cruise_velocity, self.max_velocity
            )));
        }
        ensure_positive("max_acceleration", self.max_acceleration)?;
        ensure_positive("base_acceleration", self.base_acceleration)?;
        ensure_in_range("max_rotation_angle_deg", self.max_rotation_angle_deg, 0.0, 180.0)?;
        ensure_in_range("escape_reaction_time", self.escape_reaction_time, 0.0, f64::MAX)?;
        ensure_positive("body_length", self.body_length)?;
        ensure_positive("body_width", self.body_width)
    }

    /// Circumradius of the triangle `(L, W/2), (0, 0), (0, W)`.
    ///
    /// Two sides have length `a = sqrt(L² + W²/4)` and the area is `L·W/2`,
    /// so `R = a·a·W / (4·area) = a² / (2L)`.
    pub fn collision_radius(&self) -> f64 {
        let l = self.body_length;
        let half_w = self.body_width * 0.5;
        (l * l + half_w * half_w) / (2.0 * l)
    }
}

impl Default for BoidParams {
    fn default() -> Self {
        Self::prey()
    }
}
