//! Planar geometry helpers and the toroidal world metric.
//!
//! Vectors are `glam::DVec2` (double precision).  All neighbour queries go
//! through [`Torus::offset`], which degenerates to plain `b - a` when
//! wrap-around is disabled, so callers never branch on the topology.

pub use glam::DVec2;

use crate::WorldConfig;

/// Squared length below which a vector is treated as zero.
pub const NEAR_ZERO_SQ: f64 = 1e-8;

/// 90° counter-clockwise rotation `(-v.y, v.x)`.
#[inline]
pub fn perp(v: DVec2) -> DVec2 {
    v.perp()
}

/// 2D cross product `u.x * v.y - u.y * v.x`.
#[inline]
pub fn perp_dot(u: DVec2, v: DVec2) -> f64 {
    u.perp_dot(v)
}

/// Signed angle in radians from `u` to `v`, in `(-π, π]`.
///
/// Positive when `v` lies counter-clockwise of `u`.
#[inline]
pub fn signed_angle_between(u: DVec2, v: DVec2) -> f64 {
    perp_dot(u, v).atan2(u.dot(v))
}

/// Rotate `v` counter-clockwise by `degrees`.
#[inline]
pub fn rotate_deg(v: DVec2, degrees: f64) -> DVec2 {
    DVec2::from_angle(degrees.to_radians()).rotate(v)
}

/// Polar heading of `v` in degrees, `(-180, 180]`.
#[inline]
pub fn heading_deg(v: DVec2) -> f64 {
    v.y.atan2(v.x).to_degrees()
}

/// `true` if both components are finite and the squared length is at least
/// [`NEAR_ZERO_SQ`].
#[inline]
pub fn is_usable(v: DVec2) -> bool {
    v.is_finite() && v.length_squared() >= NEAR_ZERO_SQ
}

/// Rescale `v` to `length`.  `v` must be [usable](is_usable).
#[inline]
pub fn scale_to_length(v: DVec2, length: f64) -> DVec2 {
    v * (length / v.length())
}

// ── Torus ─────────────────────────────────────────────────────────────────────

/// The world's extent and topology.
///
/// With `wrap` enabled the left/right and top/bottom edges are glued
/// together, so the shortest displacement between two points may cross a
/// boundary.  `Torus` is `Copy` and holds no heap data.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Torus {
    pub width:  f64,
    pub height: f64,
    pub wrap:   bool,
}

impl Torus {
    #[inline]
    pub fn new(width: f64, height: f64, wrap: bool) -> Self {
        Self { width, height, wrap }
    }

    /// Signed shortest displacement from `a` to `b`.
    pub fn offset(&self, a: DVec2, b: DVec2) -> DVec2 {
        if !self.wrap {
            return b - a;
        }
        DVec2::new(
            offset_axis(a.x, b.x, self.width),
            offset_axis(a.y, b.y, self.height),
        )
    }

    /// Squared length of [`offset`](Self::offset).
    #[inline]
    pub fn distance_squared(&self, a: DVec2, b: DVec2) -> f64 {
        self.offset(a, b).length_squared()
    }

    /// Wrap `p` into `[0, width) × [0, height)`.  Identity when wrap is off.
    pub fn wrap_point(&self, p: DVec2) -> DVec2 {
        if !self.wrap {
            return p;
        }
        DVec2::new(wrap_axis(p.x, self.width), wrap_axis(p.y, self.height))
    }

    /// `true` if `p` lies in `[0, width) × [0, height)`.
    #[inline]
    pub fn contains(&self, p: DVec2) -> bool {
        (0.0..self.width).contains(&p.x) && (0.0..self.height).contains(&p.y)
    }
}

impl From<&WorldConfig> for Torus {
    fn from(cfg: &WorldConfig) -> Self {
        Torus::new(cfg.width, cfg.height, cfg.toroidal)
    }
}

/// Pick the smallest-magnitude candidate among the direct difference and the
/// difference shifted by one full wrap in either direction.
fn offset_axis(a: f64, b: f64, extent: f64) -> f64 {
    let direct = b - a;
    let plus = direct + extent;
    let minus = direct - extent;

    if direct.abs() < plus.abs() {
        if direct.abs() < minus.abs() { direct } else { minus }
    } else if plus.abs() < minus.abs() {
        plus
    } else {
        minus
    }
}

fn wrap_axis(x: f64, extent: f64) -> f64 {
    let w = x.rem_euclid(extent);
    // rem_euclid can round up to exactly `extent` for tiny negative inputs.
    if w >= extent { 0.0 } else { w }
}
