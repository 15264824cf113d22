//! The shared neighbour query: perception radius, field of view and
//! occlusion culling.
//!
//! Candidates are scanned in collection order.  A candidate that is nearer
//! than, and at nearly the same bearing as, agents already accepted replaces
//! them; a candidate hidden behind an accepted agent is dropped.  With an
//! occlusion angle of `0` every agent inside the radius and the field of view
//! is accepted.

use flock_agent::Boid;
use flock_core::DVec2;

use crate::StepContext;

/// Perception limits of one population.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldOfView {
    /// Strict upper bound on the distance to a perceived agent.
    pub radius: f64,

    /// Largest accepted angle, in degrees, between the observer's heading
    /// and the direction to a perceived agent.
    pub angle_deg: f64,
}

/// One agent that passed the perception filters.
#[derive(Copy, Clone, Debug)]
pub struct Sighting<'a> {
    pub boid: &'a Boid,

    /// Shortest displacement from the observer to `boid`.
    pub offset: DVec2,

    pub dist_sq: f64,
}

/// Collect the agents in `candidates` that `observer` can see.
///
/// `skip` excludes one index (the observer itself when scanning its own
/// population).  Results are in acceptance order.
pub fn perceive<'a, B: AsRef<Boid>>(
    observer:   &Boid,
    candidates: &'a [B],
    skip:       Option<usize>,
    fov:        FieldOfView,
    ctx:        &StepContext,
) -> Vec<Sighting<'a>> {
    let torus = &ctx.torus;
    let occlusion = ctx.occlusion_angle_deg;
    let radius_sq = fov.radius * fov.radius;

    let mut seen: Vec<&'a Boid> = Vec::new();

    for (i, candidate) in candidates.iter().enumerate() {
        if skip == Some(i) {
            continue;
        }
        let other: &'a Boid = candidate.as_ref();
        let dist_sq = observer.distance_squared_to(other, torus);
        if dist_sq >= radius_sq {
            continue;
        }
        let angle = observer.angle_between(other, torus);
        if angle > fov.angle_deg {
            continue;
        }

        if occlusion <= 0.0 {
            seen.push(other);
            continue;
        }

        let hidden = observer.occluded_neighbors(angle, dist_sq, &seen, torus, occlusion);
        if !hidden.is_empty() {
            for &h in hidden.iter().rev() {
                seen.remove(h);
            }
            seen.push(other);
        } else if !observer.is_occluded_by_neighbor(angle, dist_sq, &seen, torus, occlusion) {
            seen.push(other);
        }
    }

    seen.into_iter()
        .map(|boid| Sighting {
            boid,
            offset: observer.direction_to(boid, torus),
            dist_sq: observer.distance_squared_to(boid, torus),
        })
        .collect()
}
