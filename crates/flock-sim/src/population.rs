//! Initial population layouts.
//!
//! Every agent is built through [`BoidBuilder`], so invalid parameters are
//! reported here rather than at the first step.

use std::f64::consts::TAU;

use flock_agent::{Boid, BoidBuilder, BoidParams, Predator};
use flock_core::{AgentId, DVec2, SimRng, WorldConfig};

use crate::SimResult;

/// Horizontal distance of the predator column from the left edge.
pub const PREDATOR_COLUMN_X: f64 = 10.0;

/// Vertical spacing of the predator column.
pub const PREDATOR_SPACING: f64 = 30.0;

/// `n` prey on a grid covering x ∈ [15 %, 95 %] and y ∈ [5 %, 95 %] of the
/// world, all heading +x at cruise speed.  Ids are `prey(0..n)`, row-major.
///
/// The column count keeps cells roughly square for the band's aspect ratio.
pub fn seed_prey_grid(n: u32, world: &WorldConfig, params: &BoidParams) -> SimResult<Vec<Boid>> {
    if n == 0 {
        return Ok(Vec::new());
    }

    let (x0, x1) = (world.width * 0.15, world.width * 0.95);
    let (y0, y1) = (world.height * 0.05, world.height * 0.95);

    let count = f64::from(n);
    let cols = (count * (x1 - x0) / (y1 - y0)).sqrt().ceil().max(1.0);
    let rows = (count / cols).ceil();
    let dx = (x1 - x0) / (cols + 1.0);
    let dy = (y1 - y0) / (rows + 1.0);
    let cols = cols as u32;

    let velocity = DVec2::X * params.cruise_velocity;
    (0..n)
        .map(|i| -> SimResult<Boid> {
            let (row, col) = (f64::from(i / cols), f64::from(i % cols));
            let position = DVec2::new(x0 + (col + 1.0) * dx, y0 + (row + 1.0) * dy);
            Ok(BoidBuilder::new(AgentId::prey(i), params.clone())
                .position(position)
                .velocity(velocity)
                .build()?)
        })
        .collect()
}

/// `n` prey at uniformly random positions with uniformly random headings at
/// cruise speed.  Ids are `prey(0..n)`.
pub fn seed_prey_scatter(
    n:      u32,
    world:  &WorldConfig,
    params: &BoidParams,
    rng:    &mut SimRng,
) -> SimResult<Vec<Boid>> {
    (0..n)
        .map(|i| -> SimResult<Boid> {
            let position = DVec2::new(rng.gen_range(0.0..world.width), rng.gen_range(0.0..world.height));
            let heading = DVec2::from_angle(rng.gen_range(0.0..TAU));
            Ok(BoidBuilder::new(AgentId::prey(i), params.clone())
                .position(position)
                .velocity(heading * params.cruise_velocity)
                .build()?)
        })
        .collect()
}

/// `n` predators in a column at x = [`PREDATOR_COLUMN_X`], centred on the
/// world's mid-height with [`PREDATOR_SPACING`] between them, heading +x at
/// cruise speed.  Ids are `predator(0..n)`; RNG streams derive from `seed`.
pub fn seed_predator_column(
    n:      u32,
    world:  &WorldConfig,
    params: &BoidParams,
    seed:   u64,
) -> SimResult<Vec<Predator>> {
    let centre = world.height * 0.5;
    let half_span = (f64::from(n) - 1.0) * 0.5;
    let velocity = DVec2::X * params.cruise_velocity;

    (0..n)
        .map(|i| -> SimResult<Predator> {
            let y = centre + (f64::from(i) - half_span) * PREDATOR_SPACING;
            Ok(BoidBuilder::new(AgentId::predator(i), params.clone())
                .position(DVec2::new(PREDATOR_COLUMN_X, y))
                .velocity(velocity)
                .build_predator(seed)?)
        })
        .collect()
}
