//! Predator hunting: shared perception and state handling, pluggable target
//! selection.
//!
//! [`HuntBehavior`] owns the per-step hunting logic common to every
//! strategy.  Strategies differ only in the [`TargetSelector`] consulted
//! while scouting.

use flock_agent::{Boid, HuntingState, Predator};
use flock_core::{DVec2, Torus, ensure_in_range, ensure_positive};
use tracing::{debug, warn};

use crate::perception::{FieldOfView, Sighting, perceive};
use crate::{Behavior, BehaviorResult, StepContext};

// ── Configuration ─────────────────────────────────────────────────────────────

/// Perception limits of the predator population.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HuntConfig {
    pub perception_radius: f64,

    /// Kept for display; no built-in strategy steers on it.
    pub separation_distance: f64,

    /// Half-width of the field of view, in degrees.
    pub fov_deg: f64,

    /// Prey within this distance count toward the confusion effect.
    pub confusion_radius: f64,
}

impl Default for HuntConfig {
    fn default() -> Self {
        Self {
            perception_radius:   200.0,
            separation_distance: 25.0,
            fov_deg:             90.0,
            confusion_radius:    40.0,
        }
    }
}

impl HuntConfig {
    pub fn validate(&self) -> BehaviorResult<()> {
        ensure_positive("perception_radius", self.perception_radius)?;
        ensure_in_range("separation_distance", self.separation_distance, 0.0, f64::MAX)?;
        ensure_in_range("fov_deg", self.fov_deg, 0.0, 180.0)?;
        ensure_in_range("confusion_radius", self.confusion_radius, 0.0, f64::MAX)?;
        Ok(())
    }

    #[inline]
    pub fn field_of_view(&self) -> FieldOfView {
        FieldOfView { radius: self.perception_radius, angle_deg: self.fov_deg }
    }
}

// ── TargetSelector ────────────────────────────────────────────────────────────

/// Chooses which perceived prey a scouting predator attacks.
pub trait TargetSelector: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    /// Index into `seen` of the chosen prey, or `None` when `seen` is empty.
    ///
    /// May record an aim point on `predator` (`set_target`) or draw from its
    /// RNG.
    fn select(&self, predator: &mut Predator, seen: &[Sighting<'_>], torus: &Torus) -> Option<usize>;
}

/// Arithmetic mean of the perceived positions.
pub fn centroid(seen: &[Sighting<'_>]) -> Option<DVec2> {
    if seen.is_empty() {
        return None;
    }
    let sum: DVec2 = seen.iter().map(|s| s.boid.position()).sum();
    Some(sum / seen.len() as f64)
}

/// First index with the smallest key.
fn arg_min(seen: &[Sighting<'_>], key: impl Fn(&Sighting<'_>) -> f64) -> Option<usize> {
    seen.iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, s)| {
            let k = key(s);
            match best {
                Some((_, b)) if b <= k => best,
                _ => Some((i, k)),
            }
        })
        .map(|(i, _)| i)
}

/// First index with the largest key.
fn arg_max(seen: &[Sighting<'_>], key: impl Fn(&Sighting<'_>) -> f64) -> Option<usize> {
    arg_min(seen, |s| -key(s))
}

/// Attack the closest perceived prey.
#[derive(Copy, Clone, Debug, Default)]
pub struct NearestSelector;

impl TargetSelector for NearestSelector {
    fn name(&self) -> &'static str {
        "HuntNearest"
    }

    fn select(&self, _: &mut Predator, seen: &[Sighting<'_>], _: &Torus) -> Option<usize> {
        arg_min(seen, |s| s.dist_sq)
    }
}

/// Attack the perceived prey closest to the perceived centroid.  The
/// centroid is recorded as the predator's target point.
#[derive(Copy, Clone, Debug, Default)]
pub struct CentroidSelector;

impl TargetSelector for CentroidSelector {
    fn name(&self) -> &'static str {
        "HuntCentroid"
    }

    fn select(&self, predator: &mut Predator, seen: &[Sighting<'_>], torus: &Torus) -> Option<usize> {
        let c = centroid(seen)?;
        predator.set_target(Some(c));
        arg_min(seen, |s| torus.distance_squared(c, s.boid.position()))
    }
}

/// Attack a uniformly random perceived prey, drawn from the predator's RNG.
#[derive(Copy, Clone, Debug, Default)]
pub struct RandomSelector;

impl TargetSelector for RandomSelector {
    fn name(&self) -> &'static str {
        "HuntRandom"
    }

    fn select(&self, predator: &mut Predator, seen: &[Sighting<'_>], _: &Torus) -> Option<usize> {
        predator.rng_mut().choose_index(seen.len())
    }
}

/// Attack the perceived prey farthest from the perceived centroid.
#[derive(Copy, Clone, Debug, Default)]
pub struct PeripheralSelector;

impl TargetSelector for PeripheralSelector {
    fn name(&self) -> &'static str {
        "HuntMostPeripheral"
    }

    fn select(&self, _: &mut Predator, seen: &[Sighting<'_>], torus: &Torus) -> Option<usize> {
        let c = centroid(seen)?;
        arg_max(seen, |s| torus.distance_squared(c, s.boid.position()))
    }
}

// ── HuntBehavior ──────────────────────────────────────────────────────────────

/// Predator behavior parameterised by its target selector.
///
/// Each step, per predator:
///
/// 1. Perceive prey and recount `prey_in_confusion`.
/// 2. SCOUT: select a prey; if one is found, aim at it, raise predation and
///    switch to ATTACK.  Otherwise nothing changes.
/// 3. ATTACK: re-aim at the selected prey's current position.  A handle that
///    no longer resolves drops the predator back to SCOUT.
/// 4. REST: count the rest down; SCOUT once it lapses.
#[derive(Clone, Debug)]
pub struct HuntBehavior<S> {
    config:   HuntConfig,
    selector: S,
}

pub type HuntNearest    = HuntBehavior<NearestSelector>;
pub type HuntCentroid   = HuntBehavior<CentroidSelector>;
pub type HuntRandom     = HuntBehavior<RandomSelector>;
pub type HuntPeripheral = HuntBehavior<PeripheralSelector>;

impl<S: TargetSelector> HuntBehavior<S> {
    /// Validate `config` and build the behavior.
    pub fn new(config: HuntConfig, selector: S) -> BehaviorResult<Self> {
        config.validate()?;
        Ok(Self { config, selector })
    }

    pub fn config(&self) -> &HuntConfig {
        &self.config
    }

    pub fn selector(&self) -> &S {
        &self.selector
    }

    fn hunt(&self, predator: &mut Predator, prey: &[Boid], ctx: &StepContext) {
        let torus = &ctx.torus;
        let seen = perceive(predator.boid(), prey, None, self.config.field_of_view(), ctx);

        let confusion_sq = self.config.confusion_radius * self.config.confusion_radius;
        predator.set_prey_in_confusion(seen.iter().filter(|s| s.dist_sq <= confusion_sq).count());

        match predator.state() {
            HuntingState::Scout => {
                let Some(pick) = self.selector.select(predator, &seen, torus) else {
                    return;
                };
                let chosen = &seen[pick];
                predator.begin_attack(chosen.boid.id());
                // Aim before raising predation: the first lunge uses the base
                // magnitude.
                predator.boid_mut().set_desired_acceleration(chosen.offset);
                predator.boid_mut().set_predation(true);
                debug!(
                    predator = %predator.id(),
                    prey     = %chosen.boid.id(),
                    strategy = self.selector.name(),
                    "target selected",
                );
            }
            HuntingState::Attack => {
                let chased = predator
                    .selected_prey()
                    .and_then(|id| prey.iter().find(|p| p.id() == id));
                match chased {
                    Some(p) => {
                        let aim = predator.boid().direction_to(p, torus);
                        predator.boid_mut().set_desired_acceleration(aim);
                    }
                    None => {
                        warn!(predator = %predator.id(), "selected prey is gone; back to scouting");
                        predator.forget_prey();
                    }
                }
            }
            HuntingState::Rest => {
                if predator.tick_rest(ctx.dt) {
                    debug!(predator = %predator.id(), "rest over");
                }
            }
            HuntingState::Pursuit => {}
        }
    }
}

impl<S: TargetSelector> Behavior for HuntBehavior<S> {
    type Friendly = Predator;
    type Enemy    = Boid;

    fn name(&self) -> &'static str {
        self.selector.name()
    }

    fn update(&self, predators: &mut [Predator], prey: &[Boid], ctx: &StepContext) {
        for predator in predators.iter_mut() {
            self.hunt(predator, prey, ctx);
        }
    }
}
