//! The `Behavior` trait — the steering extension point.

use crate::StepContext;

/// Pluggable per-step steering for one population.
///
/// A behavior reads the opposing population (`enemies`) and its own
/// population (`friendlies`) and writes each friendly agent's desired
/// acceleration and behavioral flags.  It runs between attack resolution and
/// integration, so every read sees the pre-step world: the engine only moves
/// agents after both populations' behaviors have returned.
///
/// # Thread safety
///
/// The prey compute phase may run on Rayon's thread pool, so implementations
/// must be `Send + Sync`.  Per-agent state (wiggle phase, hunting state, RNG)
/// lives on the agents, not in the behavior.
///
/// # Example
///
/// ```rust,ignore
/// struct Drift;
///
/// impl Behavior for Drift {
///     type Friendly = Boid;
///     type Enemy    = Predator;
///
///     fn name(&self) -> &'static str { "Drift" }
///
///     fn update(&self, prey: &mut [Boid], _: &[Predator], _: &StepContext) {
///         for boid in prey {
///             let v = boid.velocity();
///             boid.set_desired_acceleration(v);
///         }
///     }
/// }
/// ```
pub trait Behavior: Send + Sync + 'static {
    /// The population this behavior steers.
    type Friendly;

    /// The population it reacts to.
    type Enemy;

    /// Short human-readable name used in logs.
    fn name(&self) -> &'static str;

    /// Compute this step's steering for every agent in `friendlies`.
    fn update(
        &self,
        friendlies: &mut [Self::Friendly],
        enemies:    &[Self::Enemy],
        ctx:        &StepContext,
    );
}

impl<B: Behavior + ?Sized> Behavior for Box<B> {
    type Friendly = B::Friendly;
    type Enemy    = B::Enemy;

    #[inline]
    fn name(&self) -> &'static str {
        (**self).name()
    }

    #[inline]
    fn update(
        &self,
        friendlies: &mut [Self::Friendly],
        enemies:    &[Self::Enemy],
        ctx:        &StepContext,
    ) {
        (**self).update(friendlies, enemies, ctx)
    }
}
