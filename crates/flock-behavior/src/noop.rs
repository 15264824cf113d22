//! A no-op behavior — agents coast on their current velocity.

use std::marker::PhantomData;

use crate::{Behavior, StepContext};

/// A [`Behavior`] that never writes a desired acceleration.
///
/// Useful in tests, or for a passive population that should only drift.
pub struct NoopBehavior<F, E>(PhantomData<fn() -> (F, E)>);

impl<F, E> NoopBehavior<F, E> {
    pub fn new() -> Self {
        NoopBehavior(PhantomData)
    }
}

impl<F, E> Default for NoopBehavior<F, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: 'static, E: 'static> Behavior for NoopBehavior<F, E> {
    type Friendly = F;
    type Enemy    = E;

    fn name(&self) -> &'static str {
        "Noop"
    }

    fn update(&self, _friendlies: &mut [F], _enemies: &[E], _ctx: &StepContext) {}
}
