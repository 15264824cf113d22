//! Predator extension: hunting state machine and attack resolution.

use std::fmt;

use flock_core::{AgentId, AgentRng, DVec2, Torus};
use tracing::debug;

use crate::Boid;

/// Default time a predator rests after a catch, in seconds.
pub const DEFAULT_REST_DURATION: f64 = 1.0;

/// The predator's discrete behavioural mode.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HuntingState {
    /// Looking for a target among visible prey.
    #[default]
    Scout,
    /// Reserved; no built-in strategy enters it.
    Pursuit,
    /// Steering at the selected prey every step.
    Attack,
    /// Recovering after a catch.
    Rest,
}

impl HuntingState {
    /// Lower-case label, useful for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            HuntingState::Scout   => "scout",
            HuntingState::Pursuit => "pursuit",
            HuntingState::Attack  => "attack",
            HuntingState::Rest    => "rest",
        }
    }
}

impl fmt::Display for HuntingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capture probability for one colliding prey when `n` prey are within the
/// confusion radius: `1 / 2^(n-1)`, capped at 1.
pub fn capture_probability(n: usize) -> f64 {
    match n {
        0 | 1 => 1.0,
        n => 0.5f64.powi(i32::try_from(n - 1).unwrap_or(i32::MAX)),
    }
}

/// A [`Boid`] with hunting state attached.
///
/// The selected prey is a non-owning handle: an [`AgentId`] looked up in the
/// current prey collection each step.  The engine clears it through
/// [`forget_prey`](Self::forget_prey) whenever that prey is removed.
#[derive(Clone, Debug)]
pub struct Predator {
    boid:              Boid,
    state:             HuntingState,
    selected_prey:     Option<AgentId>,
    target:            Option<DVec2>,
    prey_in_confusion: usize,
    rest_remaining:    f64,
    rest_duration:     f64,
    rng:               AgentRng,
}

impl Predator {
    /// Attach hunting state to `boid`.  `seed` is the run's global seed; the
    /// predator's RNG stream is derived from it and the boid's id.
    pub fn new(boid: Boid, seed: u64) -> Self {
        let rng = AgentRng::new(seed, boid.id());
        Self {
            boid,
            state:             HuntingState::Scout,
            selected_prey:     None,
            target:            None,
            prey_in_confusion: 0,
            rest_remaining:    0.0,
            rest_duration:     DEFAULT_REST_DURATION,
            rng,
        }
    }

    pub fn with_rest_duration(mut self, secs: f64) -> Self {
        self.rest_duration = secs;
        self
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn boid(&self) -> &Boid {
        &self.boid
    }

    #[inline]
    pub fn boid_mut(&mut self) -> &mut Boid {
        &mut self.boid
    }

    #[inline]
    pub fn id(&self) -> AgentId {
        self.boid.id()
    }

    #[inline]
    pub fn state(&self) -> HuntingState {
        self.state
    }

    #[inline]
    pub fn set_state(&mut self, state: HuntingState) {
        self.state = state;
    }

    #[inline]
    pub fn selected_prey(&self) -> Option<AgentId> {
        self.selected_prey
    }

    #[inline]
    pub fn set_selected_prey(&mut self, prey: Option<AgentId>) {
        self.selected_prey = prey;
    }

    /// Optional aim point kept for debug display.
    #[inline]
    pub fn target(&self) -> Option<DVec2> {
        self.target
    }

    #[inline]
    pub fn set_target(&mut self, target: Option<DVec2>) {
        self.target = target;
    }

    #[inline]
    pub fn prey_in_confusion(&self) -> usize {
        self.prey_in_confusion
    }

    #[inline]
    pub fn set_prey_in_confusion(&mut self, n: usize) {
        self.prey_in_confusion = n;
    }

    /// Seconds of rest left; negative once the rest has lapsed.
    #[inline]
    pub fn rest_remaining(&self) -> f64 {
        self.rest_remaining
    }

    #[inline]
    pub fn rest_duration(&self) -> f64 {
        self.rest_duration
    }

    #[inline]
    pub fn rng_mut(&mut self) -> &mut AgentRng {
        &mut self.rng
    }

    // ── State machine ─────────────────────────────────────────────────────

    /// Begin chasing `prey`.
    pub fn begin_attack(&mut self, prey: AgentId) {
        self.selected_prey = Some(prey);
        self.state = HuntingState::Attack;
    }

    /// Drop the selected prey (it was caught or removed).  A predator that
    /// was attacking it falls back to scouting.
    pub fn forget_prey(&mut self) {
        self.selected_prey = None;
        self.target = None;
        self.boid.set_predation(false);
        if matches!(self.state, HuntingState::Attack | HuntingState::Pursuit) {
            self.state = HuntingState::Scout;
        }
    }

    /// Enter REST: clear selection, target and predation; restart the rest
    /// countdown.
    pub fn enter_rest(&mut self) {
        self.state = HuntingState::Rest;
        self.rest_remaining = self.rest_duration;
        self.selected_prey = None;
        self.target = None;
        self.boid.set_predation(false);
    }

    /// Count the rest down by `dt`; returns `true` (and switches to SCOUT)
    /// once it has lapsed.  No-op outside REST.
    pub fn tick_rest(&mut self, dt: f64) -> bool {
        if self.state != HuntingState::Rest {
            return false;
        }
        self.rest_remaining -= dt;
        if self.rest_remaining < 0.0 {
            self.state = HuntingState::Scout;
            return true;
        }
        false
    }

    /// Try to catch every prey whose collision circle overlaps this
    /// predator's.
    ///
    /// Each colliding candidate is caught independently with
    /// [`capture_probability`]`(prey_in_confusion)`.  Any catch sends the
    /// predator to REST, restarting the countdown if it was already resting.
    /// Returns the indices into `prey` that were caught.
    pub fn attack_prey<B: AsRef<Boid>>(&mut self, prey: &[B], torus: &Torus) -> Vec<usize> {
        let colliding = self.boid.collide_with_others(prey, torus);
        if colliding.is_empty() {
            return colliding;
        }

        let p = capture_probability(self.prey_in_confusion);
        let caught: Vec<usize> = colliding
            .iter()
            .copied()
            .filter(|_| self.rng.unit() <= p)
            .collect();

        if caught.len() < colliding.len() {
            debug!(
                predator = %self.id(),
                missed = colliding.len() - caught.len(),
                p,
                "attack missed prey",
            );
        }
        if !caught.is_empty() {
            self.enter_rest();
        }
        caught
    }
}

impl AsRef<Boid> for Predator {
    #[inline]
    fn as_ref(&self) -> &Boid {
        &self.boid
    }
}

impl AsMut<Boid> for Predator {
    #[inline]
    fn as_mut(&mut self) -> &mut Boid {
        &mut self.boid
    }
}
