//! Strongly typed agent identifiers.
//!
//! Prey and predators share one `AgentId` type but draw from disjoint ranges:
//! prey ids occupy `[0, PREDATOR_ID_BASE)` and predator ids occupy
//! `[PREDATOR_ID_BASE, u32::MAX)`.  A bare id is therefore never ambiguous,
//! which matters for the predator's non-owning selected-prey handle and for
//! telemetry keyed by id.

use std::fmt;

/// First id of the predator range.
pub const PREDATOR_ID_BASE: u32 = 1 << 31;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" — equivalent to `u32::MAX`.
            pub const INVALID: $name = $name(<$inner>::MAX);
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }
    };
}

typed_id! {
    /// Identity of a single boid, unique within a run and immutable after
    /// creation.
    pub struct AgentId(u32);
}

impl AgentId {
    /// The `n`-th id of the prey range.
    ///
    /// # Panics
    /// Panics in debug mode if `n` reaches into the predator range.
    #[inline]
    pub fn prey(n: u32) -> Self {
        debug_assert!(n < PREDATOR_ID_BASE, "prey index {n} overflows into predator range");
        AgentId(n)
    }

    /// The `n`-th id of the predator range.
    #[inline]
    pub fn predator(n: u32) -> Self {
        AgentId(PREDATOR_ID_BASE.saturating_add(n))
    }

    /// `true` for ids in the predator range (the `INVALID` sentinel excluded).
    #[inline]
    pub fn is_predator(self) -> bool {
        self.0 >= PREDATOR_ID_BASE && self != Self::INVALID
    }

    /// `true` for ids in the prey range.
    #[inline]
    pub fn is_prey(self) -> bool {
        self.0 < PREDATOR_ID_BASE
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_predator() {
            write!(f, "Predator({})", self.0 - PREDATOR_ID_BASE)
        } else {
            write!(f, "Prey({})", self.0)
        }
    }
}
