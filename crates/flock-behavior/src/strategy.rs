//! Configuration-time selection of the predator strategy.

use std::fmt;
use std::str::FromStr;

use flock_agent::{Boid, Predator};

use crate::hunt::{
    CentroidSelector, HuntBehavior, HuntConfig, NearestSelector, PeripheralSelector, RandomSelector,
};
use crate::{Behavior, BehaviorError, BehaviorResult};

/// A predator behavior chosen at run time.
pub type BoxedHunt = Box<dyn Behavior<Friendly = Predator, Enemy = Boid>>;

/// The four built-in targeting strategies.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PredatorStrategy {
    #[default]
    Nearest,
    Centroid,
    Random,
    Peripheral,
}

impl PredatorStrategy {
    pub const ALL: [PredatorStrategy; 4] = [
        PredatorStrategy::Nearest,
        PredatorStrategy::Centroid,
        PredatorStrategy::Random,
        PredatorStrategy::Peripheral,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PredatorStrategy::Nearest    => "nearest",
            PredatorStrategy::Centroid   => "centroid",
            PredatorStrategy::Random     => "random",
            PredatorStrategy::Peripheral => "peripheral",
        }
    }

    /// Validate `config` and build the matching behavior.
    pub fn build(self, config: HuntConfig) -> BehaviorResult<BoxedHunt> {
        Ok(match self {
            PredatorStrategy::Nearest    => Box::new(HuntBehavior::new(config, NearestSelector)?),
            PredatorStrategy::Centroid   => Box::new(HuntBehavior::new(config, CentroidSelector)?),
            PredatorStrategy::Random     => Box::new(HuntBehavior::new(config, RandomSelector)?),
            PredatorStrategy::Peripheral => Box::new(HuntBehavior::new(config, PeripheralSelector)?),
        })
    }
}

impl fmt::Display for PredatorStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PredatorStrategy {
    type Err = BehaviorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        PredatorStrategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == lower)
            .ok_or_else(|| BehaviorError::UnknownStrategy(s.to_owned()))
    }
}
