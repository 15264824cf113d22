use flock_core::FlockError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("behavior configuration error: {0}")]
    Config(String),

    #[error("unknown predator strategy {0:?} (expected nearest, centroid, random or peripheral)")]
    UnknownStrategy(String),

    #[error(transparent)]
    Core(#[from] FlockError),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
