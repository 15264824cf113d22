use flock_behavior::BehaviorError;
use flock_core::{AgentId, FlockError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("agent id {0} was already added to this run")]
    DuplicateId(AgentId),

    #[error("agent id {id} is not in the {expected} id range")]
    WrongIdRange {
        id:       AgentId,
        expected: &'static str,
    },

    #[error(transparent)]
    Core(#[from] FlockError),

    #[error(transparent)]
    Behavior(#[from] BehaviorError),
}

pub type SimResult<T> = Result<T, SimError>;
