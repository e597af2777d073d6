use mz_core::{AgentId, CoreError};
use mz_motion::MotionError;
use mz_nav::NavError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("level error: {0}")]
    Nav(#[from] NavError),

    #[error("a level needs a player; call SimBuilder::player before build")]
    MissingPlayer,

    #[error("agent {0} cannot spawn: the level graph has no nodes")]
    NoSpawnNode(AgentId),

    #[error("agent {agent}: {source}")]
    Agent {
        agent:  AgentId,
        #[source]
        source: MotionError,
    },
}

pub type SimResult<T> = Result<T, SimError>;
