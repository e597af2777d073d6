use mz_core::Vec2;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MotionError {
    #[error("no node to spawn on near {0}: the graph is empty")]
    NoSpawnNode(Vec2),

    #[error("speed must be a finite, non-negative number, got {0}")]
    InvalidSpeed(f32),
}

pub type MotionResult<T> = Result<T, MotionError>;
