use thiserror::Error;

#[derive(Debug, Error)]
pub enum PursuitError {
    #[error("unknown pursuer policy {0:?}: expected graph_search, greedy_direction, fixed_heading, or wander")]
    UnknownPolicy(String),
}

pub type PursuitResult<T> = Result<T, PursuitError>;
