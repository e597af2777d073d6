//! Read-only view of the agent a pursuer is chasing.

use mz_core::{NodeId, Vec2};
use mz_motion::MovementState;

/// A snapshot of the chased agent, taken once per tick before anyone moves.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetView {
    pub position: Vec2,
    pub current:  Option<NodeId>,
    pub target:   Option<NodeId>,
    pub previous: Option<NodeId>,
}

impl TargetView {
    pub fn from_state(state: &MovementState) -> Self {
        Self {
            position: state.position,
            current:  state.current,
            target:   state.target,
            previous: state.previous,
        }
    }

    /// The graph node that best stands for where the agent is: the node it
    /// is heading to, else the one it stands on, else the one it left.
    #[inline]
    pub fn resolve_node(&self) -> Option<NodeId> {
        self.target.or(self.current).or(self.previous)
    }

    /// Position rounded to whole board units.
    #[inline]
    pub fn rounded_position(&self) -> Vec2 {
        self.position.round()
    }
}

impl From<&MovementState> for TargetView {
    fn from(state: &MovementState) -> Self {
        Self::from_state(state)
    }
}
